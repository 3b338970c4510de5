//! 一次性备份展示助记词
//!
//! 返回值在 drop 时清零；调用方不得缓存或记录

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use zeroize::Zeroizing;

use super::load_wallet;
use crate::{error::Result, repository::WalletRepository};

pub struct GetSeedPhraseUseCase {
    repository: Arc<dyn WalletRepository>,
}

impl GetSeedPhraseUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        wallet_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Zeroizing<String>> {
        let wallet = load_wallet(self.repository.as_ref(), wallet_id, cancel).await?;
        info!(wallet_id = %wallet_id, "seed phrase revealed for backup");
        Ok(Zeroizing::new(wallet.seed_phrase().value().to_string()))
    }
}
