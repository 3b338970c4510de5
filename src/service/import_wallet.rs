//! 导入助记词

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::cancellation::ensure_active;
use crate::{
    domain::{SeedPhrase, Wallet, WalletFactory},
    error::Result,
    repository::WalletRepository,
};

pub struct ImportWalletUseCase {
    repository: Arc<dyn WalletRepository>,
}

impl ImportWalletUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>) -> Self {
        Self { repository }
    }

    /// 校验助记词并以新 id 保存；不自动派生账户
    pub async fn execute(&self, mnemonic: &str, cancel: &CancellationToken) -> Result<Wallet> {
        let seed = SeedPhrase::new(mnemonic)?;
        let wallet = WalletFactory::with_seed(seed);

        ensure_active(cancel)?;
        self.repository.save(&wallet).await?;

        info!(wallet_id = %wallet.id(), words = wallet.seed_phrase().word_count().words(), "wallet imported");
        Ok(wallet)
    }
}
