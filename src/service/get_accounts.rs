use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::cancellation::run_cancellable;
use crate::{domain::Account, error::Result, repository::WalletRepository};

/// 列出账户；钱包不存在时返回空列表
pub struct GetAccountsUseCase {
    repository: Arc<dyn WalletRepository>,
}

impl GetAccountsUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, wallet_id: &str, cancel: &CancellationToken) -> Result<Vec<Account>> {
        let wallet = run_cancellable(cancel, self.repository.get_by_id(wallet_id)).await?;
        Ok(wallet
            .map(|w| w.accounts().to_vec())
            .unwrap_or_default())
    }
}
