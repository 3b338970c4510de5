//! 修改账户标签并保存

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{
    cancellation::{ensure_active, run_cancellable},
    load_wallet,
    wallet_locks::WalletLocks,
};
use crate::{
    domain::Account,
    error::{Result, WalletError},
    repository::WalletRepository,
};

pub struct RenameAccountUseCase {
    repository: Arc<dyn WalletRepository>,
    locks: WalletLocks,
}

impl RenameAccountUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>, locks: WalletLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn execute(
        &self,
        wallet_id: &str,
        address: &str,
        label: &str,
        cancel: &CancellationToken,
    ) -> Result<Account> {
        let _guard = run_cancellable(cancel, async { Ok(self.locks.lock(wallet_id).await) }).await?;
        let mut wallet = load_wallet(self.repository.as_ref(), wallet_id, cancel).await?;

        let account = wallet
            .account_by_address_mut(address)
            .ok_or_else(|| WalletError::AccountNotFound(address.to_string()))?;
        account.rename(label)?;
        let renamed = account.clone();

        ensure_active(cancel)?;
        self.repository.save(&wallet).await?;

        info!(wallet_id = %wallet_id, address = %renamed.address(), "account renamed");
        Ok(renamed)
    }
}
