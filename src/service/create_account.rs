//! 派生新账户
//!
//! 下一个索引 = 该网络已有账户数，保证每个网络的索引从 0 连续递增

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{
    cancellation::{ensure_active, run_cancellable},
    derive_blocking, load_wallet,
    wallet_locks::WalletLocks,
};
use crate::{
    domain::{
        account::normalize_label, Account, CoinTypePolicy, KeyDerivationService, NetworkType,
    },
    error::{Result, WalletError},
    repository::WalletRepository,
};

pub struct CreateAccountUseCase {
    repository: Arc<dyn WalletRepository>,
    derivation: Arc<dyn KeyDerivationService>,
    locks: WalletLocks,
}

impl CreateAccountUseCase {
    pub fn new(
        repository: Arc<dyn WalletRepository>,
        derivation: Arc<dyn KeyDerivationService>,
        locks: WalletLocks,
    ) -> Self {
        Self {
            repository,
            derivation,
            locks,
        }
    }

    pub async fn execute(
        &self,
        wallet_id: &str,
        label: Option<&str>,
        network: NetworkType,
        cancel: &CancellationToken,
    ) -> Result<Account> {
        let label = normalize_label(label.map(str::to_string))?;

        let _guard = run_cancellable(cancel, async { Ok(self.locks.lock(wallet_id).await) }).await?;
        let mut wallet = load_wallet(self.repository.as_ref(), wallet_id, cancel).await?;

        let index = wallet.next_index(network);
        let path = CoinTypePolicy::account_path(network, index);
        let address = {
            let derivation = self.derivation.clone();
            let seed = wallet.seed_phrase().clone();
            let path = path.clone();
            derive_blocking(move || derivation.derive_address(&seed, &path, network)).await?
        };

        let account = Account::new(address, path, label, network)?;
        if !wallet.add_account(account.clone()) {
            return Err(WalletError::DerivationError(format!(
                "address {} already exists in wallet",
                account.address()
            )));
        }

        ensure_active(cancel)?;
        self.repository.save(&wallet).await?;

        info!(
            wallet_id = %wallet_id,
            %network,
            index,
            address = %account.address(),
            "account created"
        );
        Ok(account)
    }
}
