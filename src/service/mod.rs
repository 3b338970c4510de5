//! 应用层用例
//!
//! 每个用例：加载聚合 → 派生/计算 → 修改 → 整体保存

pub mod cancellation;
pub mod create_account;
pub mod get_accounts;
pub mod get_seed_phrase;
pub mod import_wallet;
pub mod initialize_wallet;
pub mod refresh_balances;
pub mod rename_account;
pub mod send_funds;
pub mod wallet_locks;

pub use create_account::CreateAccountUseCase;
pub use get_accounts::GetAccountsUseCase;
pub use get_seed_phrase::GetSeedPhraseUseCase;
pub use import_wallet::ImportWalletUseCase;
pub use initialize_wallet::InitializeWalletUseCase;
pub use refresh_balances::RefreshWalletBalancesUseCase;
pub use rename_account::RenameAccountUseCase;
pub use send_funds::SendFundsUseCase;
pub use wallet_locks::WalletLocks;

use tokio_util::sync::CancellationToken;

use crate::{
    domain::Wallet,
    error::{Result, WalletError},
    repository::WalletRepository,
};

/// 加载钱包，不存在时返回 `WalletNotFound`
pub(crate) async fn load_wallet(
    repository: &dyn WalletRepository,
    wallet_id: &str,
    cancel: &CancellationToken,
) -> Result<Wallet> {
    cancellation::run_cancellable(cancel, repository.get_by_id(wallet_id))
        .await?
        .ok_or_else(|| WalletError::WalletNotFound(wallet_id.to_string()))
}

/// 在阻塞线程池上执行密钥派生（PBKDF2 + BIP32），不占用 async 工作线程
pub(crate) async fn derive_blocking<T, F>(derive: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(derive)
        .await
        .map_err(|e| WalletError::DerivationError(format!("derivation task failed: {}", e)))?
}
