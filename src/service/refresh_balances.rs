//! 刷新余额
//!
//! 失败即中止：任一账户查询失败，整个刷新返回错误；结果不落盘

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{cancellation::run_cancellable, load_wallet};
use crate::{
    domain::{Account, BalanceService},
    error::Result,
    repository::WalletRepository,
};

pub struct RefreshWalletBalancesUseCase {
    repository: Arc<dyn WalletRepository>,
    balances: Arc<dyn BalanceService>,
}

impl RefreshWalletBalancesUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>, balances: Arc<dyn BalanceService>) -> Self {
        Self {
            repository,
            balances,
        }
    }

    pub async fn execute(&self, wallet_id: &str, cancel: &CancellationToken) -> Result<Vec<Account>> {
        let mut wallet = load_wallet(self.repository.as_ref(), wallet_id, cancel).await?;

        let targets: Vec<_> = wallet
            .accounts()
            .iter()
            .map(|a| (a.address().clone(), a.network()))
            .collect();

        for (address, network) in targets {
            let balance = run_cancellable(
                cancel,
                self.balances.fetch_remote_balance(&address, network),
            )
            .await?;
            debug!(%address, %balance, "balance fetched");
            if let Some(account) = wallet.account_by_address_mut(address.as_str()) {
                account.update_balance(balance);
            }
        }

        info!(wallet_id = %wallet_id, accounts = wallet.accounts().len(), "balances refreshed");
        Ok(wallet.accounts().to_vec())
    }
}
