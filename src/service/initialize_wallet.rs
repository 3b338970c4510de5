//! 首次启动：返回当前钱包，没有则新建

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::cancellation::{ensure_active, run_cancellable};
use crate::{
    domain::{Wallet, WalletFactory},
    error::Result,
    repository::{CurrentWalletProvider, WalletRepository},
};

pub struct InitializeWalletUseCase {
    repository: Arc<dyn WalletRepository>,
    current: Arc<dyn CurrentWalletProvider>,
}

impl InitializeWalletUseCase {
    pub fn new(repository: Arc<dyn WalletRepository>, current: Arc<dyn CurrentWalletProvider>) -> Self {
        Self {
            repository,
            current,
        }
    }

    /// 幂等：当前钱包存在时原样返回
    pub async fn execute(&self, cancel: &CancellationToken) -> Result<Wallet> {
        if let Some(current_id) = run_cancellable(cancel, self.current.current_wallet_id()).await? {
            match run_cancellable(cancel, self.repository.get_by_id(&current_id)).await? {
                Some(wallet) => {
                    info!(wallet_id = %wallet.id(), "current wallet loaded");
                    return Ok(wallet);
                }
                None => {
                    warn!(wallet_id = %current_id, "current wallet reference is dangling, creating a new wallet");
                }
            }
        }

        let wallet = WalletFactory::create_new()?;

        // 保存与登记不与取消竞速，避免只写一半
        ensure_active(cancel)?;
        self.repository.save(&wallet).await?;
        self.current.set_current_wallet_id(wallet.id()).await?;

        info!(wallet_id = %wallet.id(), "new wallet initialized");
        Ok(wallet)
    }
}
