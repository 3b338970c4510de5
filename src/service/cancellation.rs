//! 用例取消：每个 I/O await 与取消令牌竞速

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{Result, WalletError};

/// 令牌已触发则立即返回 `Cancelled`
pub fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(WalletError::Cancelled)
    } else {
        Ok(())
    }
}

/// 运行 future，令牌触发时放弃并返回 `Cancelled`
pub async fn run_cancellable<F, T>(cancel: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    ensure_active(cancel)?;
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WalletError::Cancelled),
        result = future => result,
    }
}
