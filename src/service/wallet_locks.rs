//! 按钱包 id 串行化读-改-写
//!
//! 仅限进程内；同一钱包的 CreateAccount / RenameAccount 依次执行

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct WalletLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl WalletLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取钱包锁，guard drop 时释放
    pub async fn lock(&self, wallet_id: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.inner.lock().await;
            // 清理无人持有的条目
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(wallet_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }
}
