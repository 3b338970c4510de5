// 钱包数据访问 Repository

use async_trait::async_trait;

use crate::{domain::Wallet, error::Result};

// ============ Repository Trait ============

/// 钱包持久化
///
/// 账户元数据与助记词分开存放，助记词的保护级别高于元数据
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// 保存整个聚合（元数据 + 助记词）
    async fn save(&self, wallet: &Wallet) -> Result<()>;

    /// 根据 ID 查询钱包
    async fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>>;
}

/// 当前钱包上下文
#[async_trait]
pub trait CurrentWalletProvider: Send + Sync {
    async fn current_wallet_id(&self) -> Result<Option<String>>;

    async fn set_current_wallet_id(&self, wallet_id: &str) -> Result<()>;
}
