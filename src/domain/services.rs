//! 外部协作方接口
//!
//! 由基础设施层实现；领域与用例层只依赖这些 trait

use async_trait::async_trait;

use crate::{
    domain::{
        network::NetworkType,
        transaction::Transaction,
        value_objects::{Address, Balance, PrivateKey},
    },
    error::Result,
};

/// 远程余额查询
#[async_trait]
pub trait BalanceService: Send + Sync {
    async fn fetch_remote_balance(&self, address: &Address, network: NetworkType)
        -> Result<Balance>;
}

/// 签名并广播转账
///
/// 私钥只在本次调用期间借用，实现方不得保留
#[async_trait]
pub trait BlockchainService: Send + Sync {
    async fn transfer(
        &self,
        network: NetworkType,
        private_key: &PrivateKey,
        to: &Address,
        amount: Balance,
    ) -> Result<Transaction>;
}
