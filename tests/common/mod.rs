//! 测试辅助模块
//! 提供可编程的后端替身和预置状态

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use ironvault::{
    app_state::AppState,
    domain::{
        Address, Balance, BalanceService, Bip32KeyDerivationService, BlockchainService,
        NetworkType, PrivateKey, Transaction, TransactionStatus,
    },
    error::{Result, WalletError},
    repository::InMemoryWalletRepository,
};

/// BIP39 标准测试助记词
pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub const ETH_ADDRESS_0: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";
pub const ETH_ADDRESS_1: &str = "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0";
pub const BTC_ADDRESS_0: &str = "bc1qmxrw6qdh5g3ztfcwm0et5l8mvws4eva24kmp8m";
pub const SOL_ADDRESS_0: &str = "4EngF3p73rFnEgjcAG5DVQ91QGFze4vsvjVUkAwLjv14";
pub const SOL_ADDRESS_1: &str = "6oa6zNezaUx45dgpdN1h46BRxsgUyV9ibuBMvBQMhbkF";

/// 余额服务替身：按地址返回预设余额，未预设的地址视为查询失败
#[derive(Default)]
pub struct FakeBalanceService {
    balances: Mutex<HashMap<String, Balance>>,
    pub calls: AtomicUsize,
}

impl FakeBalanceService {
    pub fn with_balance(self, address: &str, amount: &str) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), amount.parse().unwrap());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceService for FakeBalanceService {
    async fn fetch_remote_balance(
        &self,
        address: &Address,
        _network: NetworkType,
    ) -> Result<Balance> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.balances
            .lock()
            .unwrap()
            .get(address.as_str())
            .copied()
            .ok_or_else(|| WalletError::BalanceUnavailable(address.to_string()))
    }
}

/// 链服务替身：记录每次广播，可配置为拒绝
#[derive(Default)]
pub struct FakeBlockchainService {
    pub reject: bool,
    pub transfers: Mutex<Vec<(NetworkType, String, Balance)>>,
}

impl FakeBlockchainService {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }
}

#[async_trait]
impl BlockchainService for FakeBlockchainService {
    async fn transfer(
        &self,
        network: NetworkType,
        private_key: &PrivateKey,
        to: &Address,
        amount: Balance,
    ) -> Result<Transaction> {
        if self.reject {
            return Err(WalletError::BroadcastRejected("insufficient funds".to_string()));
        }
        let from = ironvault::domain::derivation::address_from_private_key(private_key, network)?;
        self.transfers
            .lock()
            .unwrap()
            .push((network, to.to_string(), amount));
        Ok(Transaction {
            id: format!("tx-{}", self.transfer_count()),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            status: TransactionStatus::Pending,
            timestamp: Utc::now(),
            network,
        })
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryWalletRepository>,
    pub balances: Arc<FakeBalanceService>,
    pub blockchain: Arc<FakeBlockchainService>,
}

/// 创建测试应用状态（内存存储 + 替身后端）
pub fn create_test_context(
    balances: FakeBalanceService,
    blockchain: FakeBlockchainService,
) -> TestContext {
    let repository = Arc::new(InMemoryWalletRepository::new());
    let balances = Arc::new(balances);
    let blockchain = Arc::new(blockchain);

    let state = AppState::new(
        repository.clone(),
        repository.clone(),
        Arc::new(Bip32KeyDerivationService::new()),
        balances.clone(),
        blockchain.clone(),
    );

    TestContext {
        state,
        repository,
        balances,
        blockchain,
    }
}
