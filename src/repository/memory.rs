//! 内存实现（测试与嵌入式场景）

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    mapper::{WalletMapper, WalletRecord},
    wallet_repository::{CurrentWalletProvider, WalletRepository},
};
use crate::{
    domain::{SeedPhrase, Wallet},
    error::{Result, WalletError},
};

#[derive(Default)]
pub struct InMemoryWalletRepository {
    records: RwLock<HashMap<String, WalletRecord>>,
    seeds: RwLock<HashMap<String, SeedPhrase>>,
    current: RwLock<Option<String>>,
}

impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl WalletRepository for InMemoryWalletRepository {
    async fn save(&self, wallet: &Wallet) -> Result<()> {
        let record = WalletMapper::to_persistence(wallet);
        self.seeds
            .write()
            .await
            .insert(wallet.id().to_string(), wallet.seed_phrase().clone());
        self.records
            .write()
            .await
            .insert(wallet.id().to_string(), record);
        Ok(())
    }

    async fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>> {
        let Some(record) = self.records.read().await.get(wallet_id).cloned() else {
            return Ok(None);
        };
        let seed = self
            .seeds
            .read()
            .await
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| {
                WalletError::PersistenceError(format!("seed missing for wallet {}", wallet_id))
            })?;

        WalletMapper::to_domain(record, seed).map(Some)
    }
}

#[async_trait]
impl CurrentWalletProvider for InMemoryWalletRepository {
    async fn current_wallet_id(&self) -> Result<Option<String>> {
        Ok(self.current.read().await.clone())
    }

    async fn set_current_wallet_id(&self, wallet_id: &str) -> Result<()> {
        *self.current.write().await = Some(wallet_id.to_string());
        Ok(())
    }
}
