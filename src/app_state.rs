use std::sync::Arc;

use crate::{
    config::Config,
    domain::{BalanceService, Bip32KeyDerivationService, BlockchainService, KeyDerivationService},
    error::Result,
    infrastructure::{RestBalanceService, RestBlockchainService},
    repository::{CurrentWalletProvider, FileWalletRepository, WalletRepository},
    service::{
        CreateAccountUseCase, GetAccountsUseCase, GetSeedPhraseUseCase, ImportWalletUseCase,
        InitializeWalletUseCase, RefreshWalletBalancesUseCase, RenameAccountUseCase,
        SendFundsUseCase, WalletLocks,
    },
};

/// 应用状态
/// 包含所有共享协作方，按需构造用例
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn WalletRepository>,
    pub current_wallet: Arc<dyn CurrentWalletProvider>,
    pub derivation: Arc<dyn KeyDerivationService>,
    pub balances: Arc<dyn BalanceService>,
    pub blockchain: Arc<dyn BlockchainService>,
    pub locks: WalletLocks,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn WalletRepository>,
        current_wallet: Arc<dyn CurrentWalletProvider>,
        derivation: Arc<dyn KeyDerivationService>,
        balances: Arc<dyn BalanceService>,
        blockchain: Arc<dyn BlockchainService>,
    ) -> Self {
        Self {
            repository,
            current_wallet,
            derivation,
            balances,
            blockchain,
            locks: WalletLocks::new(),
        }
    }

    /// 文件存储 + REST 后端
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(FileWalletRepository::from_config(&config.storage)?);
        let balances = Arc::new(RestBalanceService::from_config(&config.backend)?);
        let blockchain = Arc::new(RestBlockchainService::from_config(&config.backend)?);

        Ok(Self::new(
            store.clone(),
            store,
            Arc::new(Bip32KeyDerivationService::new()),
            balances,
            blockchain,
        ))
    }

    pub fn initialize_wallet(&self) -> InitializeWalletUseCase {
        InitializeWalletUseCase::new(self.repository.clone(), self.current_wallet.clone())
    }

    pub fn import_wallet(&self) -> ImportWalletUseCase {
        ImportWalletUseCase::new(self.repository.clone())
    }

    pub fn create_account(&self) -> CreateAccountUseCase {
        CreateAccountUseCase::new(
            self.repository.clone(),
            self.derivation.clone(),
            self.locks.clone(),
        )
    }

    pub fn send_funds(&self) -> SendFundsUseCase {
        SendFundsUseCase::new(
            self.repository.clone(),
            self.blockchain.clone(),
            self.derivation.clone(),
        )
    }

    pub fn refresh_balances(&self) -> RefreshWalletBalancesUseCase {
        RefreshWalletBalancesUseCase::new(self.repository.clone(), self.balances.clone())
    }

    pub fn get_seed_phrase(&self) -> GetSeedPhraseUseCase {
        GetSeedPhraseUseCase::new(self.repository.clone())
    }

    pub fn get_accounts(&self) -> GetAccountsUseCase {
        GetAccountsUseCase::new(self.repository.clone())
    }

    pub fn rename_account(&self) -> RenameAccountUseCase {
        RenameAccountUseCase::new(self.repository.clone(), self.locks.clone())
    }
}
