//! IronVault - 自托管多链钱包核心
//!
//! 一份助记词确定性派生 Ethereum / Bitcoin / Solana 账户；
//! 私钥只在签名调用期间存在，从不落盘

pub mod app_state;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repository;
pub mod service;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{Result, WalletError};

pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{
            Account, Address, Balance, Bip32KeyDerivationService, CoinTypePolicy,
            KeyDerivationService, NetworkType, PrivateKey, SeedPhrase, Transaction,
            TransactionStatus, Wallet, WalletFactory,
        },
        error::{Result, WalletError},
        repository::{CurrentWalletProvider, WalletRepository},
    };
}
