//! Domain 模块
//!
//! 值对象、实体、聚合根与派生逻辑

pub mod account;
pub mod derivation;
pub mod derivation_path;
pub mod network;
pub mod services;
pub mod transaction;
pub mod value_objects;
pub mod wallet;
pub mod wallet_factory;

// 重新导出常用类型
pub use account::Account;
pub use derivation::{Bip32KeyDerivationService, KeyDerivationService};
pub use derivation_path::DerivationPathValidator;
pub use network::{AddressFormat, CoinTypePolicy, CurveType, NetworkType};
pub use services::{BalanceService, BlockchainService};
pub use transaction::{Transaction, TransactionStatus};
pub use value_objects::{Address, Balance, PrivateKey, SeedPhrase, WordCount};
pub use wallet::Wallet;
pub use wallet_factory::WalletFactory;
