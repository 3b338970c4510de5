pub mod blockchain_client;
pub mod encryption;
pub mod http;
pub mod logging;
pub mod rest_balance_service;

pub use blockchain_client::{RestBlockchainService, TransactionMapper};
pub use encryption::EncryptionKey;
pub use rest_balance_service::RestBalanceService;
