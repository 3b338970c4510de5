// Repository 抽象层
pub mod file;
pub mod mapper;
pub mod memory;
pub mod wallet_repository;

pub use file::FileWalletRepository;
pub use mapper::{AccountRecord, WalletMapper, WalletRecord};
pub use memory::InMemoryWalletRepository;
pub use wallet_repository::{CurrentWalletProvider, WalletRepository};
