//! 值对象：构造即校验，构造后不可变

pub mod address;
pub mod balance;
pub mod private_key;
pub mod seed_phrase;

pub use address::Address;
pub use balance::Balance;
pub use private_key::PrivateKey;
pub use seed_phrase::{SeedPhrase, WordCount};
