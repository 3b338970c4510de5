//! 钱包工厂：生成 id 与新熵

use uuid::Uuid;

use crate::{
    domain::{
        value_objects::{SeedPhrase, WordCount},
        wallet::Wallet,
    },
    error::Result,
};

pub struct WalletFactory;

impl WalletFactory {
    /// 新钱包：随机 12 词助记词
    pub fn create_new() -> Result<Wallet> {
        let seed = SeedPhrase::generate(WordCount::Twelve)?;
        Ok(Self::with_seed(seed))
    }

    /// 导入已有助记词，分配新 id
    pub fn with_seed(seed: SeedPhrase) -> Wallet {
        Wallet::new(Self::new_id(), seed)
    }

    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}
