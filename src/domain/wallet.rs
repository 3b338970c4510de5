//! 钱包聚合根
//!
//! 持有助记词与账户集合；同一钱包内地址不重复，账户只能经由钱包访问

use crate::{
    domain::{account::Account, network::NetworkType, value_objects::SeedPhrase},
    error::{Result, WalletError},
};

#[derive(Debug, Clone)]
pub struct Wallet {
    id: String,
    seed_phrase: SeedPhrase,
    accounts: Vec<Account>,
}

impl Wallet {
    pub fn new(id: impl Into<String>, seed_phrase: SeedPhrase) -> Self {
        Self::with_accounts(id, seed_phrase, Vec::new())
    }

    /// 从持久化数据重建，重复地址只保留第一条
    pub fn with_accounts(
        id: impl Into<String>,
        seed_phrase: SeedPhrase,
        accounts: Vec<Account>,
    ) -> Self {
        let mut wallet = Self {
            id: id.into(),
            seed_phrase,
            accounts: Vec::with_capacity(accounts.len()),
        };
        for account in accounts {
            wallet.add_account(account);
        }
        wallet
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 助记词仅供派生与备份展示使用
    pub fn seed_phrase(&self) -> &SeedPhrase {
        &self.seed_phrase
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn accounts_on(&self, network: NetworkType) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |a| a.network() == network)
    }

    /// 该网络下一个派生索引
    pub fn next_index(&self, network: NetworkType) -> u32 {
        self.accounts_on(network).count() as u32
    }

    /// 添加账户；地址已存在时忽略并返回 false
    pub fn add_account(&mut self, account: Account) -> bool {
        if self
            .accounts
            .iter()
            .any(|a| a.address().as_str() == account.address().as_str())
        {
            return false;
        }
        self.accounts.push(account);
        true
    }

    /// 按地址替换账户
    pub fn update_account(&mut self, account: Account) -> Result<()> {
        let slot = self
            .accounts
            .iter_mut()
            .find(|a| a.address().as_str() == account.address().as_str())
            .ok_or_else(|| WalletError::AccountNotFound(account.address().to_string()))?;
        *slot = account;
        Ok(())
    }

    /// 按地址查找（不区分大小写）
    pub fn account_by_address(&self, address: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.address().eq_ignore_case(address))
    }

    pub fn account_by_address_mut(&mut self, address: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.address().eq_ignore_case(address))
    }
}
