//! 账户实体
//!
//! 一个派生地址及其元数据，只归属于一个钱包

use crate::{
    domain::{
        network::NetworkType,
        value_objects::{Address, Balance},
    },
    error::{Result, WalletError},
};

/// 账户标签最大字符数
pub const MAX_LABEL_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    address: Address,
    balance: Balance,
    derivation_path: String,
    label: Option<String>,
    network: NetworkType,
}

impl Account {
    /// 新建账户，余额为零
    pub fn new(
        address: Address,
        derivation_path: impl Into<String>,
        label: Option<String>,
        network: NetworkType,
    ) -> Result<Self> {
        Self::restore(address, Balance::zero(), derivation_path, label, network)
    }

    /// 从持久化数据重建
    pub fn restore(
        address: Address,
        balance: Balance,
        derivation_path: impl Into<String>,
        label: Option<String>,
        network: NetworkType,
    ) -> Result<Self> {
        let label = normalize_label(label)?;
        Ok(Self {
            address,
            balance,
            derivation_path: derivation_path.into(),
            label,
            network,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn update_balance(&mut self, balance: Balance) {
        self.balance = balance;
    }

    /// 修改标签，超过 20 个字符时拒绝
    pub fn rename(&mut self, label: impl Into<String>) -> Result<()> {
        self.label = normalize_label(Some(label.into()))?;
        Ok(())
    }
}

/// 空标签视为未设置
pub fn normalize_label(label: Option<String>) -> Result<Option<String>> {
    match label {
        None => Ok(None),
        Some(l) if l.trim().is_empty() => Ok(None),
        Some(l) => {
            let len = l.chars().count();
            if len > MAX_LABEL_LEN {
                return Err(WalletError::LabelTooLong {
                    len,
                    max: MAX_LABEL_LEN,
                });
            }
            Ok(Some(l))
        }
    }
}
