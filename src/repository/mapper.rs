//! 领域对象 ⇄ 持久化记录
//!
//! 余额不落盘，重建时归零；地址与路径在重建时重新校验

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Account, Address, DerivationPathValidator, NetworkType, SeedPhrase, Wallet},
    error::Result,
};

/// 钱包元数据记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: String,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub address: String,
    pub derivation_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub network: NetworkType,
}

pub struct WalletMapper;

impl WalletMapper {
    pub fn to_persistence(wallet: &Wallet) -> WalletRecord {
        WalletRecord {
            id: wallet.id().to_string(),
            accounts: wallet
                .accounts()
                .iter()
                .map(|account| AccountRecord {
                    address: account.address().to_string(),
                    derivation_path: account.derivation_path().to_string(),
                    label: account.label().map(str::to_string),
                    network: account.network(),
                })
                .collect(),
        }
    }

    pub fn to_domain(record: WalletRecord, seed: SeedPhrase) -> Result<Wallet> {
        let accounts = record
            .accounts
            .into_iter()
            .map(Self::account_to_domain)
            .collect::<Result<Vec<_>>>()?;

        Ok(Wallet::with_accounts(record.id, seed, accounts))
    }

    fn account_to_domain(record: AccountRecord) -> Result<Account> {
        let address = Address::parse(&record.address, record.network)?;
        // 路径决定签名私钥，必须是该网络的账户路径
        DerivationPathValidator::validate_for_network(record.network, &record.derivation_path)?;
        Account::new(address, record.derivation_path, record.label, record.network)
    }
}
