use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::domain::{Account, Balance, NetworkType};

/// IronVault 命令行
#[derive(Debug, Parser)]
#[command(name = "ironvault", about = "Self-custodial multi-chain wallet", version)]
pub struct Cli {
    /// TOML 配置文件（未指定时读取 CONFIG_PATH）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 操作的钱包 id（默认当前钱包）
    #[arg(long, global = true)]
    pub wallet: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 返回当前钱包，没有则新建
    Init,
    /// 导入助记词（省略时从 stdin 读取）
    Import {
        mnemonic: Option<String>,
    },
    CreateAccount {
        #[arg(long)]
        network: NetworkType,
        #[arg(long)]
        label: Option<String>,
    },
    Accounts,
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Balance,
        #[arg(long)]
        network: NetworkType,
    },
    Refresh,
    /// 一次性显示助记词
    Backup,
    Rename {
        #[arg(long)]
        address: String,
        #[arg(long)]
        label: String,
    },
}

/// 账户输出格式
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub address: String,
    pub network: NetworkType,
    pub derivation_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub balance: Balance,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            address: account.address().to_string(),
            network: account.network(),
            derivation_path: account.derivation_path().to_string(),
            label: account.label().map(str::to_string),
            balance: account.balance(),
        }
    }
}
