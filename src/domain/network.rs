//! 网络类型与 coin type 策略
//!
//! 支持的网络是封闭集合，新增链只需扩展枚举与各处的穷尽匹配

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// 支持的网络
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    #[serde(rename = "ETH")]
    Ethereum,
    #[serde(rename = "BTC")]
    Bitcoin,
    #[serde(rename = "SOL")]
    Solana,
}

/// 加密曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// secp256k1 曲线 (Ethereum, Bitcoin)
    Secp256k1,
    /// ed25519 曲线 (Solana)
    Ed25519,
}

/// 地址编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// 十六进制 0x... (EIP-55)
    Hex,
    /// Bech32 编码 (P2WPKH native segwit)
    Bech32,
    /// Base58 编码 (Solana)
    SolanaBase58,
}

impl NetworkType {
    pub const ALL: [NetworkType; 3] = [Self::Ethereum, Self::Bitcoin, Self::Solana];

    /// 链符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ethereum => "ETH",
            Self::Bitcoin => "BTC",
            Self::Solana => "SOL",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Bitcoin => "Bitcoin",
            Self::Solana => "Solana",
        }
    }

    pub fn curve_type(&self) -> CurveType {
        match self {
            Self::Ethereum | Self::Bitcoin => CurveType::Secp256k1,
            Self::Solana => CurveType::Ed25519,
        }
    }

    pub fn address_format(&self) -> AddressFormat {
        match self {
            Self::Ethereum => AddressFormat::Hex,
            Self::Bitcoin => AddressFormat::Bech32,
            Self::Solana => AddressFormat::SolanaBase58,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for NetworkType {
    type Err = WalletError;

    /// 接受链符号或全名（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eth" | "ethereum" => Ok(Self::Ethereum),
            "btc" | "bitcoin" => Ok(Self::Bitcoin),
            "sol" | "solana" => Ok(Self::Solana),
            other => Err(WalletError::UnsupportedNetwork(other.to_string())),
        }
    }
}

/// BIP44 coin type 策略
pub struct CoinTypePolicy;

impl CoinTypePolicy {
    /// SLIP-44 coin type
    pub fn coin_type_for(network: NetworkType) -> u32 {
        match network {
            NetworkType::Bitcoin => 0,
            NetworkType::Ethereum => 60,
            NetworkType::Solana => 501,
        }
    }

    /// 账户派生路径: m/44'/coin_type'/0'/0/index
    pub fn account_path(network: NetworkType, index: u32) -> String {
        format!("m/44'/{}'/0'/0/{}", Self::coin_type_for(network), index)
    }
}
