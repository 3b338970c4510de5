//! 链上地址值对象
//!
//! 按网络分别校验格式：
//! - Ethereum: 0x + 40 位十六进制，大小写混合时必须满足 EIP-55
//! - Bitcoin: 主网地址（由 bitcoin crate 解析）
//! - Solana: Base58 解码后恰好 32 字节

use std::fmt;

use bitcoin::address::NetworkUnchecked;
use sha3::{Digest, Keccak256};

use crate::{
    domain::network::NetworkType,
    error::{Result, WalletError},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    value: String,
    network: NetworkType,
}

impl Address {
    /// 按网络校验并构造地址
    pub fn parse(value: &str, network: NetworkType) -> Result<Self> {
        let value = value.trim();
        let valid = match network {
            NetworkType::Ethereum => is_valid_evm_address(value),
            NetworkType::Bitcoin => is_valid_bitcoin_address(value),
            NetworkType::Solana => is_valid_solana_address(value),
        };

        if !valid {
            return Err(WalletError::InvalidAddress(format!(
                "{} is not a valid {} address",
                value,
                network.name()
            )));
        }

        Ok(Self {
            value: value.to_string(),
            network,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// 不区分大小写比较（账户查找使用）
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// 将 20 字节地址编码为 EIP-55 校验和格式
pub fn to_eip55_checksum(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        if ch.is_ascii_alphabetic() && hash_nibble(&hash, i) >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn hash_nibble(hash: &[u8], i: usize) -> u8 {
    let byte = hash[i / 2];
    if i % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}

fn is_valid_evm_address(address: &str) -> bool {
    let Some(hex_part) = address.strip_prefix("0x") else {
        return false;
    };
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        return verify_eip55_checksum(hex_part);
    }

    true
}

/// https://eips.ethereum.org/EIPS/eip-55
fn verify_eip55_checksum(hex_part: &str) -> bool {
    let hash = Keccak256::digest(hex_part.to_lowercase().as_bytes());

    hex_part.chars().enumerate().all(|(i, ch)| {
        if !ch.is_ascii_alphabetic() {
            return true;
        }
        let should_be_uppercase = hash_nibble(&hash, i) >= 8;
        ch.is_ascii_uppercase() == should_be_uppercase
    })
}

fn is_valid_bitcoin_address(address: &str) -> bool {
    address
        .parse::<bitcoin::Address<NetworkUnchecked>>()
        .map(|unchecked| unchecked.require_network(bitcoin::Network::Bitcoin).is_ok())
        .unwrap_or(false)
}

fn is_valid_solana_address(address: &str) -> bool {
    if address.len() < 32 || address.len() > 44 {
        return false;
    }

    match bs58::decode(address).into_vec() {
        Ok(decoded) => decoded.len() == 32,
        Err(_) => false,
    }
}
