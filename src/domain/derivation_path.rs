//! BIP44 派生路径校验
//!
//! 账户路径统一形如 m/44'/coin_type'/0'/0/address_index

use crate::{
    domain::network::{CoinTypePolicy, NetworkType},
    error::{Result, WalletError},
};

/// BIP32 硬化索引起点
const HARDENED_OFFSET: u32 = 0x8000_0000;
/// BIP32 序列化格式中 depth 只有 1 字节
const MAX_DEPTH: usize = 255;

/// 单个路径段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathComponent {
    pub index: u32,
    pub hardened: bool,
}

/// 派生路径验证器
pub struct DerivationPathValidator;

impl DerivationPathValidator {
    /// 解析路径为段列表
    ///
    /// 规则：必须以 `m/` 开头，每段是 u32（< 2^31），可带 `'` 表示硬化
    pub fn parse(path: &str) -> Result<Vec<PathComponent>> {
        let rest = path.strip_prefix("m/").ok_or_else(|| {
            WalletError::DerivationError(format!("path must start with 'm/': {}", path))
        })?;

        let components = rest
            .split('/')
            .map(|segment| parse_segment(segment, path))
            .collect::<Result<Vec<_>>>()?;

        if components.len() > MAX_DEPTH {
            return Err(WalletError::DerivationError(format!(
                "path is deeper than {} levels",
                MAX_DEPTH
            )));
        }

        Ok(components)
    }

    /// 仅做语法校验
    pub fn validate(path: &str) -> Result<()> {
        Self::parse(path).map(|_| ())
    }

    /// 校验路径是该网络的 BIP44 账户路径：m/44'/coin_type'/0'/0/index
    pub fn validate_for_network(network: NetworkType, path: &str) -> Result<()> {
        let components = Self::parse(path)?;

        let expected_prefix = [
            PathComponent {
                index: 44,
                hardened: true,
            },
            PathComponent {
                index: CoinTypePolicy::coin_type_for(network),
                hardened: true,
            },
            PathComponent {
                index: 0,
                hardened: true,
            },
            PathComponent {
                index: 0,
                hardened: false,
            },
        ];

        let matches = components.len() == 5
            && components[..4] == expected_prefix
            && !components[4].hardened;
        if !matches {
            return Err(WalletError::DerivationError(format!(
                "{} is not a {} account path",
                path,
                network.name()
            )));
        }
        Ok(())
    }
}

fn parse_segment(segment: &str, path: &str) -> Result<PathComponent> {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(d) => (d, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(WalletError::DerivationError(format!(
            "invalid path segment '{}' in {}",
            segment, path
        )));
    }

    let index = digits.parse::<u32>().ok().filter(|i| *i < HARDENED_OFFSET).ok_or_else(|| {
        WalletError::DerivationError(format!("path index out of range '{}' in {}", segment, path))
    })?;

    Ok(PathComponent { index, hardened })
}
