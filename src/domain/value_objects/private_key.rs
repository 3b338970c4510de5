//! 私钥值对象
//!
//! 只在单次签名调用期间存在：不可 Clone、不可序列化，Drop 时清零

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{Result, WalletError};

pub struct PrivateKey {
    bytes: Zeroizing<[u8; 32]>,
}

impl PrivateKey {
    pub fn from_bytes(bytes: Zeroizing<[u8; 32]>) -> Self {
        Self { bytes }
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != 32 {
            return Err(WalletError::DerivationError(format!(
                "private key must be 32 bytes, got {}",
                slice.len()
            )));
        }
        let mut bytes = Zeroizing::new([0u8; 32]);
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// 解析十六进制私钥（可带 0x 前缀）
    pub fn from_hex(value: &str) -> Result<Self> {
        let hex_part = value.strip_prefix("0x").unwrap_or(value);
        let decoded = Zeroizing::new(
            hex::decode(hex_part)
                .map_err(|e| WalletError::DerivationError(format!("invalid key hex: {}", e)))?,
        );
        Self::from_slice(&decoded)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(&self.bytes[..])))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(***REDACTED***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";

    #[test]
    fn test_hex_roundtrip() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(key.to_hex().as_str(), KEY_HEX);
        assert_eq!(key.as_bytes()[0], 0x1a);

        let no_prefix = PrivateKey::from_hex(&KEY_HEX[2..]).unwrap();
        assert_eq!(no_prefix.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(PrivateKey::from_hex("0xdeadbeef").is_err());
        assert!(PrivateKey::from_slice(&[0u8; 31]).is_err());
        assert!(PrivateKey::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(format!("{:?}", key), "PrivateKey(***REDACTED***)");
    }
}
