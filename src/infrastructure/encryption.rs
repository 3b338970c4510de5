//! AES-256-GCM 加密/解密模块
//! 用于助记词落盘加密

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, WalletError};

const NONCE_LEN: usize = 12;

/// 加密数据
///
/// # Returns
/// 返回加密后的数据（nonce + ciphertext）
pub fn encrypt_data(data: &[u8], key: &EncryptionKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| WalletError::PersistenceError(format!("invalid key: {}", e)))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, data)
        .map_err(|e| WalletError::PersistenceError(format!("encryption failed: {}", e)))?;

    // 将 nonce (12字节) 和 ciphertext 组合
    let mut result = nonce.to_vec();
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// 解密数据（nonce + ciphertext）
pub fn decrypt_data(encrypted: &[u8], key: &EncryptionKey) -> Result<Zeroizing<Vec<u8>>> {
    if encrypted.len() < NONCE_LEN {
        return Err(WalletError::PersistenceError(
            "encrypted data too short".to_string(),
        ));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| WalletError::PersistenceError(format!("invalid key: {}", e)))?;

    let nonce = Nonce::from_slice(&encrypted[..NONCE_LEN]);
    let ciphertext = &encrypted[NONCE_LEN..];

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| WalletError::PersistenceError(format!("decryption failed: {}", e)))?;

    Ok(Zeroizing::new(plaintext))
}

/// 加密密钥（使用Zeroize保护）
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    key: [u8; 32],
}

impl EncryptionKey {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.key
    }

    /// 从口令构造密钥
    ///
    /// 支持三种格式：64 位十六进制、32 字节原文、≥16 字节口令（SHA-256）
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(WalletError::Config("encryption key is empty".to_string()));
        }

        let mut key = [0u8; 32];
        if secret.len() == 64 {
            let decoded = Zeroizing::new(
                hex::decode(secret)
                    .map_err(|e| WalletError::Config(format!("invalid hex key: {}", e)))?,
            );
            key.copy_from_slice(&decoded);
        } else if secret.len() == 32 {
            key.copy_from_slice(secret.as_bytes());
        } else if secret.len() >= 16 {
            let digest = Sha256::digest(secret.as_bytes());
            key.copy_from_slice(&digest);
        } else {
            return Err(WalletError::Config(
                "encryption key too short (min 16)".to_string(),
            ));
        }

        Ok(Self { key })
    }

    /// 从环境变量获取加密密钥
    pub fn from_env(var: &str) -> Result<Self> {
        let secret = Zeroizing::new(
            std::env::var(var)
                .map_err(|_| WalletError::Config(format!("{} environment variable not set", var)))?,
        );
        Self::from_secret(&secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EncryptionKey {
        EncryptionKey::from_secret("01234567890123456789012345678901").unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let data = b"abandon abandon about";

        let encrypted = encrypt_data(data, &key()).unwrap();
        assert_ne!(&encrypted[NONCE_LEN..], data);

        let decrypted = decrypt_data(&encrypted, &key()).unwrap();
        assert_eq!(decrypted.as_slice(), data);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt_data(b"secret", &key()).unwrap();
        let other = EncryptionKey::from_secret("another-passphrase-value").unwrap();
        assert!(matches!(
            decrypt_data(&encrypted, &other),
            Err(WalletError::PersistenceError(_))
        ));
        assert!(decrypt_data(&[0u8; 4], &key()).is_err());
    }

    #[test]
    fn test_key_formats() {
        let hex_key = "11".repeat(32);
        assert_eq!(EncryptionKey::from_secret(&hex_key).unwrap().as_slice(), &[0x11u8; 32]);
        assert!(EncryptionKey::from_secret("short").is_err());
        assert!(EncryptionKey::from_secret("").is_err());
        assert!(EncryptionKey::from_secret(&"zz".repeat(32)).is_err());
    }
}
