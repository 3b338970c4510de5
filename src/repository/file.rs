//! 文件系统实现
//!
//! 目录结构：
//! - `<data_dir>/wallets/<id>.json`  钱包元数据
//! - `<data_dir>/secrets/<id>.seed`  AES-256-GCM 加密的助记词（unix 下权限 0600）
//! - `<data_dir>/current_wallet`     当前钱包 id

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::{
    mapper::{WalletMapper, WalletRecord},
    wallet_repository::{CurrentWalletProvider, WalletRepository},
};
use crate::{
    config::StorageConfig,
    domain::{SeedPhrase, Wallet},
    error::{Result, WalletError},
    infrastructure::encryption::{decrypt_data, encrypt_data, EncryptionKey},
};

pub struct FileWalletRepository {
    data_dir: PathBuf,
    key: EncryptionKey,
}

impl FileWalletRepository {
    pub fn new(data_dir: impl Into<PathBuf>, key: EncryptionKey) -> Self {
        Self {
            data_dir: data_dir.into(),
            key,
        }
    }

    /// 加密密钥从配置指定的环境变量读取
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let key = EncryptionKey::from_env(&config.seed_key_env)?;
        Ok(Self::new(&config.data_dir, key))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn wallet_path(&self, wallet_id: &str) -> PathBuf {
        self.data_dir
            .join("wallets")
            .join(format!("{}.json", wallet_id))
    }

    fn seed_path(&self, wallet_id: &str) -> PathBuf {
        self.data_dir
            .join("secrets")
            .join(format!("{}.seed", wallet_id))
    }

    fn current_path(&self) -> PathBuf {
        self.data_dir.join("current_wallet")
    }
}

/// id 会成为文件名，只允许字母、数字、`-`、`_`
fn check_wallet_id(wallet_id: &str) -> Result<()> {
    let valid = !wallet_id.is_empty()
        && wallet_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(WalletError::PersistenceError(format!(
            "invalid wallet id: {:?}",
            wallet_id
        )))
    }
}

/// 先写临时文件再 rename，避免半写状态
async fn write_atomic(path: &Path, bytes: &[u8], secret: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("tmp");
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    restrict_permissions(&mut options, secret);

    let mut file = options.open(&tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(options: &mut fs::OpenOptions, secret: bool) {
    if secret {
        options.mode(0o600);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_options: &mut fs::OpenOptions, _secret: bool) {}

async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl WalletRepository for FileWalletRepository {
    async fn save(&self, wallet: &Wallet) -> Result<()> {
        check_wallet_id(wallet.id())?;

        // 先写助记词，元数据存在即意味着助记词已落盘
        let sealed = encrypt_data(wallet.seed_phrase().value().as_bytes(), &self.key)?;
        write_atomic(&self.seed_path(wallet.id()), &sealed, true).await?;

        let record = WalletMapper::to_persistence(wallet);
        let json = serde_json::to_vec_pretty(&record)?;
        write_atomic(&self.wallet_path(wallet.id()), &json, false).await?;

        debug!(wallet_id = %wallet.id(), accounts = record.accounts.len(), "wallet saved");
        Ok(())
    }

    async fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>> {
        check_wallet_id(wallet_id)?;

        let Some(json) = read_optional(&self.wallet_path(wallet_id)).await? else {
            return Ok(None);
        };
        let record: WalletRecord = serde_json::from_slice(&json)?;

        let sealed = read_optional(&self.seed_path(wallet_id))
            .await?
            .ok_or_else(|| {
                WalletError::PersistenceError(format!("seed missing for wallet {}", wallet_id))
            })?;
        let plain = decrypt_data(&sealed, &self.key)?;
        let phrase = std::str::from_utf8(&plain)
            .map_err(|_| WalletError::PersistenceError("seed is not valid utf-8".to_string()))?;
        let seed = SeedPhrase::new(phrase).map_err(|e| {
            WalletError::PersistenceError(format!("stored seed is invalid: {}", e.code()))
        })?;

        WalletMapper::to_domain(record, seed).map(Some)
    }
}

#[async_trait]
impl CurrentWalletProvider for FileWalletRepository {
    async fn current_wallet_id(&self) -> Result<Option<String>> {
        let Some(bytes) = read_optional(&self.current_path()).await? else {
            return Ok(None);
        };
        let id = String::from_utf8_lossy(&bytes).trim().to_string();
        Ok(if id.is_empty() { None } else { Some(id) })
    }

    async fn set_current_wallet_id(&self, wallet_id: &str) -> Result<()> {
        check_wallet_id(wallet_id)?;
        write_atomic(&self.current_path(), wallet_id.as_bytes(), false).await
    }
}
