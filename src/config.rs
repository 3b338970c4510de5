//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 本地存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    /// 保存助记词加密密钥的环境变量名
    pub seed_key_env: String,
}

/// 远程余额/广播服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::var("IRONVAULT_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            seed_key_env: "WALLET_ENC_KEY".into(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("IRONVAULT_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8080/v1".into()),
            request_timeout_secs: std::env::var("IRONVAULT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            connect_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            storage: StorageConfig::default(),
            backend: BackendConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            anyhow::bail!("IRONVAULT_BACKEND_URL must start with http:// or https://");
        }

        if self.backend.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.storage.data_dir.trim().is_empty() {
            anyhow::bail!("IRONVAULT_DATA_DIR must not be empty");
        }

        if self.storage.seed_key_env.trim().is_empty() {
            anyhow::bail!("seed_key_env must name an environment variable");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[storage]
data_dir = "/var/lib/ironvault"
seed_key_env = "IRONVAULT_SEED_KEY"

[backend]
base_url = "https://wallet.example.com/v1"
request_timeout_secs = 5
connect_timeout_secs = 2

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/ironvault");
        assert_eq!(config.storage.seed_key_env, "IRONVAULT_SEED_KEY");
        assert_eq!(config.backend.request_timeout_secs, 5);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "http://127.0.0.1:9000"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.backend.connect_timeout_secs, 10);
        assert_eq!(config.storage.seed_key_env, "WALLET_ENC_KEY");
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let config =
            Config::from_env_and_file(Some("/nonexistent/ironvault.toml")).unwrap();
        assert_eq!(config.storage.seed_key_env, "WALLET_ENC_KEY");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.backend.base_url = "http://localhost:8080/v1".into();
        config.logging.level = "info".into();
        config.logging.format = "text".into();
        assert!(config.validate().is_ok());

        config.backend.base_url = "ftp://localhost".into();
        assert!(config.validate().is_err());

        config.backend.base_url = "http://localhost".into();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nbase_url = ").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
