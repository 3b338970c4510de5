//! 共享 HTTP 客户端

use std::time::Duration;

use crate::{
    config::BackendConfig,
    error::{Result, WalletError},
};

/// 按后端配置构建 reqwest 客户端
pub fn build_client(config: &BackendConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| WalletError::Config(format!("failed to build http client: {}", e)))
}

/// 去掉末尾的 `/`，便于拼接路径
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
