//! 远程余额查询：GET {base}/balance/{network}/{address}

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{build_client, normalize_base_url};
use crate::{
    config::BackendConfig,
    domain::{Address, Balance, BalanceService, NetworkType},
    error::{Result, WalletError},
};

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

pub struct RestBalanceService {
    http_client: reqwest::Client,
    base_url: String,
}

impl RestBalanceService {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?, &config.base_url))
    }

    fn balance_url(&self, address: &Address, network: NetworkType) -> String {
        format!(
            "{}/balance/{}/{}",
            self.base_url,
            network.symbol().to_lowercase(),
            address
        )
    }
}

#[async_trait]
impl BalanceService for RestBalanceService {
    async fn fetch_remote_balance(
        &self,
        address: &Address,
        network: NetworkType,
    ) -> Result<Balance> {
        let url = self.balance_url(address, network);
        debug!(%network, %address, "fetching balance");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| WalletError::BalanceUnavailable(format!("{}: {}", address, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%network, %address, %status, "balance request failed");
            return Err(WalletError::BalanceUnavailable(format!(
                "{}: backend returned {}",
                address, status
            )));
        }

        let body: BalanceResponse = response
            .json()
            .await
            .map_err(|e| WalletError::BalanceUnavailable(format!("{}: {}", address, e)))?;

        Balance::new(body.amount)
            .map_err(|e| WalletError::BalanceUnavailable(format!("{}: {}", address, e)))
    }
}
