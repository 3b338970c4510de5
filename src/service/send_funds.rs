//! 转账
//!
//! 私钥按需派生，只活到本次调用结束；本用例不修改任何本地状态

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{cancellation::run_cancellable, derive_blocking, load_wallet};
use crate::{
    domain::{
        derivation::address_from_private_key, Address, Balance, BlockchainService,
        KeyDerivationService, NetworkType, Transaction,
    },
    error::{Result, WalletError},
    repository::WalletRepository,
};

pub struct SendFundsUseCase {
    repository: Arc<dyn WalletRepository>,
    blockchain: Arc<dyn BlockchainService>,
    derivation: Arc<dyn KeyDerivationService>,
}

impl SendFundsUseCase {
    pub fn new(
        repository: Arc<dyn WalletRepository>,
        blockchain: Arc<dyn BlockchainService>,
        derivation: Arc<dyn KeyDerivationService>,
    ) -> Self {
        Self {
            repository,
            blockchain,
            derivation,
        }
    }

    pub async fn execute(
        &self,
        wallet_id: &str,
        from: &Address,
        to: &Address,
        amount: Balance,
        network: NetworkType,
        cancel: &CancellationToken,
    ) -> Result<Transaction> {
        if to.network() != network {
            return Err(WalletError::InvalidAddress(format!(
                "{} is not a {} address",
                to,
                network.name()
            )));
        }
        if amount.is_zero() {
            return Err(WalletError::InvalidBalance(
                "transfer amount must be greater than zero".to_string(),
            ));
        }

        let wallet = load_wallet(self.repository.as_ref(), wallet_id, cancel).await?;

        let account = wallet
            .account_by_address(from.as_str())
            .filter(|a| a.network() == network)
            .ok_or_else(|| WalletError::AccountNotFound(from.to_string()))?;

        let private_key = {
            let derivation = self.derivation.clone();
            let seed = wallet.seed_phrase().clone();
            let path = account.derivation_path().to_string();
            derive_blocking(move || derivation.derive_private_key(&seed, &path)).await?
        };

        // 存储的路径必须能派生回该账户地址，否则会用别的账户签名
        let signer = address_from_private_key(&private_key, network)?;
        if !account.address().eq_ignore_case(signer.as_str()) {
            return Err(WalletError::DerivationError(format!(
                "path {} does not derive account {}",
                account.derivation_path(),
                account.address()
            )));
        }

        let transaction = run_cancellable(
            cancel,
            self.blockchain.transfer(network, &private_key, to, amount),
        )
        .await?;
        drop(private_key);

        info!(
            wallet_id = %wallet_id,
            %network,
            tx_id = %transaction.id,
            status = %transaction.status,
            "funds sent"
        );
        Ok(transaction)
    }
}
