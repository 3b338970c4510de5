// 转账签名与广播客户端
// 按链签名后 POST 到后端 {base}/transactions/transfer

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::http::{build_client, normalize_base_url};
use crate::{
    config::BackendConfig,
    domain::{
        derivation::address_from_private_key, Address, Balance, BlockchainService, NetworkType,
        PrivateKey, Transaction, TransactionStatus,
    },
    error::{Result, WalletError},
};

/// 被签名的消息体
#[derive(Debug, Clone, Serialize)]
pub struct TransferMessage {
    pub to: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub network: NetworkType,
    pub nonce: i64,
}

/// 广播请求
#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub network: NetworkType,
    pub signature: String,
}

/// 后端返回的交易（字段均可缺省）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub network: Option<String>,
}

pub struct TransactionMapper;

impl TransactionMapper {
    /// 后端响应 → 领域交易记录
    ///
    /// 只在 2xx 之后调用：后端已接受转账，这里不再返回错误。
    /// id 取 txHash 或 id，都缺失时用请求签名作本地引用并标记 pending；
    /// status 缺省为 confirmed；timestamp 缺省为当前时间；
    /// 无法识别的 network / amount 回落到请求中的值
    pub fn to_domain(raw: TransferResponse, request: &TransferRequest) -> Transaction {
        let backend_id = raw.tx_hash.or(raw.id).filter(|id| !id.is_empty());

        let status = match (&backend_id, raw.status.as_deref()) {
            (None, _) => TransactionStatus::Pending,
            (Some(_), Some(s)) => TransactionStatus::parse_lenient(s),
            (Some(_), None) => TransactionStatus::Confirmed,
        };

        let id = backend_id.unwrap_or_else(|| {
            warn!(network = %request.network, "backend accepted transfer without an id");
            request.signature.clone()
        });

        let network = raw
            .network
            .as_deref()
            .and_then(|n| n.parse().ok())
            .unwrap_or(request.network);

        let amount = raw
            .amount
            .and_then(|a| Balance::new(a).ok())
            .or_else(|| Balance::new(request.amount).ok())
            .unwrap_or_default();

        let timestamp = raw
            .timestamp
            .as_ref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        Transaction {
            id,
            from: raw.from.unwrap_or_else(|| request.from.clone()),
            to: raw.to.unwrap_or_else(|| request.to.clone()),
            amount,
            status,
            timestamp,
            network,
        }
    }
}

/// 毫秒时间戳或 RFC 3339 字符串
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 签名
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 按链对消息签名
pub async fn sign_message(
    network: NetworkType,
    private_key: &PrivateKey,
    message: &[u8],
) -> Result<String> {
    match network {
        NetworkType::Ethereum => sign_ethereum(private_key, message).await,
        NetworkType::Bitcoin => sign_bitcoin(private_key, message),
        NetworkType::Solana => Ok(sign_solana(private_key, message)),
    }
}

/// EIP-191 personal_sign
async fn sign_ethereum(private_key: &PrivateKey, message: &[u8]) -> Result<String> {
    use ethers::signers::{LocalWallet, Signer};

    let wallet = LocalWallet::from_bytes(private_key.as_bytes())
        .map_err(|e| WalletError::DerivationError(format!("invalid ethereum key: {}", e)))?;
    let signature = wallet
        .sign_message(message)
        .await
        .map_err(|e| WalletError::BroadcastRejected(format!("signing failed: {}", e)))?;

    Ok(format!("0x{}", signature))
}

/// secp256k1 ECDSA（SHA-256 摘要），十六进制
fn sign_bitcoin(private_key: &PrivateKey, message: &[u8]) -> Result<String> {
    use k256::ecdsa::{signature::Signer, Signature, SigningKey};

    let signing_key = SigningKey::from_slice(private_key.as_bytes())
        .map_err(|e| WalletError::DerivationError(format!("invalid secp256k1 key: {}", e)))?;
    let signature: Signature = signing_key.sign(message);

    Ok(hex::encode(signature.to_bytes()))
}

/// Ed25519，Base58
fn sign_solana(private_key: &PrivateKey, message: &[u8]) -> String {
    use ed25519_dalek::{Signer, SigningKey};

    let signing_key = SigningKey::from_bytes(private_key.as_bytes());
    bs58::encode(signing_key.sign(message).to_bytes()).into_string()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 广播
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct RestBlockchainService {
    http_client: reqwest::Client,
    base_url: String,
}

impl RestBlockchainService {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?, &config.base_url))
    }

    /// 构造并签名广播请求（不发送）
    pub async fn build_request(
        &self,
        network: NetworkType,
        private_key: &PrivateKey,
        to: &Address,
        amount: Balance,
    ) -> Result<TransferRequest> {
        let from = address_from_private_key(private_key, network)?;

        let message = TransferMessage {
            to: to.to_string(),
            amount: amount.amount(),
            network,
            nonce: Utc::now().timestamp_millis(),
        };
        let message_json = serde_json::to_string(&message)
            .map_err(|e| WalletError::BroadcastRejected(format!("encode message: {}", e)))?;

        let signature = sign_message(network, private_key, message_json.as_bytes()).await?;

        Ok(TransferRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.amount(),
            network,
            signature,
        })
    }
}

#[async_trait]
impl BlockchainService for RestBlockchainService {
    async fn transfer(
        &self,
        network: NetworkType,
        private_key: &PrivateKey,
        to: &Address,
        amount: Balance,
    ) -> Result<Transaction> {
        let request = self.build_request(network, private_key, to, amount).await?;
        let url = format!("{}/transactions/transfer", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::BroadcastRejected(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%network, %status, body = %body, "transfer rejected by backend");
            return Err(WalletError::BroadcastRejected(format!(
                "backend returned {}",
                status
            )));
        }

        // 已是 2xx：响应体读不出或解析失败也不能报告为未发送
        let body = response.text().await.unwrap_or_default();
        let raw: TransferResponse = serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!(%network, error = %e, "unparseable transfer response");
            TransferResponse::default()
        });

        let transaction = TransactionMapper::to_domain(raw, &request);
        info!(
            %network,
            tx_id = %transaction.id,
            status = %transaction.status,
            "transfer broadcast"
        );
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH_KEY: &str = "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
    const SOL_KEY: &str = "fe61a56e8d9de8184699959ebad7479698d6c26176d5b73ebdc7565699664030";

    fn request() -> TransferRequest {
        TransferRequest {
            from: "0x9858EfFD232B4033E47d90003D41EC34EcaEda94".into(),
            to: "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0".into(),
            amount: Decimal::new(15, 1),
            network: NetworkType::Ethereum,
            signature: "0x00".into(),
        }
    }

    #[test]
    fn test_mapper_defaults() {
        let raw = TransferResponse {
            id: Some("tx-1".into()),
            ..Default::default()
        };
        let tx = TransactionMapper::to_domain(raw, &request());
        assert_eq!(tx.id, "tx-1");
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert_eq!(tx.network, NetworkType::Ethereum);
        assert_eq!(tx.amount.amount(), Decimal::new(15, 1));
        assert_eq!(tx.from, request().from);
    }

    #[test]
    fn test_mapper_prefers_tx_hash() {
        let raw: TransferResponse = serde_json::from_str(
            r#"{"txHash":"0xabc","id":"internal","status":"pending","timestamp":1700000000000,"network":"ETH","amount":2}"#,
        )
        .unwrap();
        let tx = TransactionMapper::to_domain(raw, &request());
        assert_eq!(tx.id, "0xabc");
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(tx.amount.amount(), Decimal::from(2));
    }

    #[test]
    fn test_mapper_without_id_is_pending() {
        let tx = TransactionMapper::to_domain(TransferResponse::default(), &request());
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.id, request().signature);
        assert_eq!(tx.amount.amount(), Decimal::new(15, 1));
    }

    #[test]
    fn test_mapper_falls_back_on_unusable_fields() {
        let raw: TransferResponse = serde_json::from_str(
            r#"{"id":"tx-9","network":"DOGE","amount":-3,"status":"success"}"#,
        )
        .unwrap();
        let tx = TransactionMapper::to_domain(raw, &request());
        assert_eq!(tx.id, "tx-9");
        assert_eq!(tx.network, NetworkType::Ethereum);
        assert_eq!(tx.amount.amount(), Decimal::new(15, 1));
        assert_eq!(tx.status, TransactionStatus::Confirmed);
    }

    #[test]
    fn test_request_json_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["amount"], 1.5);
        assert_eq!(json["network"], "ETH");
        assert_eq!(json["signature"], "0x00");
    }

    #[tokio::test]
    async fn test_ethereum_signature_recovers_signer() {
        use ethers::types::Signature;

        let key = PrivateKey::from_hex(ETH_KEY).unwrap();
        let signed = sign_message(NetworkType::Ethereum, &key, b"hello").await.unwrap();
        assert!(signed.starts_with("0x"));
        assert_eq!(signed.len(), 2 + 130);

        let signature: Signature = signed[2..].parse().unwrap();
        let recovered = signature.recover("hello").unwrap();
        assert_eq!(
            format!("{:?}", recovered).to_lowercase(),
            "0x9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[tokio::test]
    async fn test_bitcoin_signature_verifies() {
        use k256::ecdsa::{signature::Verifier, Signature, SigningKey};

        let key = PrivateKey::from_hex(ETH_KEY).unwrap();
        let signed = sign_message(NetworkType::Bitcoin, &key, b"payload").await.unwrap();
        let bytes = hex::decode(&signed).unwrap();
        let signature = Signature::from_slice(&bytes).unwrap();

        let signing_key = SigningKey::from_slice(key.as_bytes()).unwrap();
        assert!(signing_key
            .verifying_key()
            .verify(b"payload", &signature)
            .is_ok());
    }

    #[tokio::test]
    async fn test_solana_signature_verifies() {
        use ed25519_dalek::{Signature, SigningKey, Verifier};

        let key = PrivateKey::from_hex(SOL_KEY).unwrap();
        let signed = sign_message(NetworkType::Solana, &key, b"payload").await.unwrap();
        let bytes: [u8; 64] = bs58::decode(&signed).into_vec().unwrap().try_into().unwrap();
        let signature = Signature::from_bytes(&bytes);

        let verifying_key = SigningKey::from_bytes(key.as_bytes()).verifying_key();
        assert!(verifying_key.verify(b"payload", &signature).is_ok());
    }

    #[tokio::test]
    async fn test_build_request_fills_from() {
        let service = RestBlockchainService::new(reqwest::Client::new(), "http://localhost/v1");
        let key = PrivateKey::from_hex(SOL_KEY).unwrap();
        let to = Address::parse("6oa6zNezaUx45dgpdN1h46BRxsgUyV9ibuBMvBQMhbkF", NetworkType::Solana)
            .unwrap();
        let request = service
            .build_request(NetworkType::Solana, &key, &to, Balance::try_from(0.5).unwrap())
            .await
            .unwrap();
        assert_eq!(request.from, "4EngF3p73rFnEgjcAG5DVQ91QGFze4vsvjVUkAwLjv14");
        assert_eq!(request.to, to.as_str());
        assert!(!request.signature.is_empty());
    }
}
