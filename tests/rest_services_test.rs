//! REST 后端集成测试
//! 使用 httpmock 模拟余额与转账接口

mod common;

use common::*;
use httpmock::prelude::*;
use ironvault::{
    config::BackendConfig,
    domain::{
        Address, BalanceService, Bip32KeyDerivationService, BlockchainService,
        KeyDerivationService, NetworkType, PrivateKey, SeedPhrase, TransactionStatus,
    },
    error::WalletError,
    infrastructure::{RestBalanceService, RestBlockchainService},
};
use serde_json::json;

fn backend_config(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: server.url("/v1/"),
        request_timeout_secs: 5,
        connect_timeout_secs: 5,
    }
}

fn eth_key() -> PrivateKey {
    let seed = SeedPhrase::new(TEST_MNEMONIC).unwrap();
    Bip32KeyDerivationService::new()
        .derive_private_key(&seed, "m/44'/60'/0'/0/0")
        .unwrap()
}

#[tokio::test]
async fn test_fetch_balance() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v1/balance/eth/{}", ETH_ADDRESS_0));
            then.status(200).json_body(json!({ "amount": 1.5 }));
        })
        .await;

    let service = RestBalanceService::from_config(&backend_config(&server)).unwrap();
    let address = Address::parse(ETH_ADDRESS_0, NetworkType::Ethereum).unwrap();
    let balance = service
        .fetch_remote_balance(&address, NetworkType::Ethereum)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(balance.to_string(), "1.5");
}

#[tokio::test]
async fn test_fetch_balance_backend_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/balance/sol/");
            then.status(503);
        })
        .await;

    let service = RestBalanceService::from_config(&backend_config(&server)).unwrap();
    let address = Address::parse(SOL_ADDRESS_0, NetworkType::Solana).unwrap();
    let err = service
        .fetch_remote_balance(&address, NetworkType::Solana)
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::BalanceUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_balance_negative_amount_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/balance/btc/");
            then.status(200).json_body(json!({ "amount": -2.0 }));
        })
        .await;

    let service = RestBalanceService::from_config(&backend_config(&server)).unwrap();
    let address = Address::parse(BTC_ADDRESS_0, NetworkType::Bitcoin).unwrap();
    let err = service
        .fetch_remote_balance(&address, NetworkType::Bitcoin)
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::BalanceUnavailable(_)));
}

#[tokio::test]
async fn test_transfer_accepted() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/transactions/transfer")
                .body_contains(format!("\"from\":\"{}\"", ETH_ADDRESS_0))
                .body_contains("\"network\":\"ETH\"")
                .body_contains("\"signature\":\"0x");
            then.status(200).json_body(json!({
                "txHash": "0xfeed",
                "status": "success",
                "timestamp": 1_700_000_000_000i64
            }));
        })
        .await;

    let service = RestBlockchainService::from_config(&backend_config(&server)).unwrap();
    let to = Address::parse(ETH_ADDRESS_1, NetworkType::Ethereum).unwrap();
    let tx = service
        .transfer(NetworkType::Ethereum, &eth_key(), &to, "0.5".parse().unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tx.id, "0xfeed");
    assert_eq!(tx.status, TransactionStatus::Confirmed);
    assert_eq!(tx.from, ETH_ADDRESS_0);
    assert_eq!(tx.to, ETH_ADDRESS_1);
    assert_eq!(tx.timestamp.timestamp_millis(), 1_700_000_000_000);
}

#[tokio::test]
async fn test_transfer_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/transactions/transfer");
            then.status(400).json_body(json!({ "error": "insufficient funds" }));
        })
        .await;

    let service = RestBlockchainService::from_config(&backend_config(&server)).unwrap();
    let to = Address::parse(ETH_ADDRESS_1, NetworkType::Ethereum).unwrap();
    let err = service
        .transfer(NetworkType::Ethereum, &eth_key(), &to, "1".parse().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::BroadcastRejected(_)));
}

#[tokio::test]
async fn test_transfer_response_without_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/transactions/transfer");
            then.status(200).json_body(json!({ "status": "pending" }));
        })
        .await;

    let service = RestBlockchainService::from_config(&backend_config(&server)).unwrap();
    let to = Address::parse(ETH_ADDRESS_1, NetworkType::Ethereum).unwrap();
    let tx = service
        .transfer(NetworkType::Ethereum, &eth_key(), &to, "1".parse().unwrap())
        .await
        .unwrap();

    // 已被后端接受：记为待确认，以签名作为 id
    assert_eq!(tx.status, TransactionStatus::Pending);
    assert!(tx.id.starts_with("0x"));
    assert_eq!(tx.amount.to_string(), "1");
    assert_eq!(tx.network, NetworkType::Ethereum);
}

#[tokio::test]
async fn test_transfer_accepted_with_unreadable_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/transactions/transfer");
            then.status(200).body("ok");
        })
        .await;

    let service = RestBlockchainService::from_config(&backend_config(&server)).unwrap();
    let to = Address::parse(ETH_ADDRESS_1, NetworkType::Ethereum).unwrap();
    let tx = service
        .transfer(NetworkType::Ethereum, &eth_key(), &to, "2".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(tx.status, TransactionStatus::Pending);
}
