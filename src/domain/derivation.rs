//! 密钥与地址派生
//!
//! 所有网络共用 BIP32 secp256k1 派生树，地址编码按网络分派：
//! - Ethereum: 未压缩公钥 → Keccak256 → 后 20 字节 → EIP-55
//! - Bitcoin: 压缩公钥 → P2WPKH (bech32, 主网)
//! - Solana: 派生出的 32 字节私钥作为 Ed25519 种子 → Base58 公钥

use coins_bip32::{path::DerivationPath, prelude::*};
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::{
    domain::{
        derivation_path::DerivationPathValidator,
        network::NetworkType,
        value_objects::{address::to_eip55_checksum, Address, PrivateKey, SeedPhrase},
    },
    error::{Result, WalletError},
};

/// 派生服务
///
/// 相同的助记词与路径在任何平台上都必须得到相同的密钥与地址
pub trait KeyDerivationService: Send + Sync {
    /// 派生 32 字节私钥
    fn derive_private_key(&self, seed: &SeedPhrase, path: &str) -> Result<PrivateKey>;

    /// 派生该网络的公开地址
    fn derive_address(&self, seed: &SeedPhrase, path: &str, network: NetworkType)
        -> Result<Address>;
}

/// 基于 coins-bip32 的默认实现
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip32KeyDerivationService;

impl Bip32KeyDerivationService {
    pub fn new() -> Self {
        Self
    }
}

impl KeyDerivationService for Bip32KeyDerivationService {
    fn derive_private_key(&self, seed: &SeedPhrase, path: &str) -> Result<PrivateKey> {
        DerivationPathValidator::validate(path)?;

        let derivation_path = path
            .parse::<DerivationPath>()
            .map_err(|e| WalletError::DerivationError(format!("invalid path {}: {}", path, e)))?;

        let seed_bytes = seed.to_seed_bytes()?;
        let master_key = XPriv::root_from_seed(&seed_bytes[..], None)
            .map_err(|e| WalletError::DerivationError(format!("master key: {}", e)))?;

        let derived_key = master_key
            .derive_path(&derivation_path)
            .map_err(|e| WalletError::DerivationError(format!("child key {}: {}", path, e)))?;

        // XPriv 实现 AsRef<SigningKey>
        let signing_key: &SigningKey = derived_key.as_ref();
        let bytes: Zeroizing<[u8; 32]> = Zeroizing::new(signing_key.to_bytes().into());

        Ok(PrivateKey::from_bytes(bytes))
    }

    fn derive_address(
        &self,
        seed: &SeedPhrase,
        path: &str,
        network: NetworkType,
    ) -> Result<Address> {
        let private_key = self.derive_private_key(seed, path)?;
        address_from_private_key(&private_key, network)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 地址编码
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 由私钥计算地址（签名方用来填写 from 字段）
pub fn address_from_private_key(key: &PrivateKey, network: NetworkType) -> Result<Address> {
    let value = match network {
        NetworkType::Ethereum => ethereum_address(key)?,
        NetworkType::Bitcoin => bitcoin_address(key)?,
        NetworkType::Solana => solana_address(key),
    };
    Address::parse(&value, network)
}

fn secp256k1_key(key: &PrivateKey) -> Result<SigningKey> {
    SigningKey::from_slice(key.as_bytes())
        .map_err(|e| WalletError::DerivationError(format!("invalid secp256k1 key: {}", e)))
}

/// EIP-55 格式的以太坊地址
pub fn ethereum_address(key: &PrivateKey) -> Result<String> {
    let signing_key = secp256k1_key(key)?;
    let public_key = signing_key.verifying_key().to_encoded_point(false); // 未压缩格式
    let hash = Keccak256::digest(&public_key.as_bytes()[1..]); // 去掉 0x04 前缀

    Ok(to_eip55_checksum(&hash[12..]))
}

/// P2WPKH (bc1q...) 地址
pub fn bitcoin_address(key: &PrivateKey) -> Result<String> {
    use bitcoin::{secp256k1::PublicKey as Secp256k1PublicKey, Network, PublicKey};

    let signing_key = secp256k1_key(key)?;
    let public_key = signing_key.verifying_key().to_encoded_point(true); // 压缩格式

    let secp_pubkey = Secp256k1PublicKey::from_slice(public_key.as_bytes())
        .map_err(|e| WalletError::DerivationError(format!("invalid public key: {}", e)))?;

    let address = bitcoin::Address::p2wpkh(&PublicKey::new(secp_pubkey), Network::Bitcoin)
        .map_err(|e| WalletError::DerivationError(format!("p2wpkh: {}", e)))?;

    Ok(address.to_string())
}

/// Solana 地址就是 Ed25519 公钥的 Base58 编码
pub fn solana_address(key: &PrivateKey) -> String {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(key.as_bytes());
    bs58::encode(signing_key.verifying_key().to_bytes()).into_string()
}
