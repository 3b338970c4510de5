//! 钱包领域统一错误类型
//!
//! 校验类错误在值对象构造时同步抛出，原样返回给调用方，不做重试

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    // 值对象校验
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid balance: {0}")]
    InvalidBalance(String),
    #[error("account label is too long ({len} > {max} characters)")]
    LabelTooLong { len: usize, max: usize },

    // 聚合查找
    #[error("wallet not found: {0}")]
    WalletNotFound(String),
    #[error("account not found: {0}")]
    AccountNotFound(String),

    // 派生
    #[error("derivation error: {0}")]
    DerivationError(String),
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    // 外部协作方
    #[error("persistence error: {0}")]
    PersistenceError(String),
    #[error("broadcast rejected: {0}")]
    BroadcastRejected(String),
    #[error("balance unavailable: {0}")]
    BalanceUnavailable(String),

    #[error("operation cancelled")]
    Cancelled,
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;

impl WalletError {
    /// 稳定的错误码（CLI 输出与日志字段使用）
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMnemonic(_) => "invalid_mnemonic",
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidBalance(_) => "invalid_balance",
            Self::LabelTooLong { .. } => "label_too_long",
            Self::WalletNotFound(_) => "wallet_not_found",
            Self::AccountNotFound(_) => "account_not_found",
            Self::DerivationError(_) => "derivation_error",
            Self::UnsupportedNetwork(_) => "unsupported_network",
            Self::PersistenceError(_) => "persistence_error",
            Self::BroadcastRejected(_) => "broadcast_rejected",
            Self::BalanceUnavailable(_) => "balance_unavailable",
            Self::Cancelled => "cancelled",
            Self::Config(_) => "config_error",
        }
    }

    /// 是否属于输入校验错误
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMnemonic(_)
                | Self::InvalidAddress(_)
                | Self::InvalidBalance(_)
                | Self::LabelTooLong { .. }
        )
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceError(format!("serialization failed: {}", err))
    }
}
