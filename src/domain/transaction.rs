//! 转账记录与状态

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{network::NetworkType, value_objects::Balance};

/// 交易状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// 已广播，等待上链
    Pending,
    /// 已确认
    Confirmed,
    /// 链上执行失败或被拒绝
    Failed,
}

impl TransactionStatus {
    /// 是否为最终状态
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// 从后端字符串解析（兼容多种写法）
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "confirmed" | "success" | "completed" => Self::Confirmed,
            "failed" | "error" | "rejected" => Self::Failed,
            _ => Self::Pending, // 默认值
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 广播服务返回的交易记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: Balance,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    pub network: NetworkType,
}
