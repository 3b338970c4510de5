//! BIP39 助记词值对象
//!
//! 助记词只存在于 Zeroizing 缓冲区中，Debug 输出始终脱敏

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};

/// 助记词长度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 128 bits 熵
    Twelve,
    /// 256 bits 熵
    TwentyFour,
}

impl WordCount {
    pub fn words(&self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    fn entropy_len(&self) -> usize {
        match self {
            Self::Twelve => 16,
            Self::TwentyFour => 32,
        }
    }

    fn from_words(count: usize) -> Option<Self> {
        match count {
            12 => Some(Self::Twelve),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SeedPhrase {
    value: Zeroizing<String>,
    word_count: WordCount,
}

impl SeedPhrase {
    /// 校验并包装用户输入的助记词
    ///
    /// 单词先规范化（去除多余空白、转小写），再做词表与校验和验证
    pub fn new(phrase: &str) -> Result<Self> {
        let mut normalized = Zeroizing::new(String::with_capacity(phrase.len()));
        let mut count = 0usize;
        for word in phrase.split_whitespace() {
            if count > 0 {
                normalized.push(' ');
            }
            normalized.extend(word.chars().flat_map(char::to_lowercase));
            count += 1;
        }

        let word_count = WordCount::from_words(count).ok_or_else(|| {
            WalletError::InvalidMnemonic(format!("expected 12 or 24 words, got {}", count))
        })?;

        Mnemonic::parse_in(Language::English, normalized.as_str())
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            value: normalized,
            word_count,
        })
    }

    /// 使用新生成的熵创建助记词
    pub fn generate(word_count: WordCount) -> Result<Self> {
        let mut entropy = Zeroizing::new(vec![0u8; word_count.entropy_len()]);
        rand::thread_rng().fill_bytes(&mut entropy);

        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            value: Zeroizing::new(mnemonic.to_string()),
            word_count,
        })
    }

    /// 原始助记词（仅供派生与一次性备份展示）
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn word_count(&self) -> WordCount {
        self.word_count
    }

    /// BIP39 种子（空 passphrase）
    pub fn to_seed_bytes(&self) -> Result<Zeroizing<[u8; 64]>> {
        let mnemonic = Mnemonic::parse_in(Language::English, self.value.as_str())
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
        Ok(Zeroizing::new(mnemonic.to_seed("")))
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedPhrase")
            .field("value", &"***REDACTED***")
            .field("word_count", &self.word_count.words())
            .finish()
    }
}
