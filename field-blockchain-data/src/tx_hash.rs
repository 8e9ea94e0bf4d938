use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxHashError {
    #[error("transaction hash is empty")]
    Empty,
    #[error("transaction hash must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("transaction hash must be 64 hex digits, got {0}")]
    BadLength(usize),
    #[error("transaction hash contains non-hex characters: {0}")]
    NotHex(String),
}

/// 32-byte transaction hash, kept as lowercase `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TxHash {
    type Err = TxHashError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TxHashError::Empty);
        }
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(|| TxHashError::MissingPrefix(raw.to_string()))?;
        if digits.len() != 64 {
            return Err(TxHashError::BadLength(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TxHashError::NotHex(raw.to_string()));
        }
        Ok(TxHash(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    #[test]
    fn normalises_case_and_whitespace() {
        let upper = format!("  0X{}  ", HASH[2..].to_ascii_uppercase());
        let hash: TxHash = upper.parse().unwrap();
        assert_eq!(hash.as_str(), HASH);
    }

    #[test]
    fn rejects_malformed_hashes() {
        assert_eq!("".parse::<TxHash>(), Err(TxHashError::Empty));
        assert_eq!("0x1234".parse::<TxHash>(), Err(TxHashError::BadLength(4)));
        assert!(matches!(
            HASH[2..].parse::<TxHash>(),
            Err(TxHashError::MissingPrefix(_))
        ));
        let bad = format!("0x{}", "g".repeat(64));
        assert!(matches!(bad.parse::<TxHash>(), Err(TxHashError::NotHex(_))));
    }
}
