//! Trading pair symbols (BASE_QUOTE format)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trading pair symbol (BASE_QUOTE format, e.g. "BTC_USDT")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// BTC/Tether trading pair
    pub const BTC_USDT: &'static str = "BTC_USDT";
    /// BTC/Toman trading pair
    pub const BTC_IRT: &'static str = "BTC_IRT";
    /// ETH/Tether trading pair
    pub const ETH_USDT: &'static str = "ETH_USDT";
    /// Tether/Toman trading pair
    pub const USDT_IRT: &'static str = "USDT_IRT";

    /// Create a new symbol from a string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the base currency (e.g., "BTC" from "BTC_USDT")
    pub fn base(&self) -> Option<&str> {
        self.0.split('_').next()
    }

    /// Get the quote currency (e.g., "USDT" from "BTC_USDT")
    pub fn quote(&self) -> Option<&str> {
        self.0.split('_').nth(1)
    }
}

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Validate format: BASE_QUOTE
        if !s.contains('_') {
            return Err(SymbolParseError::MissingUnderscore(s.to_string()));
        }

        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 2 {
            return Err(SymbolParseError::InvalidFormat(s.to_string()));
        }

        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(SymbolParseError::EmptyPart(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Error parsing a symbol
#[derive(Debug, Clone, thiserror::Error)]
pub enum SymbolParseError {
    #[error("Symbol must contain '_': {0}")]
    MissingUnderscore(String),

    #[error("Invalid symbol format: {0}")]
    InvalidFormat(String),

    #[error("Symbol has empty base or quote: {0}")]
    EmptyPart(String),
}
