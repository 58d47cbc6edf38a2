//! OrderSide, OrderMode, OrderState, and Tld enums

use serde::{Deserialize, Serialize};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order mode
///
/// Determines which price fields an order carries: a plain price for
/// limit orders, stop plus limit prices for stop-limit, and an extra
/// target price for OCO ("one cancels the other") orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Limit order - executes at the specified price or better
    Limit,
    /// Market order - executes immediately at the best available price
    Market,
    /// Stop-limit order - places a limit order once the stop price trades
    StopLimit,
    /// OCO order - linked limit and stop-limit legs, one cancels the other
    Oco,
}

impl OrderMode {
    /// Returns the mode as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::StopLimit => "stop_limit",
            Self::Oco => "oco",
        }
    }

    /// Returns true if this mode carries a stop price
    pub fn has_stop_price(&self) -> bool {
        matches!(self, Self::StopLimit | Self::Oco)
    }
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order lifecycle state as reported by the exchange
///
/// Transitions are server-owned (`initial -> active -> closed`); the client
/// only reports the state field returned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Accepted but not yet on the book
    Initial,
    /// Resting on the book
    Active,
    /// Filled or cancelled
    Closed,
}

impl OrderState {
    /// Returns the state as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    /// Returns true if the order can still trade
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level domain the API is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tld {
    /// api.bitpin.ir
    #[default]
    Ir,
    /// api.bitpin.org
    Org,
}

impl Tld {
    /// Returns the domain suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ir => "ir",
            Self::Org => "org",
        }
    }
}

impl std::fmt::Display for Tld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_mode_serde() {
        assert_eq!(
            serde_json::to_string(&OrderMode::StopLimit).unwrap(),
            "\"stop_limit\""
        );
        assert_eq!(serde_json::to_string(&OrderMode::Oco).unwrap(), "\"oco\"");

        let parsed: OrderMode = serde_json::from_str("\"limit\"").unwrap();
        assert_eq!(parsed, OrderMode::Limit);
    }

    #[test]
    fn test_order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_order_state_serde() {
        let parsed: OrderState = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, OrderState::Active);
        assert!(parsed.is_open());
        assert!(!OrderState::Closed.is_open());
    }

    #[test]
    fn test_tld_default() {
        assert_eq!(Tld::default(), Tld::Ir);
        assert_eq!(Tld::Org.as_str(), "org");
    }
}
