//! Shared types for the Bitpin exchange API
//!
//! This crate provides the core type definitions used across the Bitpin SDK.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Symbol`] - Trading pair symbols (e.g., "BTC_USDT")
//! - [`OrderSide`], [`OrderMode`], [`OrderState`] - Order enums
//! - [`Tld`] - Target top-level domain for the API (`ir` or `org`)

pub mod enums;
pub mod symbol;

// Re-export commonly used types
pub use enums::*;
pub use symbol::*;
