//! API endpoint implementations
//!
//! Each module adds one group of operations to [`crate::BitpinClient`]:
//! authentication, public market data, wallets, and the order lifecycle.

mod auth;
mod market;
mod orders;
mod wallet;
