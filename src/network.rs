//! Network URL constants.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.binance.com";

/// Testnet REST API base URL.
pub const TESTNET_API_URL: &str = "https://testnet.binance.vision";
