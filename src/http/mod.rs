//! HTTP client layer: `BinanceHttp` with retry policies.

pub mod client;
pub mod retry;

pub use client::BinanceHttp;
pub use retry::{RetryConfig, RetryPolicy};
