//! # trade-basis
//!
//! Rebuilds, for a set of traded pairs, the operation count and the
//! weighted-average holding price and quantity from the account's executed
//! trades.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Types, precision rule, trade history fetcher, cost-basis reducer
//! 2. **Auth**: API credentials and request signing
//! 3. **HTTP API**: `BinanceHttp`, a rate-limit aware [`TradeSource`](domain::trade::TradeSource)
//! 4. **High-Level Client**: `BasisClient` with nested sub-clients
//! 5. **Surface**: configuration, failure log, text report
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trade_basis::prelude::*;
//!
//! let client = BasisClient::builder()
//!     .credentials(Credentials::new(api_key, api_secret))
//!     .build()?;
//!
//! let symbols = [Symbol::from("BTCUSDT"), Symbol::from("ETHUSDT")];
//! let summaries = client.summaries().collect(&symbols).await;
//! println!("{}", trade_basis::report::render(&summaries));
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and the precision rule.
pub mod shared;

/// Domain modules (vertical slices): trades and cost basis.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Credentials and HMAC request signing.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `BasisClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Surface ─────────────────────────────────────────────────────────

/// Environment configuration.
pub mod config;

/// Durable failure log.
pub mod diagnostics;

/// Text report.
pub mod report;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Side, Symbol};

    // Domain types: trade
    pub use crate::domain::trade::{
        FetchConfig, Fetcher, PageCursor, PagedHistory, TradeRecord, TradeSource, MAX_PAGE_SIZE,
    };

    // Domain types: cost basis
    pub use crate::domain::basis::{
        reduce, resolve_fee_deduction, summarize, FeeCharge, FeeDeduction, InstrumentSummary,
        RunningBasis,
    };

    // Errors
    pub use crate::error::{SdkError, SourceError};

    // Auth, config, diagnostics
    pub use crate::auth::Credentials;
    pub use crate::config::AppConfig;
    pub use crate::diagnostics::{FailureLog, FileFailureLog, TracingFailureLog};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{BasisClient, BasisClientBuilder, SummariesClient, TradesClient};
    #[cfg(feature = "http")]
    pub use crate::http::{BinanceHttp, RetryConfig, RetryPolicy};
}
