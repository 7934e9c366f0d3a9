//! High-level client: `BasisClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared collaborators, and accessor methods.

use crate::auth::Credentials;
use crate::diagnostics::{FailureLog, FileFailureLog};
use crate::domain::basis::client::Summaries;
use crate::domain::trade::client::Trades;
use crate::domain::trade::{FetchConfig, Fetcher};
use crate::error::{AuthError, SdkError};
use crate::http::{BinanceHttp, RetryPolicy};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::basis::client::Summaries as SummariesClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point: `client.trades()`, `client.summaries()`.
pub struct BasisClient {
    pub(crate) http: BinanceHttp,
    pub(crate) fetch_config: FetchConfig,
    pub(crate) failure_log: Arc<dyn FailureLog>,
}

impl BasisClient {
    pub fn builder() -> BasisClientBuilder {
        BasisClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn summaries(&self) -> Summaries<'_> {
        Summaries { client: self }
    }

    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch_config
    }

    pub(crate) fn fetcher(&self) -> Fetcher<'_, &BinanceHttp> {
        Fetcher::with_failure_log(
            &self.http,
            self.fetch_config.clone(),
            self.failure_log.as_ref(),
        )
    }
}

impl Clone for BasisClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            fetch_config: self.fetch_config.clone(),
            failure_log: self.failure_log.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct BasisClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    fetch_config: FetchConfig,
    retry: RetryPolicy,
    failure_log: Option<Arc<dyn FailureLog>>,
}

impl Default for BasisClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            credentials: None,
            fetch_config: FetchConfig::default(),
            retry: RetryPolicy::Idempotent,
            failure_log: None,
        }
    }
}

impl BasisClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn fetch_config(mut self, config: FetchConfig) -> Self {
        self.fetch_config = config;
        self
    }

    pub fn rate_limit_cooldown(mut self, cooldown: Duration) -> Self {
        self.fetch_config.rate_limit_cooldown = cooldown;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Where failures are recorded. Defaults to a [`FileFailureLog`] under `logs/`.
    pub fn failure_log(mut self, log: Arc<dyn FailureLog>) -> Self {
        self.failure_log = Some(log);
        self
    }

    pub fn build(self) -> Result<BasisClient, SdkError> {
        let credentials = self.credentials.ok_or(AuthError::MissingCredentials)?;
        let http = BinanceHttp::new(&self.base_url, credentials)?.with_retry(self.retry);

        Ok(BasisClient {
            http,
            fetch_config: self.fetch_config,
            failure_log: self
                .failure_log
                .unwrap_or_else(|| Arc::new(FileFailureLog::default())),
        })
    }
}
