//! Low-level HTTP client: `BinanceHttp`.
//!
//! One method per endpoint, returning wire types. It also implements
//! [`TradeSource`] so the fetcher can drive it directly.

use crate::auth::{Credentials, API_KEY_HEADER};
use crate::domain::trade::wire::{ApiErrorResponse, MyTradeResponse, MyTradesQuery};
use crate::domain::trade::{TradeRecord, TradeSource};
use crate::error::{HttpError, SourceError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::Symbol;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Validity window for signed requests, in milliseconds.
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

/// Low-level HTTP client for the exchange REST API.
#[derive(Clone)]
pub struct BinanceHttp {
    base_url: String,
    client: Client,
    credentials: Credentials,
    retry: RetryPolicy,
    recv_window_ms: u64,
}

impl BinanceHttp {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            retry: RetryPolicy::Idempotent,
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
        })
    }

    /// Override the retry policy applied to GET requests.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Account trades ───────────────────────────────────────────────────

    /// `GET /api/v3/myTrades`, up to `limit` trades, ascending by time,
    /// at or before `end_time_ms` when given.
    pub async fn get_my_trades(
        &self,
        symbol: &str,
        limit: u32,
        end_time_ms: Option<i64>,
    ) -> Result<Vec<MyTradeResponse>, HttpError> {
        self.signed_get("/api/v3/myTrades", |timestamp| MyTradesQuery {
            symbol,
            limit,
            end_time: end_time_ms,
            recv_window: self.recv_window_ms,
            timestamp,
        })
        .await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// GET a signed endpoint. `query` is rebuilt on every attempt so each
    /// request carries a fresh timestamp and signature.
    async fn signed_get<T, Q, F>(&self, path: &str, query: F) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        Q: Serialize,
        F: Fn(i64) -> Q,
    {
        let Some(config) = self.retry.config() else {
            return self.do_signed_get(path, &query(Utc::now().timestamp_millis())).await;
        };

        let mut retry = 0;
        loop {
            let params = query(Utc::now().timestamp_millis());
            let err = match self.do_signed_get::<T, Q>(path, &params).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let transient = match &err {
                HttpError::ServerError { status, .. } => RetryConfig::is_retryable_status(*status),
                HttpError::Reqwest(re) => re.is_connect() || re.is_timeout(),
                _ => false,
            };
            if !transient || retry >= config.max_retries {
                return Err(err);
            }

            let delay = config.delay_before(retry);
            retry += 1;
            tracing::debug!(
                retry,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying request to {}: {}",
                path,
                err
            );
            futures_timer::Delay::new(delay).await;
        }
    }

    async fn do_signed_get<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        params: &Q,
    ) -> Result<T, HttpError> {
        let query = serde_urlencoded::to_string(params)?;
        let signature = self
            .credentials
            .sign(&query)
            .map_err(|e| HttpError::Unauthorized(e.to_string()))?;
        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, path, query, signature
        );

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .send()
            .await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = retry_after_ms(resp.headers());
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            // 418 is the exchange's escalation after ignoring 429s; both clear by waiting.
            429 | 418 => Err(HttpError::RateLimited { retry_after_ms }),
            401 => Err(HttpError::Unauthorized(ApiErrorResponse::message_or(&body_text))),
            400..=499 => Err(HttpError::BadRequest(ApiErrorResponse::message_or(&body_text))),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// `Retry-After` is given in whole seconds.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs * 1000)
}

#[async_trait]
impl TradeSource for BinanceHttp {
    async fn get_trades(
        &self,
        symbol: &Symbol,
        limit: u32,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<TradeRecord>, SourceError> {
        let trades = self
            .get_my_trades(symbol.as_str(), limit, end_time.map(|t| t.timestamp_millis()))
            .await?;
        Ok(trades.into_iter().map(TradeRecord::from).collect())
    }
}

impl std::fmt::Debug for BinanceHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceHttp")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("retry", &self.retry)
            .finish()
    }
}
