//! Exhaustive, order-preserving retrieval of an instrument's trade history.
//!
//! The source caps every response at [`MAX_PAGE_SIZE`] records and offers no
//! cursor, only an inclusive `end_time` bound. The fetcher therefore walks
//! backward in time: when a page comes back full, its oldest record becomes the
//! boundary of the next request and is dropped from the current page, because
//! the next (older) page will return it again as its newest record. Records
//! that share the boundary's timestamp but come after it are trimmed from the
//! older page, since the newer page already holds them.

use super::history::PagedHistory;
use super::source::TradeSource;
use super::TradeRecord;
use crate::diagnostics::{FailureLog, TracingFailureLog};
use crate::shared::Symbol;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Maximum number of records the source returns per request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Fetch behavior for one [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Records requested per call; a page this long means older data may exist.
    pub page_size: u32,
    /// Wait before repeating a request that was rate limited.
    pub rate_limit_cooldown: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            rate_limit_cooldown: Duration::from_secs(1),
        }
    }
}

/// Boundary between a full page and the next, older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Timestamp of the dropped boundary record; upper bound of the next request.
    pub end_time: DateTime<Utc>,
    /// Identifier of the dropped record, expected as the newest of the next page.
    pub boundary_trade_id: u64,
}

impl PageCursor {
    fn from_boundary(record: &TradeRecord) -> Self {
        Self {
            end_time: record.timestamp,
            boundary_trade_id: record.trade_id,
        }
    }
}

/// Builds a [`PagedHistory`] per instrument from a [`TradeSource`].
///
/// Requests are issued one at a time; the only wait is the cooldown after a
/// rate-limit response.
pub struct Fetcher<'a, S> {
    source: S,
    config: FetchConfig,
    failures: &'a dyn FailureLog,
}

impl<S: TradeSource> Fetcher<'static, S> {
    /// Fetcher that reports failures through `tracing` only.
    pub fn new(source: S, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            failures: &TracingFailureLog,
        }
    }
}

impl<'a, S: TradeSource> Fetcher<'a, S> {
    pub fn with_failure_log(source: S, config: FetchConfig, failures: &'a dyn FailureLog) -> Self {
        Self {
            source,
            config,
            failures,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch every trade of `symbol`, newest page first.
    ///
    /// Never fails: a non-recoverable source error is logged and the pages
    /// collected up to that point are returned.
    pub async fn fetch_all(&self, symbol: &Symbol) -> PagedHistory {
        let mut history = PagedHistory::new(symbol.clone());
        let mut cursor: Option<PageCursor> = None;
        let mut page_index = 0usize;

        loop {
            let Some(mut page) = self.fetch_page(symbol, cursor).await else {
                break;
            };

            // Fullness is judged before trimming: a trimmed page may still
            // have older records behind it.
            let full = page.len() >= self.config.page_size as usize;
            if let Some(prev) = cursor {
                trim_past_boundary(&prev, &mut page);
                check_boundary(symbol, &prev, &page);
            }

            if !full || page.is_empty() {
                tracing::debug!(
                    symbol = %symbol,
                    page = page_index,
                    records = page.len(),
                    "Final page"
                );
                history.insert_page(page_index, page);
                break;
            }

            let next = PageCursor::from_boundary(&page[0]);
            page.remove(0);
            tracing::debug!(
                symbol = %symbol,
                page = page_index,
                records = page.len(),
                end_time = %next.end_time,
                "Full page, continuing before boundary"
            );
            history.insert_page(page_index, page);

            if cursor == Some(next) {
                tracing::warn!(
                    symbol = %symbol,
                    end_time = %next.end_time,
                    "Source returned the same full page twice, stopping"
                );
                break;
            }
            cursor = Some(next);
            page_index += 1;
        }

        history
    }

    /// One request, repeated after a cooldown for as long as it is rate limited.
    ///
    /// `None` when the source failed in any other way.
    async fn fetch_page(
        &self,
        symbol: &Symbol,
        cursor: Option<PageCursor>,
    ) -> Option<Vec<TradeRecord>> {
        let end_time = cursor.map(|c| c.end_time);
        loop {
            match self
                .source
                .get_trades(symbol, self.config.page_size, end_time)
                .await
            {
                Ok(records) => return Some(records),
                Err(e) if e.is_rate_limited() => {
                    tracing::warn!(
                        symbol = %symbol,
                        cooldown_ms = self.config.rate_limit_cooldown.as_millis() as u64,
                        "Rate limited, waiting before retrying: {}",
                        e
                    );
                    self.failures
                        .record(&format!("Rate limited while fetching {}", symbol), &e);
                    futures_timer::Delay::new(self.config.rate_limit_cooldown).await;
                }
                Err(e) => {
                    tracing::error!(
                        symbol = %symbol,
                        "Fetching trades failed, keeping pages collected so far: {}",
                        e
                    );
                    self.failures
                        .record(&format!("Fetching trades for {} failed", symbol), &e);
                    return None;
                }
            }
        }
    }
}

/// Drop records newer than the boundary record. They share its timestamp,
/// so the inclusive bound returns them again although an earlier page
/// already holds them. Trade ids grow with execution order.
fn trim_past_boundary(cursor: &PageCursor, page: &mut Vec<TradeRecord>) {
    let before = page.len();
    page.retain(|t| t.trade_id <= cursor.boundary_trade_id);
    if page.len() < before {
        tracing::debug!(
            boundary = cursor.boundary_trade_id,
            dropped = before - page.len(),
            "Dropped records sharing the boundary timestamp"
        );
    }
}

/// The newest record of a page fetched after `cursor` should be the record
/// dropped at the boundary. If it is not, the source bound is not inclusive
/// and a record may be missing.
fn check_boundary(symbol: &Symbol, cursor: &PageCursor, page: &[TradeRecord]) {
    match page.last() {
        Some(newest) if newest.trade_id == cursor.boundary_trade_id => {}
        newest => tracing::warn!(
            symbol = %symbol,
            expected = cursor.boundary_trade_id,
            found = ?newest.map(|t| t.trade_id),
            "Boundary record not returned by the next page; a trade may be missing"
        ),
    }
}
