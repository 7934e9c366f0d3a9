//! Trades sub-client: raw pages and full paged history.

use crate::client::BasisClient;
use crate::domain::trade::{PagedHistory, TradeRecord, TradeSource};
use crate::error::SdkError;
use crate::shared::Symbol;
use chrono::{DateTime, Utc};

pub struct Trades<'a> {
    pub(crate) client: &'a BasisClient,
}

impl<'a> Trades<'a> {
    /// A single page of at most `limit` trades, at or before `end_time`.
    pub async fn page(
        &self,
        symbol: &Symbol,
        limit: u32,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<TradeRecord>, SdkError> {
        Ok(self.client.http.get_trades(symbol, limit, end_time).await?)
    }

    /// Every trade of `symbol`, paged newest first. Failures are logged and
    /// end the walk early rather than being returned.
    pub async fn history(&self, symbol: &Symbol) -> PagedHistory {
        self.client.fetcher().fetch_all(symbol).await
    }
}
