//! The trade record source seam.

use super::TradeRecord;
use crate::error::SourceError;
use crate::shared::Symbol;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Anything that can list an account's executed trades for one instrument.
///
/// Implementations return at most `limit` records in ascending timestamp
/// order. With `end_time` set, only records at or before that instant are
/// considered and the most recent of them are returned; without it, the most
/// recent records overall.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn get_trades(
        &self,
        symbol: &Symbol,
        limit: u32,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<TradeRecord>, SourceError>;
}

#[async_trait]
impl<T: TradeSource + ?Sized> TradeSource for &T {
    async fn get_trades(
        &self,
        symbol: &Symbol,
        limit: u32,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<TradeRecord>, SourceError> {
        (**self).get_trades(symbol, limit, end_time).await
    }
}
