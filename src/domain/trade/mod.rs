//! Trade domain: executed trade records, paged history and the fetcher.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod fetcher;
pub mod history;
pub mod source;
pub mod wire;

use crate::shared::{Side, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use fetcher::{FetchConfig, Fetcher, PageCursor, MAX_PAGE_SIZE};
pub use history::PagedHistory;
pub use source::TradeSource;

/// One executed trade of the account for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub symbol: Symbol,
    pub trade_id: u64,
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Fee charged for the trade, in the bought asset for buys and the sold
    /// asset for sells.
    pub fee_quantity: Decimal,
    pub fee_asset: Option<String>,
    pub side: Side,
}

impl TradeRecord {
    pub fn is_buy(&self) -> bool {
        self.side.is_buy()
    }
}
