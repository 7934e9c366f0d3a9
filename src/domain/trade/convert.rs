//! Conversions from wire types to domain types for trades.

use super::wire::MyTradeResponse;
use super::TradeRecord;
use crate::shared::{Side, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Absent or malformed amounts become zero rather than failing the batch.
fn decimal_or_zero(value: Option<&str>) -> Decimal {
    value
        .and_then(|s| Decimal::from_str(s.trim()).ok())
        .unwrap_or_default()
}

impl From<MyTradeResponse> for TradeRecord {
    fn from(t: MyTradeResponse) -> Self {
        Self {
            symbol: Symbol::new(t.symbol),
            trade_id: t.id,
            timestamp: DateTime::<Utc>::from_timestamp_millis(t.time).unwrap_or_default(),
            price: decimal_or_zero(t.price.as_deref()),
            quantity: decimal_or_zero(t.qty.as_deref()),
            fee_quantity: decimal_or_zero(t.commission.as_deref()),
            fee_asset: t.commission_asset,
            side: Side::from_is_buyer(t.is_buyer),
        }
    }
}
