//! Paged trade history for one instrument.

use super::TradeRecord;
use crate::shared::Symbol;
use std::collections::BTreeMap;

/// Trade history for one instrument, keyed by page index.
///
/// Page `0` holds the most recent records; higher indices hold older ones.
/// Within a page, records are in ascending timestamp order. Visiting pages from
/// the highest index down, and records in stored order, yields the full
/// chronological history.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedHistory {
    pub symbol: Symbol,
    pages: BTreeMap<usize, Vec<TradeRecord>>,
}

impl PagedHistory {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            pages: BTreeMap::new(),
        }
    }

    /// Store a page, replacing any page already held at `index`.
    pub fn insert_page(&mut self, index: usize, records: Vec<TradeRecord>) {
        self.pages.insert(index, records);
    }

    pub fn page(&self, index: usize) -> Option<&[TradeRecord]> {
        self.pages.get(&index).map(Vec::as_slice)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn record_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Pages from oldest (highest index) to most recent (index `0`).
    pub fn pages_oldest_first(&self) -> impl Iterator<Item = &[TradeRecord]> {
        self.pages.values().rev().map(Vec::as_slice)
    }

    /// Every record in chronological order.
    pub fn chronological(&self) -> impl Iterator<Item = &TradeRecord> {
        self.pages_oldest_first().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Side;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn make_trade(id: u64) -> TradeRecord {
        TradeRecord {
            symbol: Symbol::from("BTCUSDT"),
            trade_id: id,
            timestamp: Utc.timestamp_millis_opt(id as i64 * 1000).unwrap(),
            price: Decimal::from(100),
            quantity: Decimal::ONE,
            fee_quantity: Decimal::ZERO,
            fee_asset: None,
            side: Side::Buy,
        }
    }

    #[test]
    fn test_chronological_visits_oldest_page_first() {
        let mut history = PagedHistory::new(Symbol::from("BTCUSDT"));
        history.insert_page(0, vec![make_trade(5), make_trade(6)]);
        history.insert_page(2, vec![make_trade(1)]);
        history.insert_page(1, vec![make_trade(2), make_trade(3), make_trade(4)]);

        let ids: Vec<_> = history.chronological().map(|t| t.trade_id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
        assert_eq!(history.page_count(), 3);
        assert_eq!(history.record_count(), 6);
    }

    #[test]
    fn test_empty_pages_count_as_empty() {
        let mut history = PagedHistory::new(Symbol::from("ETHUSDT"));
        assert!(history.is_empty());
        history.insert_page(0, Vec::new());
        assert!(history.is_empty());
        assert_eq!(history.page_count(), 1);
        assert_eq!(history.page(0).map(<[_]>::len), Some(0));
    }
}
