//! Cost-basis domain: weighted-average holding price and quantity per pair.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::domain::trade::{Fetcher, PagedHistory, TradeSource};
use crate::shared::{round_value, Symbol};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::{resolve_fee_deduction, FeeCharge, FeeDeduction, Holding, RunningBasis};

/// Aggregate trading summary for one instrument.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstrumentSummary {
    pub operations_count: usize,
    /// Absent when no buy ever established a basis.
    pub average_price: Option<Decimal>,
    /// Net held quantity implied by buys, fees and sells.
    pub average_quantity: Option<Decimal>,
}

impl InstrumentSummary {
    /// No buy was seen, so there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.average_price.is_none()
    }
}

/// Replay a paged history in chronological order into a summary.
pub fn reduce(history: &PagedHistory) -> InstrumentSummary {
    let mut basis = RunningBasis::new();
    let mut operations_count = 0;

    for page in history.pages_oldest_first() {
        operations_count += page.len();
        for trade in page {
            basis.apply(trade);
        }
    }

    InstrumentSummary {
        operations_count,
        average_price: basis.price().map(round_value),
        average_quantity: basis.quantity(),
    }
}

/// Fetch and reduce each symbol in turn.
///
/// Instruments are processed sequentially and in the given order. Symbols
/// whose summary is empty (including those whose fetch failed outright) are
/// left out; a repeated symbol is processed once.
pub async fn summarize<S: TradeSource>(
    fetcher: &Fetcher<'_, S>,
    symbols: &[Symbol],
) -> IndexMap<Symbol, InstrumentSummary> {
    let mut summaries = IndexMap::new();

    for symbol in symbols {
        if summaries.contains_key(symbol) {
            continue;
        }
        let history = fetcher.fetch_all(symbol).await;
        let summary = reduce(&history);
        tracing::info!(
            symbol = %symbol,
            pages = history.page_count(),
            operations = summary.operations_count,
            "Reduced trade history"
        );
        if summary.is_empty() {
            tracing::info!(symbol = %symbol, "No buys recorded, omitting from report");
            continue;
        }
        summaries.insert(symbol.clone(), summary);
    }

    summaries
}
