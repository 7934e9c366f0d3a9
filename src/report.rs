//! Plain-text rendering of per-pair summaries.

use crate::domain::basis::InstrumentSummary;
use crate::shared::Symbol;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fmt::Write;

pub const NO_INFO: &str = "Have no info for your account or the given pairs";
pub const HEADER: &str = "Your account symbol info:";

fn display(value: Option<Decimal>) -> String {
    value
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render the summaries, or the single no-info notice when there are none.
pub fn render(summaries: &IndexMap<Symbol, InstrumentSummary>) -> String {
    if summaries.is_empty() {
        return NO_INFO.to_string();
    }

    let mut out = String::from(HEADER);
    for (symbol, summary) in summaries {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n\n| Symbol: {} |\n\n| Operations amount: {} |\n| Total average symbol price: {} |\n| Total symbol amount: {} |",
            symbol,
            summary.operations_count,
            display(summary.average_price),
            display(summary.average_quantity),
        );
    }
    out
}
