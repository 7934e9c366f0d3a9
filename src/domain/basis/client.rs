//! Summaries sub-client: fetch-and-reduce per pair.

use crate::client::BasisClient;
use crate::domain::basis::{reduce, summarize, InstrumentSummary};
use crate::shared::Symbol;
use indexmap::IndexMap;

pub struct Summaries<'a> {
    pub(crate) client: &'a BasisClient,
}

impl<'a> Summaries<'a> {
    /// Summary for one pair, empty or not.
    pub async fn get(&self, symbol: &Symbol) -> InstrumentSummary {
        let history = self.client.trades().history(symbol).await;
        reduce(&history)
    }

    /// Non-empty summaries for `symbols`, in the order given.
    pub async fn collect(&self, symbols: &[Symbol]) -> IndexMap<Symbol, InstrumentSummary> {
        summarize(&self.client.fetcher(), symbols).await
    }
}
