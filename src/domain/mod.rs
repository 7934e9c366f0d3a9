//! Domain modules organized as vertical slices.
//!
//! - `trade`: trade records, paged history and the exhaustive fetcher
//! - `basis`: weighted-average cost-basis reduction and per-pair summaries

pub mod basis;
pub mod trade;
