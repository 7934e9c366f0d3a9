//! Running cost basis, updated one trade at a time.

use crate::domain::trade::TradeRecord;
use crate::shared::precision;
use rust_decimal::Decimal;

/// Where a buy's fee was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCharge {
    /// The quantity already held covered the fee.
    RunningBalance,
    /// The held quantity did not exceed the fee, so the incoming trade paid it.
    IncomingTrade,
}

/// Outcome of [`resolve_fee_deduction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeDeduction {
    pub charged_to: FeeCharge,
    /// Held quantity after the fee.
    pub running: Decimal,
    /// Incoming trade quantity after the fee.
    pub incoming: Decimal,
}

/// Decide which quantity pays a buy's fee.
///
/// The fee comes out of the held quantity when that quantity is strictly
/// larger than the fee; otherwise it comes out of the incoming trade, so the
/// held balance never goes negative because of a fee.
pub fn resolve_fee_deduction(running: Decimal, incoming: Decimal, fee: Decimal) -> FeeDeduction {
    if running > fee {
        FeeDeduction {
            charged_to: FeeCharge::RunningBalance,
            running: precision::sub(running, fee),
            incoming,
        }
    } else {
        FeeDeduction {
            charged_to: FeeCharge::IncomingTrade,
            running,
            incoming: precision::sub(incoming, fee),
        }
    }
}

/// An established basis: average acquisition price and net held quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holding {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Per-instrument reducer state. Unset until the first buy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningBasis {
    holding: Option<Holding>,
}

impl RunningBasis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(&self) -> Option<Holding> {
        self.holding
    }

    pub fn price(&self) -> Option<Decimal> {
        self.holding.map(|h| h.price)
    }

    pub fn quantity(&self) -> Option<Decimal> {
        self.holding.map(|h| h.quantity)
    }

    /// Fold one trade into the basis.
    pub fn apply(&mut self, trade: &TradeRecord) {
        self.holding = match (self.holding, trade.is_buy()) {
            // A sell before any buy has nothing to reduce.
            (None, false) => None,
            (None, true) => Some(Holding {
                price: trade.price,
                quantity: precision::sub(trade.quantity, trade.fee_quantity),
            }),
            (Some(h), false) => Some(Holding {
                price: h.price,
                quantity: precision::sub(h.quantity, trade.quantity),
            }),
            (Some(h), true) => Some(blend(h, trade)),
        };
    }
}

/// Value-weighted blend of a buy into an existing holding.
fn blend(held: Holding, trade: &TradeRecord) -> Holding {
    let FeeDeduction {
        running, incoming, ..
    } = resolve_fee_deduction(held.quantity, trade.quantity, trade.fee_quantity);

    let prior_value = precision::mul(held.price, running);
    let incoming_value = precision::mul(trade.price, incoming);
    let total_value = precision::add(prior_value, incoming_value);
    let total_quantity = precision::add(running, incoming);

    let price = match precision::div(total_value, total_quantity) {
        Some(price) => price,
        None => {
            tracing::warn!(
                symbol = %trade.symbol,
                trade_id = trade.trade_id,
                "Blended quantity is zero, keeping previous average price"
            );
            held.price
        }
    };

    Holding {
        price,
        quantity: total_quantity,
    }
}
