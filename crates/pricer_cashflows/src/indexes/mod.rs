//! Index types observed by cash flows.
//!
//! - [`EquityIndex`]: spot-driven equity underlying with fixing history
//! - [`ZeroInflationIndex`]: monthly CPI-style index with lagged lookups
//! - [`IndexRef`]: closed variant a cash flow holds, shared and non-owning

use std::rc::Rc;

use pricer_core::types::Date;

use crate::error::CashFlowError;

mod equity;
mod inflation;

pub use equity::EquityIndex;
pub use inflation::{inflation_period, lagged_fixing, CpiInterpolation, ZeroInflationIndex};

/// Shared reference to the index a cash flow observes.
///
/// The cash flow observes but does not own the index: indexes are shared
/// between many cash flows (and with the market-data layer) via `Rc`.
/// The set of index kinds is closed; generic code dispatches by matching
/// instead of downcasting.
#[derive(Debug, Clone)]
pub enum IndexRef {
    /// Equity underlying
    Equity(Rc<EquityIndex>),
    /// Monthly inflation index
    ZeroInflation(Rc<ZeroInflationIndex>),
}

impl IndexRef {
    /// Returns the index name.
    pub fn name(&self) -> &str {
        match self {
            IndexRef::Equity(index) => index.name(),
            IndexRef::ZeroInflation(index) => index.name(),
        }
    }

    /// Returns the index kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            IndexRef::Equity(_) => "equity",
            IndexRef::ZeroInflation(_) => "zero inflation",
        }
    }

    /// Returns the index level at `date` via the kind's own lookup.
    pub fn fixing(&self, date: Date) -> Result<f64, CashFlowError> {
        match self {
            IndexRef::Equity(index) => index.fixing(date),
            IndexRef::ZeroInflation(index) => index.fixing(date),
        }
    }

    /// Returns the equity index, or `None` for other kinds.
    pub fn as_equity(&self) -> Option<&Rc<EquityIndex>> {
        match self {
            IndexRef::Equity(index) => Some(index),
            _ => None,
        }
    }

    /// Returns the inflation index, or `None` for other kinds.
    pub fn as_zero_inflation(&self) -> Option<&Rc<ZeroInflationIndex>> {
        match self {
            IndexRef::ZeroInflation(index) => Some(index),
            _ => None,
        }
    }
}

impl From<Rc<EquityIndex>> for IndexRef {
    fn from(index: Rc<EquityIndex>) -> Self {
        IndexRef::Equity(index)
    }
}

impl From<Rc<ZeroInflationIndex>> for IndexRef {
    fn from(index: Rc<ZeroInflationIndex>) -> Self {
        IndexRef::ZeroInflation(index)
    }
}
