//! Closed payoff variant and leg-level operations.

use std::rc::Rc;

use pricer_core::types::Date;

use crate::equity::EquityCashFlow;
use crate::error::CashFlowError;
use crate::indexed::IndexedCashFlow;
use crate::inflation::ZeroInflationCashFlow;
use crate::pricer::EquityCashFlowPricer;

/// A scheduled payment, dispatched over the closed set of payoff kinds.
///
/// Generic processing code pattern-matches on this enum instead of
/// downcasting; the `as_…` accessors give the match-or-skip shape for
/// code that only cares about one kind.
#[derive(Debug)]
pub enum CashFlow {
    /// Plain indexed payoff
    Indexed(IndexedCashFlow),
    /// Equity payoff with optional pricer
    Equity(EquityCashFlow),
    /// Lagged inflation payoff
    ZeroInflation(ZeroInflationCashFlow),
}

impl CashFlow {
    /// Returns the payment amount for any payoff kind.
    pub fn amount(&self) -> Result<f64, CashFlowError> {
        match self {
            CashFlow::Indexed(cf) => cf.amount(),
            CashFlow::Equity(cf) => cf.amount(),
            CashFlow::ZeroInflation(cf) => cf.amount(),
        }
    }

    /// Returns the notional.
    pub fn notional(&self) -> f64 {
        match self {
            CashFlow::Indexed(cf) => cf.notional(),
            CashFlow::Equity(cf) => cf.notional(),
            CashFlow::ZeroInflation(cf) => cf.notional(),
        }
    }

    /// Returns the payment date.
    pub fn payment_date(&self) -> Date {
        match self {
            CashFlow::Indexed(cf) => cf.payment_date(),
            CashFlow::Equity(cf) => cf.payment_date(),
            CashFlow::ZeroInflation(cf) => cf.payment_date(),
        }
    }

    /// Returns the equity cash flow, or `None` for other kinds.
    pub fn as_equity(&self) -> Option<&EquityCashFlow> {
        match self {
            CashFlow::Equity(cf) => Some(cf),
            _ => None,
        }
    }

    /// Returns the inflation cash flow, or `None` for other kinds.
    pub fn as_zero_inflation(&self) -> Option<&ZeroInflationCashFlow> {
        match self {
            CashFlow::ZeroInflation(cf) => Some(cf),
            _ => None,
        }
    }
}

impl From<IndexedCashFlow> for CashFlow {
    fn from(cf: IndexedCashFlow) -> Self {
        CashFlow::Indexed(cf)
    }
}

impl From<EquityCashFlow> for CashFlow {
    fn from(cf: EquityCashFlow) -> Self {
        CashFlow::Equity(cf)
    }
}

impl From<ZeroInflationCashFlow> for CashFlow {
    fn from(cf: ZeroInflationCashFlow) -> Self {
        CashFlow::ZeroInflation(cf)
    }
}

/// Ordered sequence of cash flows, typically one instrument leg.
pub type Leg = Vec<CashFlow>;

/// Attaches one shared pricer to every equity cash flow in `leg`.
///
/// Cash flows of other payoff kinds are silently skipped: applying an
/// equity pricer to a leg is match-or-skip, not an error.
pub fn set_equity_pricer(leg: &Leg, pricer: &Rc<EquityCashFlowPricer>) {
    for cash_flow in leg {
        if let CashFlow::Equity(equity) = cash_flow {
            equity.set_pricer(Some(Rc::clone(pricer)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexes::{CpiInterpolation, ZeroInflationIndex};
    use pricer_core::types::{Currency, Period};

    fn monthly_index() -> Rc<ZeroInflationIndex> {
        let index = ZeroInflationIndex::new("CPI", Currency::GBP);
        index.add_fixing(Date::from_ymd(2024, 10, 1).unwrap(), 100.0);
        index.add_fixing(Date::from_ymd(2025, 10, 1).unwrap(), 105.0);
        Rc::new(index)
    }

    fn inflation_flow() -> ZeroInflationCashFlow {
        ZeroInflationCashFlow::new(
            1_000.0,
            monthly_index(),
            CpiInterpolation::Flat,
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            Period::Months(3),
            Date::from_ymd(2026, 1, 5).unwrap(),
            false,
        )
    }

    #[test]
    fn test_dispatch_amount_and_dates() {
        let cf: CashFlow = inflation_flow().into();
        assert_eq!(cf.notional(), 1_000.0);
        assert_eq!(cf.payment_date(), Date::from_ymd(2026, 1, 5).unwrap());
        assert!((cf.amount().unwrap() - 1_050.0).abs() < 1e-9);
    }

    #[test]
    fn test_match_or_skip_accessors() {
        let cf: CashFlow = inflation_flow().into();
        assert!(cf.as_zero_inflation().is_some());
        assert!(cf.as_equity().is_none());
    }

    #[test]
    fn test_indexed_variant_dispatch() {
        let inner = IndexedCashFlow::new(
            500.0,
            monthly_index(),
            Date::from_ymd(2024, 10, 1).unwrap(),
            Date::from_ymd(2025, 10, 1).unwrap(),
            Date::from_ymd(2025, 10, 3).unwrap(),
            true,
        );
        let cf: CashFlow = inner.into();
        assert!((cf.amount().unwrap() - 500.0 * 0.05).abs() < 1e-9);
    }
}
