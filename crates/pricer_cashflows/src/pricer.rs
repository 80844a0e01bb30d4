//! Valuation strategy contract for equity cash flows.

use pricer_core::observability::ObservableId;

use crate::error::CashFlowError;
use crate::equity::EquityCashFlow;
use crate::quanto::EquityQuantoPricer;

/// Valuation strategy attachable to an [`EquityCashFlow`].
///
/// The contract is exactly two operations, deliberately split so one
/// pricer instance can be shared across every cash flow of a leg without
/// being rebuilt per coupon:
///
/// - [`initialize`](EquityCashFlowPricer::initialize) binds the pricer to
///   a specific cash flow, pulling and validating its identity fields and
///   failing fast on unbound market data, inconsistent reference dates,
///   or an invalid date ordering;
/// - [`price`](EquityCashFlowPricer::price) computes the dimensionless
///   valuation multiplier (not yet scaled by notional) for the cash flow
///   bound by the most recent `initialize`. Querying it before any
///   `initialize` fails with [`CashFlowError::NotInitialized`].
///
/// The set of strategies is a closed variant dispatched statically;
/// adding a strategy means adding a variant here.
#[derive(Debug)]
pub enum EquityCashFlowPricer {
    /// Cross-currency (quanto) adjusted equity return
    Quanto(EquityQuantoPricer),
}

impl EquityCashFlowPricer {
    /// Binds the pricer to `cash_flow`, refreshing all transient state.
    pub fn initialize(&self, cash_flow: &EquityCashFlow) -> Result<(), CashFlowError> {
        match self {
            EquityCashFlowPricer::Quanto(pricer) => pricer.initialize(cash_flow),
        }
    }

    /// Returns the dimensionless multiplier for the bound cash flow.
    pub fn price(&self) -> Result<f64, CashFlowError> {
        match self {
            EquityCashFlowPricer::Quanto(pricer) => pricer.price(),
        }
    }

    /// Returns the id cash flows subscribe to for chained invalidation.
    pub fn observable_id(&self) -> ObservableId {
        match self {
            EquityCashFlowPricer::Quanto(pricer) => pricer.observable_id(),
        }
    }
}

impl From<EquityQuantoPricer> for EquityCashFlowPricer {
    fn from(pricer: EquityQuantoPricer) -> Self {
        EquityCashFlowPricer::Quanto(pricer)
    }
}
