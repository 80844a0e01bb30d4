//! Base indexed cash flow entity.

use pricer_core::types::Date;

use crate::error::CashFlowError;
use crate::indexes::IndexRef;

/// A single payment whose amount is driven by the ratio of two index
/// observations.
///
/// Identity fields (notional, index, dates, payoff shape) are immutable
/// after construction; valuation never mutates them. The default
/// computation is
///
/// ```text
/// amount = notional * (I(fixing) / I(base) - adjustment)
/// ```
///
/// with adjustment 1 for a growth-only payoff and 0 otherwise, reading
/// both observations straight from the index. The index itself
/// encapsulates any curve lookup its forecast needs, so this path
/// requires no further market data.
#[derive(Debug, Clone)]
pub struct IndexedCashFlow {
    notional: f64,
    index: IndexRef,
    base_date: Date,
    fixing_date: Date,
    payment_date: Date,
    growth_only: bool,
}

impl IndexedCashFlow {
    /// Creates an indexed cash flow.
    ///
    /// # Arguments
    ///
    /// * `notional` - Payment notional, fixed at construction
    /// * `index` - Shared index reference the payoff observes
    /// * `base_date` - Date of the denominator observation
    /// * `fixing_date` - Date of the numerator observation
    /// * `payment_date` - Date the amount is paid
    /// * `growth_only` - Growth-only payoff shape when true
    pub fn new(
        notional: f64,
        index: impl Into<IndexRef>,
        base_date: Date,
        fixing_date: Date,
        payment_date: Date,
        growth_only: bool,
    ) -> Self {
        Self {
            notional,
            index: index.into(),
            base_date,
            fixing_date,
            payment_date,
            growth_only,
        }
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the observed index.
    #[inline]
    pub fn index(&self) -> &IndexRef {
        &self.index
    }

    /// Returns the base (denominator) observation date.
    #[inline]
    pub fn base_date(&self) -> Date {
        self.base_date
    }

    /// Returns the fixing (numerator) observation date.
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns true for a growth-only payoff.
    #[inline]
    pub fn growth_only(&self) -> bool {
        self.growth_only
    }

    /// Returns the index observation at the base date.
    pub fn base_fixing(&self) -> Result<f64, CashFlowError> {
        self.index.fixing(self.base_date)
    }

    /// Returns the index observation at the fixing date.
    pub fn index_fixing(&self) -> Result<f64, CashFlowError> {
        self.index.fixing(self.fixing_date)
    }

    /// Computes the payment amount from the two index observations.
    pub fn amount(&self) -> Result<f64, CashFlowError> {
        let adjustment = if self.growth_only { 1.0 } else { 0.0 };
        Ok(self.notional * (self.index_fixing()? / self.base_fixing()? - adjustment))
    }
}
