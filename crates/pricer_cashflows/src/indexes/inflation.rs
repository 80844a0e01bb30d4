//! Zero inflation index and the lag-and-interpolate fixing lookup.

use std::cell::RefCell;
use std::collections::BTreeMap;

use pricer_core::types::{Currency, Date, Period};

use crate::error::CashFlowError;

/// Interpolation applied when reading a consumer-price-style index.
///
/// # Variants
///
/// - `AsIndex`: whatever the raw index returns for the lagged date
/// - `Flat`: the fixing of the month containing the lagged date
/// - `Linear`: interpolation between the lagged month and the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpiInterpolation {
    /// Raw index lookup at the lagged date
    AsIndex,
    /// Fixing of the month containing the lagged date
    Flat,
    /// Linear interpolation between two consecutive monthly fixings
    Linear,
}

/// Monthly inflation index (CPI-style).
///
/// Fixings publish once per calendar month and are stored keyed by the
/// first day of the month; a lookup anywhere inside the month returns the
/// month's value. The index holds data only, no forecasting: months with
/// no recorded fixing fail, because projecting future inflation belongs
/// to curve construction outside this library.
pub struct ZeroInflationIndex {
    name: String,
    currency: Currency,
    fixings: RefCell<BTreeMap<Date, f64>>,
}

impl ZeroInflationIndex {
    /// Creates an empty monthly inflation index.
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
            fixings: RefCell::new(BTreeMap::new()),
        }
    }

    /// Returns the index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Records the fixing for the month containing `date`.
    pub fn add_fixing(&self, date: Date, value: f64) {
        self.fixings.borrow_mut().insert(date.first_of_month(), value);
    }

    /// Returns the fixing of the month containing `date`.
    pub fn fixing(&self, date: Date) -> Result<f64, CashFlowError> {
        self.fixings
            .borrow()
            .get(&date.first_of_month())
            .copied()
            .ok_or_else(|| CashFlowError::MissingFixing {
                index: self.name.clone(),
                date,
            })
    }
}

impl std::fmt::Debug for ZeroInflationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroInflationIndex")
            .field("name", &self.name)
            .field("currency", &self.currency)
            .field("fixings", &self.fixings.borrow().len())
            .finish()
    }
}

/// Returns the calendar-month observation period containing `date`
/// (first day, last day).
pub fn inflation_period(date: Date) -> (Date, Date) {
    let first = date.first_of_month();
    let last = first + Period::Months(1) - Period::Days(1);
    (first, last)
}

/// Lag-and-interpolate fixing lookup.
///
/// Shifts `date` backward by the observation lag, then reads the index
/// according to the interpolation mode. For `Linear`, the two bracketing
/// observations are the lagged month and the following month, but the
/// interpolation weight comes from the position of the *unlagged* `date`
/// inside its own calendar month. Callers that already derived lagged
/// bookkeeping dates must still pass the unlagged date here; the lag is
/// applied again inside this lookup by construction.
///
/// # Arguments
///
/// * `index` - Monthly inflation index
/// * `date` - Unlagged observation date
/// * `lag` - Observation lag (publication delay)
/// * `interpolation` - Reading mode
pub fn lagged_fixing(
    index: &ZeroInflationIndex,
    date: Date,
    lag: Period,
    interpolation: CpiInterpolation,
) -> Result<f64, CashFlowError> {
    let observation = date - lag;
    match interpolation {
        CpiInterpolation::AsIndex => index.fixing(observation),
        CpiInterpolation::Flat => {
            let (first, _) = inflation_period(observation);
            index.fixing(first)
        }
        CpiInterpolation::Linear => {
            let (observation_start, _) = inflation_period(observation);
            let next_month = observation_start + Period::Months(1);
            let first = index.fixing(observation_start)?;
            let second = index.fixing(next_month)?;

            let (period_start, period_end) = inflation_period(date);
            let period_days = (period_end - period_start + 1) as f64;
            let weight = (date - period_start) as f64 / period_days;
            Ok(first + weight * (second - first))
        }
    }
}
