//! Equity index with spot-driven fixing forecasts.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
use pricer_core::market_data::{CurveHandle, QuoteHandle};
use pricer_core::types::calendar::{Calendar, CalendarEnum};
use pricer_core::types::{Currency, Date};

use crate::error::CashFlowError;

/// Equity index: a named underlying with a fixing history, a spot quote,
/// and the curves describing its forward growth.
///
/// Fixings strictly before the valuation date must come from the recorded
/// history; future fixings are forecast from the spot level and the
/// interest/dividend curves:
///
/// ```text
/// I(t) = S * D_div(t) / D_int(t)
/// ```
///
/// The fixing history is shared between an index and every clone made
/// with [`EquityIndex::clone_with`], so a curve-substituted clone (the
/// quanto trick) still sees the same historical observations.
pub struct EquityIndex {
    name: String,
    currency: Currency,
    calendar: CalendarEnum,
    interest: CurveHandle<f64>,
    dividend: CurveHandle<f64>,
    spot: QuoteHandle<f64>,
    fixings: Rc<RefCell<BTreeMap<Date, f64>>>,
}

impl EquityIndex {
    /// Creates an equity index.
    ///
    /// # Arguments
    ///
    /// * `name` - Index identifier used in error messages
    /// * `currency` - Currency the index is denominated in
    /// * `calendar` - Fixing calendar; non-business days reject fixings
    /// * `interest` - Interest-rate curve of the index's own currency
    /// * `dividend` - Dividend curve; may be left unbound (no dividends)
    /// * `spot` - Spot level quote
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        calendar: CalendarEnum,
        interest: CurveHandle<f64>,
        dividend: CurveHandle<f64>,
        spot: QuoteHandle<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            calendar,
            interest,
            dividend,
            spot,
            fixings: Rc::new(RefCell::new(BTreeMap::new())),
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

    /// Returns the fixing calendar.
    pub fn fixing_calendar(&self) -> CalendarEnum {
        self.calendar
    }

    /// Returns the interest-rate curve handle.
    pub fn interest_rate_curve(&self) -> &CurveHandle<f64> {
        &self.interest
    }

    /// Returns the dividend curve handle (possibly unbound).
    pub fn dividend_curve(&self) -> &CurveHandle<f64> {
        &self.dividend
    }

    /// Returns the spot quote handle.
    pub fn spot(&self) -> &QuoteHandle<f64> {
        &self.spot
    }

    /// Records a historical fixing.
    ///
    /// # Returns
    ///
    /// `Err(CashFlowError::InvalidFixingDate)` when the fixing calendar
    /// declares `date` a non-business day.
    pub fn add_fixing(&self, date: Date, value: f64) -> Result<(), CashFlowError> {
        if !self.calendar.is_business_day(date) {
            return Err(CashFlowError::InvalidFixingDate {
                index: self.name.clone(),
                date,
            });
        }
        self.fixings.borrow_mut().insert(date, value);
        Ok(())
    }

    /// Returns the recorded fixing for `date`, if any.
    pub fn past_fixing(&self, date: Date) -> Option<f64> {
        self.fixings.borrow().get(&date).copied()
    }

    /// Returns the index level at `date`.
    ///
    /// Dates strictly before the interest curve's reference date require a
    /// recorded fixing. The reference date itself uses a recorded fixing
    /// when present, the forecast otherwise. Later dates are forecast.
    pub fn fixing(&self, date: Date) -> Result<f64, CashFlowError> {
        let interest = self
            .interest
            .value()
            .ok_or(CashFlowError::UnboundMarketData {
                handle: "equity interest rate curve",
            })?;
        let today = interest.reference_date();

        if date < today {
            return self
                .past_fixing(date)
                .ok_or_else(|| CashFlowError::MissingFixing {
                    index: self.name.clone(),
                    date,
                });
        }
        if date == today {
            if let Some(value) = self.past_fixing(date) {
                return Ok(value);
            }
        }
        self.forecast_fixing(date, &interest)
    }

    fn forecast_fixing(
        &self,
        date: Date,
        interest: &Rc<CurveEnum<f64>>,
    ) -> Result<f64, CashFlowError> {
        let spot = self
            .spot
            .value()
            .ok_or(CashFlowError::UnboundMarketData {
                handle: "equity spot quote",
            })?
            .value();
        let interest_discount = interest.discount_on(date)?;
        let dividend_discount = match self.dividend.value() {
            Some(curve) => curve.discount_on(date)?,
            None => 1.0,
        };
        Ok(spot * dividend_discount / interest_discount)
    }

    /// Clones the index with substituted curves and spot, keeping the
    /// identity (name, currency, calendar) and sharing the fixing history.
    pub fn clone_with(
        &self,
        interest: CurveHandle<f64>,
        dividend: CurveHandle<f64>,
        spot: QuoteHandle<f64>,
    ) -> EquityIndex {
        EquityIndex {
            name: self.name.clone(),
            currency: self.currency,
            calendar: self.calendar,
            interest,
            dividend,
            spot,
            fixings: Rc::clone(&self.fixings),
        }
    }
}

impl std::fmt::Debug for EquityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquityIndex")
            .field("name", &self.name)
            .field("currency", &self.currency)
            .field("fixings", &self.fixings.borrow().len())
            .finish()
    }
}
