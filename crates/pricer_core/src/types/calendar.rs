//! Business-day calendars.
//!
//! The valuation core only consumes the business-day predicate; holiday
//! tables and schedule adjustment live outside this library. Two concrete
//! calendars are provided: [`NullCalendar`] (every day is a business day,
//! used for synthetic curves) and [`WeekendsOnly`].

use chrono::{Datelike, Weekday};

use super::time::Date;

/// Business-day predicate consumed by fixing validation and date logic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::calendar::{Calendar, WeekendsOnly};
/// use pricer_core::types::time::Date;
///
/// let cal = WeekendsOnly;
/// let saturday = Date::from_ymd(2025, 6, 14).unwrap();
/// assert!(cal.is_holiday(saturday));
/// ```
pub trait Calendar {
    /// Returns true if `date` is a business day under this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns the calendar's display name.
    fn name(&self) -> &'static str;

    /// Returns true if `date` is not a business day.
    #[inline]
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }
}

/// Calendar with no holidays at all.
///
/// Used where business-day logic must be a no-op, e.g. synthetic flat
/// curves and indexes whose fixings publish every calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Null"
    }
}

/// Calendar whose only holidays are Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn is_business_day(&self, date: Date) -> bool {
        !matches!(
            date.into_inner().weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }

    fn name(&self) -> &'static str {
        "Weekends only"
    }
}

/// Static dispatch enum over the available calendars.
///
/// Mirrors the enum-dispatch convention used for curves and surfaces;
/// entity types store this rather than a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEnum {
    /// No holidays
    Null(NullCalendar),
    /// Saturday/Sunday holidays
    Weekends(WeekendsOnly),
}

impl CalendarEnum {
    /// Convenience constructor for the no-holiday calendar.
    #[inline]
    pub fn null() -> Self {
        CalendarEnum::Null(NullCalendar)
    }

    /// Convenience constructor for the weekend calendar.
    #[inline]
    pub fn weekends_only() -> Self {
        CalendarEnum::Weekends(WeekendsOnly)
    }
}

impl Calendar for CalendarEnum {
    fn is_business_day(&self, date: Date) -> bool {
        match self {
            CalendarEnum::Null(cal) => cal.is_business_day(date),
            CalendarEnum::Weekends(cal) => cal.is_business_day(date),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CalendarEnum::Null(cal) => cal.name(),
            CalendarEnum::Weekends(cal) => cal.name(),
        }
    }
}
