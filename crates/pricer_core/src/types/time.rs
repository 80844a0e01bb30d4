//! Time types for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `Period`: Tenor type (days, weeks, months, years) for date shifts
//! - `DayCountConvention`: Year fraction conventions
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention, Period};
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = start + Period::Months(6);
//! assert_eq!(end, Date::from_ymd(2025, 7, 1).unwrap());
//!
//! let yf = DayCountConvention::Act365Fixed.year_fraction(start, end);
//! assert!((yf - 181.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing/formatting, day-difference arithmetic, and
/// tenor shifts via [`Period`]. The wrapper keeps the rest of the library
/// independent of the underlying date crate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// assert_eq!(date.year(), 2025);
///
/// let parsed: Date = "2025-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// assert_eq!(date - start, 165);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Arguments
    /// * `year` - Year (e.g., 2025)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate for access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the first day of this date's calendar month.
    pub fn first_of_month(&self) -> Date {
        // Day 1 of an existing month is always representable.
        Date(NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap_or(self.0))
    }

    /// Returns the number of days in this date's calendar month.
    pub fn days_in_month(&self) -> i64 {
        let first = self.first_of_month();
        let next = first + Period::Months(1);
        next - first
    }

    /// Shifts the date by a tenor, returning `None` on calendar overflow.
    ///
    /// Month and year shifts clamp to the end of the target month
    /// (2025-01-31 + 1M = 2025-02-28), matching market convention.
    pub fn checked_add_period(self, period: Period) -> Option<Date> {
        let shifted = match period {
            Period::Days(n) => self.0.checked_add_signed(Duration::days(n as i64)),
            Period::Weeks(n) => self.0.checked_add_signed(Duration::days(7 * n as i64)),
            Period::Months(n) => {
                if n >= 0 {
                    self.0.checked_add_months(Months::new(n as u32))
                } else {
                    self.0.checked_sub_months(Months::new(n.unsigned_abs()))
                }
            }
            Period::Years(n) => {
                let months = n.checked_mul(12)?;
                return self.checked_add_period(Period::Months(months));
            }
        };
        shifted.map(Date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl Add<Period> for Date {
    type Output = Date;

    /// Shifts the date forward by a tenor.
    ///
    /// # Panics
    /// Panics if the shifted date falls outside the representable range.
    fn add(self, period: Period) -> Date {
        match self.checked_add_period(period) {
            Some(d) => d,
            None => panic!("date arithmetic overflow: {} + {}", self, period),
        }
    }
}

impl Sub<Period> for Date {
    type Output = Date;

    /// Shifts the date backward by a tenor.
    ///
    /// # Panics
    /// Panics if the shifted date falls outside the representable range.
    fn sub(self, period: Period) -> Date {
        match self.checked_add_period(-period) {
            Some(d) => d,
            None => panic!("date arithmetic overflow: {} - {}", self, period),
        }
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Tenor expressed in whole calendar units.
///
/// Used for observation lags and schedule shifts. Negative counts are
/// allowed and shift backwards in time.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{Date, Period};
///
/// let lag: Period = "3M".parse().unwrap();
/// assert_eq!(lag, Period::Months(3));
///
/// let d = Date::from_ymd(2025, 4, 15).unwrap();
/// assert_eq!(d - lag, Date::from_ymd(2025, 1, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Calendar days
    Days(i32),
    /// Calendar weeks (7 days)
    Weeks(i32),
    /// Calendar months, end-of-month clamped
    Months(i32),
    /// Calendar years (12 months)
    Years(i32),
}

impl Period {
    /// Returns the unit suffix used in the string form ("D", "W", "M", "Y").
    #[inline]
    pub fn unit(&self) -> &'static str {
        match self {
            Period::Days(_) => "D",
            Period::Weeks(_) => "W",
            Period::Months(_) => "M",
            Period::Years(_) => "Y",
        }
    }

    /// Returns the signed unit count.
    #[inline]
    pub fn length(&self) -> i32 {
        match self {
            Period::Days(n) | Period::Weeks(n) | Period::Months(n) | Period::Years(n) => *n,
        }
    }
}

impl std::ops::Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        match self {
            Period::Days(n) => Period::Days(-n),
            Period::Weeks(n) => Period::Weeks(-n),
            Period::Months(n) => Period::Months(-n),
            Period::Years(n) => Period::Years(-n),
        }
    }
}

impl fmt::Display for Period {
    /// Formats the tenor in market shorthand ("3M", "10D").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length(), self.unit())
    }
}

impl FromStr for Period {
    type Err = String;

    /// Parses market shorthand ("3M", "10D", "2Y", "1W"), case-insensitive.
    fn from_str(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.len() < 2 {
            return Err(format!("Invalid period: {}", s));
        }
        let (count, unit) = trimmed.split_at(trimmed.len() - 1);
        let n: i32 = count
            .parse()
            .map_err(|_| format!("Invalid period count: {}", s))?;
        match unit.to_uppercase().as_str() {
            "D" => Ok(Period::Days(n)),
            "W" => Ok(Period::Weeks(n)),
            "M" => Ok(Period::Months(n)),
            "Y" => Ok(Period::Years(n)),
            _ => Err(format!("Unknown period unit: {}", s)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_period_impl {
    use super::Period;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Period {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Period {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Period::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Day count convention (year fraction convention).
///
/// # Variants
/// - `Act365Fixed`: Actual days / 365 (derivatives standard)
/// - `Act360`: Actual days / 360 (money market instruments)
/// - `Thirty360`: Each month treated as 30 days, year as 360 days
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    Act365Fixed,
    /// Actual/360: actual_days / 360.0
    Act360,
    /// 30/360 US bond basis
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT/365",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Sign-aware: returns a negative value when `start > end` instead of
    /// panicking, so callers can use the sign as a direction indicator.
    ///
    /// # Arguments
    /// * `start` - Start date
    /// * `end` - End date
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        let days = end - start;

        match self {
            DayCountConvention::Act365Fixed => days as f64 / 365.0,
            DayCountConvention::Act360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let (s, e, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                let d1 = if s.day() == 31 { 30 } else { s.day() };
                let d2 = if e.day() == 31 && d1 == 30 { 30 } else { e.day() };

                let days_30_360 = 360 * (e.year() - s.year())
                    + 30 * (e.month() as i32 - s.month() as i32)
                    + (d2 as i32 - d1 as i32);
                sign * days_30_360 as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses a day count convention from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" | "ACT365FIXED" => Ok(DayCountConvention::Act365Fixed),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Act360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_dcc_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}
