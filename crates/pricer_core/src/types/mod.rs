//! Core time, currency, and calendar types.
//!
//! This module provides:
//! - `time`: Time types (Date, Period, DayCountConvention)
//! - `currency`: ISO 4217 currency codes
//! - `calendar`: Business-day predicate and concrete calendars
//! - `error`: Structured error types for date and currency operations
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level:
//! - [`Date`], [`Period`], [`DayCountConvention`] from `time`
//! - [`Currency`] from `currency`
//! - [`Calendar`], [`CalendarEnum`], [`NullCalendar`], [`WeekendsOnly`] from `calendar`
//! - [`DateError`], [`CurrencyError`] from `error`

pub mod calendar;
pub mod currency;
pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use calendar::{Calendar, CalendarEnum, NullCalendar, WeekendsOnly};
pub use currency::Currency;
pub use error::{CurrencyError, DateError};
pub use time::{Date, DayCountConvention, Period};
