//! ISO 4217 currency codes.
//!
//! A deliberately small currency set: the valuation core only needs
//! currency identity for indexes and quanto-settled payoffs, not a full
//! currency universe.

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency code.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
///
/// let usd = Currency::USD;
/// assert_eq!(usd.code(), "USD");
/// assert_eq!("eur".parse::<Currency>().unwrap(), Currency::EUR);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States dollar
    USD,
    /// Euro
    EUR,
    /// Pound sterling
    GBP,
    /// Japanese yen
    JPY,
    /// Swiss franc
    CHF,
}

impl Currency {
    /// Returns the ISO 4217 three-letter code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses an ISO 4217 code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}
