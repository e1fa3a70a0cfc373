//! Money
//!
//! Exact decimal helpers for prices, rates and totals. Amounts are plain
//! [`Decimal`] values in major units (dollars, pounds); rounding to cents only
//! ever happens through [`round_money`].

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Number of decimal places monetary values are rounded to.
pub const DECIMAL_PLACES: u32 = 2;

/// Round an amount to cents, half-up (midpoints move away from zero).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with the symbol and separators of the given currency.
#[must_use]
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(round_money(amount), currency).to_string()
}

/// Errors raised while building a [`Rate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    /// The input was not a number.
    #[error("invalid rate {0:?}; expected a fraction such as 0.08 or a percentage such as 8%")]
    Unparseable(String),

    /// The rate fell outside `0..=1`.
    #[error("rate {0} must be between 0 and 1")]
    OutOfRange(Decimal),
}

/// A proportional charge such as a sales tax or a tip, stored as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rate(pub(crate) Decimal);

impl Rate {
    /// A rate of zero.
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// Create a rate from a fraction (`0.08` is 8%).
    ///
    /// # Errors
    ///
    /// Returns [`RateError::OutOfRange`] unless `0 <= fraction <= 1`.
    pub fn new(fraction: Decimal) -> Result<Self, RateError> {
        if fraction.is_sign_negative() && !fraction.is_zero() || fraction > Decimal::ONE {
            return Err(RateError::OutOfRange(fraction));
        }

        Ok(Self(fraction))
    }

    /// Create a rate from a whole-number percentage.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::OutOfRange`] unless `0 <= percent <= 100`.
    pub fn from_percent(percent: u32) -> Result<Self, RateError> {
        Self::new(Decimal::from(percent) / Decimal::ONE_HUNDRED)
    }

    /// The rate as a fraction.
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0
    }

    /// The unrounded charge this rate levies on `amount`.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * self.0
    }
}

impl FromStr for Rate {
    type Err = RateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        let fraction = match trimmed.strip_suffix('%') {
            Some(percent) => Decimal::from_str(percent.trim())
                .map(|percent| percent / Decimal::ONE_HUNDRED),
            None => Decimal::from_str(trimmed),
        }
        .map_err(|_parse_error| RateError::Unparseable(input.to_string()))?;

        Self::new(fraction)
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}
