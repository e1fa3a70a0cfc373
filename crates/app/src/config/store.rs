//! Store Config

use clap::Args;
use jiff::tz::TimeZone;
use rusty_money::iso::{self, Currency};
use tally::{money::Rate, totals::PricingPolicy};
use thiserror::Error;

/// Errors resolving store settings.
#[derive(Debug, Error)]
pub enum StoreConfigError {
    /// The time zone name is not in the tz database.
    #[error("unknown time zone {name:?}")]
    TimeZone {
        /// The name that failed to resolve.
        name: String,

        /// Lookup failure.
        #[source]
        source: jiff::Error,
    },

    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency code {0:?}")]
    Currency(String),
}

/// Shop pricing and calendar settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Sales tax rate, as a fraction (0.08) or a percentage (8%)
    #[arg(long, env = "TAX_RATE", default_value = "0.08")]
    pub tax_rate: Rate,

    /// Tip rate, as a fraction or a percentage
    #[arg(long, env = "TIP_RATE", default_value = "0")]
    pub tip_rate: Rate,

    /// IANA time zone used to decide which calendar day an order falls on
    #[arg(long, env = "STORE_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,

    /// ISO 4217 currency code used when printing amounts
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    pub currency: String,
}

impl StoreConfig {
    /// Resolve names into usable settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone or currency is unknown.
    pub fn resolve(&self) -> Result<StoreSettings, StoreConfigError> {
        let time_zone =
            TimeZone::get(&self.time_zone).map_err(|source| StoreConfigError::TimeZone {
                name: self.time_zone.clone(),
                source,
            })?;

        let currency = iso::find(&self.currency.to_ascii_uppercase())
            .ok_or_else(|| StoreConfigError::Currency(self.currency.clone()))?;

        Ok(StoreSettings {
            policy: PricingPolicy::new(self.tax_rate, self.tip_rate),
            time_zone,
            currency,
        })
    }
}

/// Resolved store settings.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Tax and tip applied to every cart.
    pub policy: PricingPolicy,

    /// Zone that defines the shop's calendar days.
    pub time_zone: TimeZone,

    /// Currency amounts are printed in.
    pub currency: &'static Currency,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            policy: PricingPolicy::default(),
            time_zone: TimeZone::UTC,
            currency: iso::USD,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    fn config(time_zone: &str, currency: &str) -> TestResult<StoreConfig> {
        Ok(StoreConfig {
            tax_rate: Rate::from_str("0.08")?,
            tip_rate: Rate::ZERO,
            time_zone: time_zone.to_string(),
            currency: currency.to_string(),
        })
    }

    #[test]
    fn resolves_known_names() -> TestResult {
        let settings = config("America/Chicago", "usd")?.resolve()?;

        assert_eq!(settings.currency, iso::USD);
        assert_eq!(settings.time_zone.iana_name(), Some("America/Chicago"));

        Ok(())
    }

    #[test]
    fn rejects_unknown_time_zone() -> TestResult {
        let result = config("Mars/Olympus", "USD")?.resolve();

        assert!(matches!(result, Err(StoreConfigError::TimeZone { .. })));

        Ok(())
    }

    #[test]
    fn rejects_unknown_currency() -> TestResult {
        let result = config("UTC", "ZZZ")?.resolve();

        assert!(matches!(result, Err(StoreConfigError::Currency(code)) if code == "ZZZ"));

        Ok(())
    }
}
