//! Totals
//!
//! Tax and tip are charged on the aggregate subtotal and rounded once, never
//! per line.

use rust_decimal::Decimal;

use crate::money::{Rate, round_money};

/// Rates applied on top of a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    tax_rate: Rate,
    tip_rate: Rate,
}

impl PricingPolicy {
    /// Create a policy from a tax rate and a tip rate.
    #[must_use]
    pub fn new(tax_rate: Rate, tip_rate: Rate) -> Self {
        Self { tax_rate, tip_rate }
    }

    /// The sales tax rate.
    #[must_use]
    pub fn tax_rate(&self) -> Rate {
        self.tax_rate
    }

    /// The tip rate.
    #[must_use]
    pub fn tip_rate(&self) -> Rate {
        self.tip_rate
    }

    /// Tax plus tip on `subtotal`, rounded to cents.
    #[must_use]
    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        round_money(self.tax_rate.of(subtotal) + self.tip_rate.of(subtotal))
    }

    /// Compute the full set of totals for `subtotal`.
    #[must_use]
    pub fn totals_for(&self, subtotal: Decimal) -> Totals {
        let tax = self.tax_on(subtotal);

        Totals {
            subtotal,
            tax,
            total: round_money(subtotal + tax),
        }
    }
}

impl Default for PricingPolicy {
    /// 8% tax, no tip.
    fn default() -> Self {
        Self {
            tax_rate: Rate(Decimal::new(8, 2)),
            tip_rate: Rate::ZERO,
        }
    }
}

/// Subtotal, tax and grand total of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals, unrounded.
    pub subtotal: Decimal,

    /// Tax plus tip, rounded to cents.
    pub tax: Decimal,

    /// `subtotal + tax`, rounded to cents.
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_policy_charges_eight_percent() {
        let totals = PricingPolicy::default().totals_for(Decimal::new(1_700, 2));

        assert_eq!(totals.tax, Decimal::new(136, 2));
        assert_eq!(totals.total, Decimal::new(1_836, 2));
    }

    #[test]
    fn tip_is_added_to_tax() -> TestResult {
        let policy = PricingPolicy::new(Rate::from_percent(8)?, Rate::from_percent(10)?);

        assert_eq!(policy.tax_on(Decimal::new(1_000, 2)), Decimal::new(180, 2));

        Ok(())
    }

    #[test]
    fn tax_is_rounded_on_the_aggregate() -> TestResult {
        let policy = PricingPolicy::new(Rate::from_percent(8)?, Rate::ZERO);

        let totals = policy.totals_for(Decimal::new(234, 2));

        assert_eq!(totals.tax, Decimal::new(19, 2));
        assert_eq!(totals.total, Decimal::new(253, 2));

        Ok(())
    }

    #[test]
    fn zero_subtotal_has_zero_totals() {
        let totals = PricingPolicy::default().totals_for(Decimal::ZERO);

        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
