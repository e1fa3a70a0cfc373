//! Report Models

use jiff::civil::Date;
use rust_decimal::Decimal;

/// Sales for one calendar date in the store's time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub date: Date,
    pub order_count: u64,

    /// Sum of order totals, tax included.
    pub gross_sales: Decimal,

    /// Sum of quantity times captured unit price over every line.
    pub net_sales: Decimal,

    pub items_sold: u64,
}

impl DailySummary {
    /// Mean order total, or zero on a day without orders.
    #[must_use]
    pub fn average_order(&self) -> Decimal {
        if self.order_count == 0 {
            return Decimal::ZERO;
        }

        tally::money::round_money(self.gross_sales / Decimal::from(self.order_count))
    }
}
