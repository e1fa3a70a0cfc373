//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    items::{ItemIdentity, MenuItem},
    money::{DECIMAL_PLACES, Rate, RateError, format_money, round_money},
    totals::{PricingPolicy, Totals},
};
