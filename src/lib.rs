//! Tally
//!
//! Tally is the order core of a small point-of-sale system: a cashier's cart, exact decimal money
//! and tax totals. It performs no I/O; persistence lives in the `tally-app` crate.

pub mod cart;
pub mod items;
pub mod money;
pub mod prelude;
pub mod totals;
