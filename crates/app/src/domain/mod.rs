//! Point-of-sale domain concerns

pub mod catalog;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod staff;
