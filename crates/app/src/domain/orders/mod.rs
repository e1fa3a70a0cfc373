//! Orders

pub mod checkout;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use checkout::checkout;
pub use errors::OrdersServiceError;
pub use service::*;
