//! Staff

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::StaffServiceError;
pub use service::*;
