//! Persistence, services and configuration for the tally point of sale.

pub mod calendar;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

mod uuids;
