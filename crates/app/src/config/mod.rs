//! Application configuration
//!
//! Every setting can come from a command line flag or an environment
//! variable; a `.env` file is loaded first when present.

use clap::Args;

use crate::config::{db::DatabaseConfig, observability::LoggingConfig, store::StoreConfig};

pub mod db;
pub mod observability;
pub mod store;

/// All settings shared by every `tally-app` command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shop pricing and calendar settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
