//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Deadline for a single unit of work, in milliseconds (at least 1)
    #[arg(
        long,
        env = "UNIT_OF_WORK_TIMEOUT_MS",
        default_value_t = 5_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub unit_of_work_timeout_ms: u64,
}

impl DatabaseConfig {
    /// The unit-of-work deadline.
    #[must_use]
    pub fn unit_of_work_timeout(&self) -> Duration {
        Duration::from_millis(self.unit_of_work_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        database: DatabaseConfig,
    }

    fn parse(timeout_ms: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from([
            "tally-app",
            "--database-url",
            "postgres://localhost/tally",
            "--unit-of-work-timeout-ms",
            timeout_ms,
        ])
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse("0").is_err());
    }

    #[test]
    fn timeout_is_read_as_milliseconds() -> TestResult {
        let cli = parse("250")?;

        assert_eq!(
            cli.database.unit_of_work_timeout(),
            Duration::from_millis(250)
        );

        Ok(())
    }
}
