use std::io;

use clap::{Args, Subcommand};
use tally_app::{context::AppContext, domain::catalog::menu::starter_menu};

use super::write_output;

#[derive(Debug, Args)]
pub(crate) struct SeedCommand {
    #[command(subcommand)]
    command: SeedSubcommand,
}

#[derive(Debug, Subcommand)]
enum SeedSubcommand {
    /// Insert the starter drink menu, keeping any items already present
    Menu,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: SeedCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        SeedSubcommand::Menu => {
            let menu = starter_menu();
            let offered = menu.len();

            let inserted = ctx
                .catalog
                .seed_menu(menu)
                .await
                .map_err(|error| format!("failed to seed menu: {error}"))?;

            write_output(out, &format!("seeded {inserted} of {offered} menu items"))
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cli::test_support::Mocks;

    use super::*;

    #[tokio::test]
    async fn seed_menu_reports_inserted_count() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_seed_menu()
            .once()
            .withf(|items| items.len() == 24)
            .returning(|_| Ok(20));

        let mut out = Vec::new();

        run(
            &mocks.into_context(),
            SeedCommand {
                command: SeedSubcommand::Menu,
            },
            &mut out,
        )
        .await?;

        assert_eq!(String::from_utf8(out)?, "seeded 20 of 24 menu items\n");

        Ok(())
    }
}
