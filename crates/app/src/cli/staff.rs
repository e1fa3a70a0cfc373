use std::io;

use clap::{Args, Subcommand};
use tally_app::context::AppContext;

use super::{render, write_output};

#[derive(Debug, Args)]
pub(crate) struct StaffCommand {
    #[command(subcommand)]
    command: StaffSubcommand,
}

#[derive(Debug, Subcommand)]
enum StaffSubcommand {
    /// Print every staff member, earliest hired first
    List,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: StaffCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        StaffSubcommand::List => {
            let staff = ctx
                .staff
                .list_staff()
                .await
                .map_err(|error| format!("failed to list staff: {error}"))?;

            write_output(out, &render::staff_table(&staff))
        }
    }
}
