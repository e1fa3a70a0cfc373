use std::io;

use clap::{Args, Subcommand};
use tally_app::context::AppContext;

use super::{render, write_output};

#[derive(Debug, Args)]
pub(crate) struct InventoryCommand {
    #[command(subcommand)]
    command: InventorySubcommand,
}

#[derive(Debug, Subcommand)]
enum InventorySubcommand {
    /// Print stock on hand, flagging items at or below their reorder point
    List,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: InventoryCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        InventorySubcommand::List => {
            let records = ctx
                .inventory
                .list_records()
                .await
                .map_err(|error| format!("failed to list inventory: {error}"))?;

            write_output(out, &render::inventory_table(&records))
        }
    }
}
