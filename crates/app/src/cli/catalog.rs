use std::io;

use clap::{Args, Subcommand};
use tally_app::context::AppContext;

use super::{render, write_output};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Print every catalog item
    List,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: CatalogCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::List => {
            let items = ctx
                .catalog
                .list_items()
                .await
                .map_err(|error| format!("failed to list catalog: {error}"))?;

            if items.is_empty() {
                return write_output(out, "catalog is empty; run `tally-app seed menu`");
            }

            write_output(out, &render::catalog_table(&items, ctx.settings.currency))
        }
    }
}
