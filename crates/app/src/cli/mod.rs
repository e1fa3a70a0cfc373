use std::io;

use clap::{Parser, Subcommand};
use tally_app::{config::AppConfig, context::AppContext};

mod catalog;
mod db;
mod inventory;
mod order;
mod render;
mod report;
mod seed;
mod staff;

#[cfg(test)]
mod test_support;

#[derive(Debug, Parser)]
#[command(name = "tally-app", about = "Tally point-of-sale CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),

    #[command(flatten)]
    Shop(ShopCommand),
}

/// Commands that run against the shop's services.
#[derive(Debug, Subcommand)]
enum ShopCommand {
    Seed(seed::SeedCommand),
    Catalog(catalog::CatalogCommand),
    Staff(staff::StaffCommand),
    Inventory(inventory::InventoryCommand),
    Order(order::OrderCommand),
    Report(report::ReportCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let command = match self.command {
            Commands::Db(command) => return db::run(&self.config.database, command).await,
            Commands::Shop(command) => command,
        };

        let settings = self
            .config
            .store
            .resolve()
            .map_err(|error| format!("invalid store settings: {error}"))?;

        let ctx = AppContext::from_config(&self.config.database, settings)
            .await
            .map_err(|error| format!("{error}"))?;

        run_shop(&ctx, command, &mut io::stdout().lock()).await
    }
}

async fn run_shop(
    ctx: &AppContext,
    command: ShopCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command {
        ShopCommand::Seed(command) => seed::run(ctx, command, out).await,
        ShopCommand::Catalog(command) => catalog::run(ctx, command, out).await,
        ShopCommand::Staff(command) => staff::run(ctx, command, out).await,
        ShopCommand::Inventory(command) => inventory::run(ctx, command, out).await,
        ShopCommand::Order(command) => order::run(ctx, command, out).await,
        ShopCommand::Report(command) => report::run(ctx, command, out).await,
    }
}

fn write_output(out: &mut impl io::Write, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|error| format!("failed to write output: {error}"))
}
