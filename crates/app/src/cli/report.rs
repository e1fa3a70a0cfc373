use std::io;

use clap::{Args, Subcommand};
use jiff::civil::Date;
use tally_app::{calendar, context::AppContext};

use super::{render, write_output};

#[derive(Debug, Args)]
pub(crate) struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReportSubcommand {
    /// Summarize sales for one day in the store's time zone
    Daily(DailyReportArgs),
}

#[derive(Debug, Args)]
pub(crate) struct DailyReportArgs {
    /// Day to report on (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<Date>,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: ReportCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        ReportSubcommand::Daily(args) => {
            let date = args
                .date
                .unwrap_or_else(|| calendar::today(&ctx.settings.time_zone));

            let summary = ctx
                .reports
                .daily_summary(date)
                .await
                .map_err(|error| format!("failed to build report for {date}: {error}"))?;

            write_output(out, &render::summary_table(&summary, ctx.settings.currency))
        }
    }
}
