use std::io;

use clap::{Args, Subcommand};
use jiff::Timestamp;
use tally::{cart::Cart, money::format_money};
use tally_app::{context::AppContext, domain::orders::checkout};

use super::{render, write_output};

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Ring up catalog items and submit them as one order
    Submit(SubmitOrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct SubmitOrderArgs {
    /// Catalog item name; repeat to add another of the same item
    #[arg(long = "item", required = true)]
    items: Vec<String>,
}

pub(crate) async fn run(
    ctx: &AppContext,
    command: OrderCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Submit(args) => submit(ctx, args, out).await,
    }
}

async fn submit(
    ctx: &AppContext,
    args: SubmitOrderArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut cart = Cart::with_policy(ctx.settings.policy);

    for name in &args.items {
        let item = ctx
            .catalog
            .find_item_by_name(name)
            .await
            .map_err(|error| format!("cannot add {name:?}: {error}"))?;

        if !item.active {
            return Err(format!("cannot add {name:?}: item is not on sale"));
        }

        cart.add(item.to_menu_item());
    }

    let receipt = checkout(ctx.orders.as_ref(), &mut cart, Timestamp::now())
        .await
        .map_err(|error| format!("failed to submit order: {error}"))?;

    write_output(out, &render::receipt_table(&receipt, ctx.settings.currency))?;
    write_output(
        out,
        &format!(
            "order {} placed at {} for {}",
            receipt.order_uuid,
            receipt.placed_at,
            format_money(receipt.totals.total, ctx.settings.currency)
        ),
    )
}
