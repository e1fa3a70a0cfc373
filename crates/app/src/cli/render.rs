//! Table rendering for command output.

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use tally::money::format_money;
use tally_app::domain::{
    catalog::models::CatalogItem, inventory::models::InventoryRecord,
    orders::models::Receipt, reports::models::DailySummary, staff::models::StaffMember,
};

fn finish(builder: Builder, numeric: Columns<std::ops::Range<usize>>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(numeric, Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    table.to_string()
}

fn date_or_dash(date: Option<jiff::civil::Date>) -> String {
    date.map_or_else(|| "-".to_string(), |date| date.to_string())
}

pub(crate) fn catalog_table(items: &[CatalogItem], currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Category", "Price", "Active"]);

    for item in items {
        builder.push_record([
            item.name.clone(),
            item.category.clone(),
            format_money(item.price, currency),
            if item.active { "yes" } else { "no" }.to_string(),
        ]);
    }

    finish(builder, Columns::new(2..3))
}

pub(crate) fn staff_table(staff: &[StaffMember]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Role", "Hired", "Active"]);

    for member in staff {
        builder.push_record([
            member.name.clone(),
            member.role().to_string(),
            member.hired_on.to_string(),
            if member.is_active() { "yes" } else { "no" }.to_string(),
        ]);
    }

    finish(builder, Columns::new(2..3))
}

pub(crate) fn inventory_table(records: &[InventoryRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Item",
        "On Hand",
        "Unit",
        "Par",
        "Reorder At",
        "Restocked",
        "Counted",
        "",
    ]);

    for record in records {
        builder.push_record([
            record.item_name.clone(),
            record.quantity.to_string(),
            record.unit.clone(),
            record.par_level.to_string(),
            record.reorder_point.to_string(),
            date_or_dash(record.last_restocked),
            date_or_dash(record.last_counted),
            if record.needs_restock() { "LOW" } else { "" }.to_string(),
        ]);
    }

    finish(builder, Columns::new(1..2))
}

pub(crate) fn receipt_table(receipt: &Receipt, currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Each", "Amount"]);

    for line in &receipt.lines {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            format_money(line.unit_price, currency),
            format_money(line.line_total, currency),
        ]);
    }

    for (label, amount) in [
        ("Subtotal", receipt.totals.subtotal),
        ("Tax", receipt.totals.tax),
        ("Total", receipt.totals.total),
    ] {
        builder.push_record([
            label.to_string(),
            String::new(),
            String::new(),
            format_money(amount, currency),
        ]);
    }

    finish(builder, Columns::new(1..4))
}

pub(crate) fn summary_table(summary: &DailySummary, currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Date", "Orders", "Items", "Net", "Gross", "Average"]);
    builder.push_record([
        summary.date.to_string(),
        summary.order_count.to_string(),
        summary.items_sold.to_string(),
        format_money(summary.net_sales, currency),
        format_money(summary.gross_sales, currency),
        format_money(summary.average_order(), currency),
    ]);

    finish(builder, Columns::new(1..6))
}
