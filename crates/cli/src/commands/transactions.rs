//! Transactions command - page through stored transactions

use anyhow::Result;
use janus_core::models::page::PageRequest;

use super::{Context, GlobalArgs};
use crate::output;

pub async fn run(args: &GlobalArgs, page: u32, page_size: u32, json: bool) -> Result<()> {
    let request = PageRequest::new(page, page_size)?;
    let ctx = Context::open(args)?;
    let page = ctx.janus.list_transactions(ctx.user, request).await?;

    if json {
        return output::print_json(&page);
    }

    if page.items.is_empty() {
        output::info("No transactions.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Type", "Ticker", "Qty", "Price", "Amount", "Commission", "Notes"]);
    for stored in &page.items {
        let t = &stored.transaction;
        table.add_row(vec![
            t.transaction_date.to_string(),
            t.transaction_type.to_string(),
            t.ticker.clone().unwrap_or_default(),
            output::opt_decimal(t.quantity),
            output::opt_decimal(t.price),
            output::format_amount(t.total_amount),
            output::format_amount(t.commission),
            t.notes.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    println!(
        "Page {} of {} ({} transactions)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    Ok(())
}
