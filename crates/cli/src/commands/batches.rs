//! Batches command - inspect and remove import batches

use anyhow::Result;
use clap::Subcommand;
use uuid::Uuid;

use super::{Context, GlobalArgs};
use crate::output;

#[derive(Subcommand)]
pub enum BatchCommands {
    /// List import batches, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the transactions of one batch
    Show {
        batch_id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a batch and all of its transactions
    Delete { batch_id: Uuid },
}

pub async fn run(args: &GlobalArgs, command: BatchCommands) -> Result<()> {
    let ctx = Context::open(args)?;
    match command {
        BatchCommands::List { json } => {
            let batches = ctx.janus.list_batches(ctx.user).await?;
            if json {
                return output::print_json(&batches);
            }
            if batches.is_empty() {
                output::info("No import batches.");
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["Batch", "Stored", "Transactions", "From", "To", "Net"]);
            for b in &batches {
                table.add_row(vec![
                    b.batch_id.to_string(),
                    b.stored_at.format("%Y-%m-%d %H:%M").to_string(),
                    b.transaction_count.to_string(),
                    b.first_date.map(|d| d.to_string()).unwrap_or_default(),
                    b.last_date.map(|d| d.to_string()).unwrap_or_default(),
                    output::format_amount(b.net_amount),
                ]);
            }
            println!("{table}");
        }
        BatchCommands::Show { batch_id, json } => {
            let transactions = ctx.janus.batch_transactions(ctx.user, batch_id).await?;
            if json {
                return output::print_json(&transactions);
            }
            let mut table = output::create_table();
            table.set_header(vec!["Row", "Date", "Type", "Ticker", "Amount", "Source label"]);
            for stored in &transactions {
                let t = &stored.transaction;
                table.add_row(vec![
                    t.row_number.to_string(),
                    t.transaction_date.to_string(),
                    t.transaction_type.to_string(),
                    t.ticker.clone().unwrap_or_default(),
                    output::format_amount(t.total_amount),
                    t.source_label.clone(),
                ]);
            }
            println!("{table}");
        }
        BatchCommands::Delete { batch_id } => {
            let removed = ctx.janus.delete_batch(ctx.user, batch_id).await?;
            ctx.save()?;
            output::success(&format!("Deleted batch {batch_id} ({removed} transactions)"));
        }
    }
    Ok(())
}
