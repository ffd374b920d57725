//! Import command - import a brokerage statement

use std::path::Path;

use anyhow::{Context as _, Result};
use colored::Colorize;

use super::{Context, GlobalArgs};
use crate::output;

pub async fn run(args: &GlobalArgs, file: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read statement {}", file.display()))?;

    let ctx = Context::open(args)?;
    let response = ctx.janus.import_statement(ctx.user, &bytes).await?;
    ctx.save()?;

    if json {
        return output::print_json(&response);
    }

    if response.rejected_count == 0 {
        output::success(&response.message);
    } else {
        output::warning(&response.message);
    }
    println!("Batch: {}", response.import_batch_id.to_string().bold());

    if !response.rejected.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Row", "Sheet row", "Reason"]);
        for row in &response.rejected {
            table.add_row(vec![
                row.row_number.to_string(),
                row.sheet_row.to_string(),
                row.reason.clone(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}
