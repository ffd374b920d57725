//! Quote command - latest market quote for a symbol

use anyhow::Result;
use log::debug;

use super::{Context, GlobalArgs};
use crate::output;

pub async fn run(args: &GlobalArgs, symbol: &str, json: bool) -> Result<()> {
    let ctx = Context::open(args)?;
    debug!("Quote providers for {symbol}: {}", ctx.janus.quote_providers(symbol).join(", "));
    let quote = ctx.janus.latest_quote(symbol).await?;

    if json {
        return output::print_json(&quote);
    }

    let mut table = output::create_table();
    table.set_header(vec!["Symbol", "Date", "Time", "Open", "High", "Low", "Close", "Volume", "Source"]);
    let fmt = |v: Option<f64>| v.map(|x| format!("{x:.4}")).unwrap_or_default();
    table.add_row(vec![
        quote.symbol.clone(),
        quote.date.map(|d| d.to_string()).unwrap_or_default(),
        quote.time.map(|t| t.to_string()).unwrap_or_default(),
        fmt(quote.open),
        fmt(quote.high),
        fmt(quote.low),
        format!("{:.4}", quote.close),
        quote.volume.map(|v| v.to_string()).unwrap_or_default(),
        quote.provider.clone(),
    ]);
    println!("{table}");
    Ok(())
}
