//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Two decimal places, minus sign kept.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

pub fn opt_decimal(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn amounts_use_two_places() {
        assert_eq!(format_amount(Decimal::from_str("-150.5").unwrap()), "-150.50");
        assert_eq!(format_amount(Decimal::from(1000)), "1000.00");
    }

    #[test]
    fn optional_decimals_are_normalized() {
        assert_eq!(opt_decimal(Some(Decimal::from_str("10.000").unwrap())), "10");
        assert_eq!(opt_decimal(None), "");
    }
}
