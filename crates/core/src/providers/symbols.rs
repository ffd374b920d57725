//! Translation of statement symbols (XTB style `TICKER.MARKET`) into the
//! notation each quote source expects.

/// Split "AAPL.US" into ("AAPL", Some("US")).
fn split_market(symbol: &str) -> (String, Option<String>) {
    let symbol = symbol.trim().to_uppercase();
    match symbol.rsplit_once('.') {
        Some((ticker, market)) if !ticker.is_empty() && !market.is_empty() => {
            (ticker.to_string(), Some(market.to_string()))
        }
        _ => (symbol, None),
    }
}

/// Stooq notation: lowercase, Warsaw listings without suffix.
///
/// `AAPL.US` → `aapl.us`, `PKN.PL` → `pkn`, `VUSA.UK` → `vusa.uk`.
pub fn to_stooq(symbol: &str) -> String {
    let (ticker, market) = split_market(symbol);
    match market.as_deref() {
        None | Some("PL") => ticker.to_lowercase(),
        Some(market) => format!("{}.{}", ticker.to_lowercase(), market.to_lowercase()),
    }
}

/// Yahoo Finance notation: US listings bare, other markets mapped to Yahoo's
/// exchange suffixes.
///
/// `AAPL.US` → `AAPL`, `PKN.PL` → `PKN.WA`, `VUSA.UK` → `VUSA.L`.
pub fn to_yahoo(symbol: &str) -> String {
    let (ticker, market) = split_market(symbol);
    let suffix = match market.as_deref() {
        None | Some("US") => return ticker,
        Some("PL") => "WA",
        Some("UK") => "L",
        Some("FR") => "PA",
        Some("NL") => "AS",
        Some("ES") => "MC",
        Some("IT") => "MI",
        Some("PT") => "LS",
        Some("BE") => "BR",
        Some("CH") => "SW",
        Some("DK") => "CO",
        Some("SE") => "ST",
        Some("NO") => "OL",
        Some("FI") => "HE",
        Some("CZ") => "PR",
        Some(other) => other,
    };
    format!("{ticker}.{suffix}")
}
