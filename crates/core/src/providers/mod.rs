pub mod registry;
pub mod symbols;
pub mod traits;

// Quote source implementations
pub mod stooq;
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
