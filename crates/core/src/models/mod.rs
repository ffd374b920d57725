pub mod import;
pub mod ledger;
pub mod page;
pub mod quote;
pub mod settings;
pub mod statement;
pub mod transaction;
