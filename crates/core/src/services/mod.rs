pub mod import_service;
pub mod quote_service;
