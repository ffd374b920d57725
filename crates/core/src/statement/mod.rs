pub mod memory;
pub mod source;
pub mod xlsx;
