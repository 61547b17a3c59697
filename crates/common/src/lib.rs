//! Shared building blocks for the fechas service crates.

pub mod types;
pub mod utils;
pub mod env;
