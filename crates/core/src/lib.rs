//! Glucolog domain logic.
//!
//! Reading classification, the append-only reading log, statistics, CSV
//! export, and the storage trait shared by the db and api crates.

pub mod classification;
pub mod context;
pub mod error;
pub mod export;
pub mod reading;
pub mod reading_log;
pub mod statistics;
pub mod store;
pub mod types;
