//! CSV adapters for tier tables and run outputs.

pub mod export;
pub mod import;

pub use export::{export_run, write_network_summary, write_tier_table, write_total_power};
pub use import::{read_tier_table, read_tier_table_file};
