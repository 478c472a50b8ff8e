//! Watch-log dataset model
//!
//! The dataset is a single table with one row per watched movie. It is owned
//! and executed by an external engine; this crate only names its columns.

mod record;

pub use record::{Column, Record};

/// Logical table name plans reference unless configured otherwise
pub const DEFAULT_TABLE: &str = "ratings.csv";
