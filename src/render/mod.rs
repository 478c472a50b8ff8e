//! Rendering of translations into executable query text
//!
//! The translator emits structured plans; this module binds the logical table
//! to the dataset and produces parameterized SQL for the external engine.

mod binding;
mod report;
mod sql;

pub use binding::{quote_literal, TableBinding};
pub use report::QueryReport;
pub use sql::{escape_like, RenderedQuery, SqlRenderer};
