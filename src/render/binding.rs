//! Table binding
//!
//! Plans reference a logical table name. At render time the name is bound to
//! the physical dataset location, emitted as a quoted string literal.

use std::path::PathBuf;

use crate::dataset::DEFAULT_TABLE;

/// Quotes text as a SQL string literal (single quotes doubled)
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Binds a logical table name to a dataset path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBinding {
    logical: String,
    physical: PathBuf,
}

impl TableBinding {
    /// Creates a binding from `logical` to `physical`
    pub fn new(logical: impl Into<String>, physical: impl Into<PathBuf>) -> Self {
        Self {
            logical: logical.into(),
            physical: physical.into(),
        }
    }

    /// Leaves `logical` pointing at itself
    pub fn unbound(logical: impl Into<String>) -> Self {
        let logical = logical.into();
        Self {
            physical: PathBuf::from(&logical),
            logical,
        }
    }

    pub fn logical_name(&self) -> &str {
        &self.logical
    }

    /// Resolves a table referenced by a plan to the text that locates it
    pub fn resolve(&self, table: &str) -> String {
        if table == self.logical {
            self.physical.to_string_lossy().into_owned()
        } else {
            table.to_string()
        }
    }

    /// Rewrites quoted references to the logical name inside raw query text
    pub fn bind_raw(&self, sql: &str) -> String {
        let target = quote_literal(&self.physical.to_string_lossy());
        sql.replace(&format!("'{}'", self.logical), &target)
            .replace(&format!("\"{}\"", self.logical), &target)
    }
}

impl Default for TableBinding {
    fn default() -> Self {
        Self::unbound(DEFAULT_TABLE)
    }
}
