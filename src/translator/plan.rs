//! Query plan structures
//!
//! A plan is the translator's output contract: selected columns, an optional
//! filter, an optional grouping, ordering and an optional row limit. Filter
//! values are typed and are never spliced into query text by the translator.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::errors::{TranslateError, TranslateResult};
use crate::dataset::{Column, Record};

/// Filter operation types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterOp {
    /// Equality: column = value
    Eq(Value),
    /// Greater than or equal: column >= value
    Gte(Value),
    /// Less than or equal: column <= value
    Lte(Value),
    /// Greater than: column > value
    Gt(Value),
    /// Inclusive range: low <= column <= high
    Between(Value, Value),
    /// Case-insensitive substring match
    Contains(String),
}

/// A single filter predicate (column + operation)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub column: Column,
    #[serde(flatten)]
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(column: Column, value: Value) -> Self {
        Self {
            column,
            op: FilterOp::Eq(value),
        }
    }

    /// Create a range predicate (gte)
    pub fn gte(column: Column, value: Value) -> Self {
        Self {
            column,
            op: FilterOp::Gte(value),
        }
    }

    /// Create a range predicate (lte)
    pub fn lte(column: Column, value: Value) -> Self {
        Self {
            column,
            op: FilterOp::Lte(value),
        }
    }

    /// Create a range predicate (gt)
    pub fn gt(column: Column, value: Value) -> Self {
        Self {
            column,
            op: FilterOp::Gt(value),
        }
    }

    /// Create an inclusive range predicate
    pub fn between(column: Column, low: Value, high: Value) -> Self {
        Self {
            column,
            op: FilterOp::Between(low, high),
        }
    }

    /// Create a substring predicate
    pub fn contains(column: Column, text: impl Into<String>) -> Self {
        Self {
            column,
            op: FilterOp::Contains(text.into()),
        }
    }

    /// Evaluates the predicate against a record.
    ///
    /// Mirrors what a rendered query selects; values of mismatched types never match.
    pub fn matches(&self, record: &Record) -> bool {
        let actual = record.value(self.column);
        match &self.op {
            FilterOp::Eq(v) => compare(&actual, v) == Some(Ordering::Equal),
            FilterOp::Gte(v) => matches!(
                compare(&actual, v),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lte(v) => {
                matches!(compare(&actual, v), Some(Ordering::Less | Ordering::Equal))
            }
            FilterOp::Gt(v) => compare(&actual, v) == Some(Ordering::Greater),
            FilterOp::Between(low, high) => {
                matches!(
                    compare(&actual, low),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    compare(&actual, high),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            FilterOp::Contains(needle) => actual
                .as_str()
                .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

/// One entry in an explicit column list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectItem {
    /// A plain column
    Column { column: Column },
    /// `count(*)` under an alias
    Count { alias: &'static str },
    /// `avg(column)` under an alias
    Average { column: Column, alias: &'static str },
}

impl SelectItem {
    pub fn column(column: Column) -> Self {
        SelectItem::Column { column }
    }

    pub fn count(alias: &'static str) -> Self {
        SelectItem::Count { alias }
    }

    pub fn average(column: Column, alias: &'static str) -> Self {
        SelectItem::Average { column, alias }
    }

    /// Returns true for aggregate expressions
    pub fn is_aggregate(&self) -> bool {
        !matches!(self, SelectItem::Column { .. })
    }
}

/// Selected columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every column of the table
    All,
    /// Explicit ordered list
    Items(Vec<SelectItem>),
}

/// Immutable query plan produced by a matched rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    /// Logical table name; bound to a physical dataset by the renderer
    pub table: String,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Column>,
    /// Ordering keys, most significant first
    pub order_by: Vec<SortSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl QueryPlan {
    /// Creates a plan selecting every column with no filter, order or limit
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            selection: Selection::All,
            filter: None,
            group_by: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Replaces the selection with an explicit item list
    pub fn with_items(mut self, items: Vec<SelectItem>) -> Self {
        self.selection = Selection::Items(items);
        self
    }

    /// Selects plain columns in the given order
    pub fn with_columns(self, columns: &[Column]) -> Self {
        let items = columns.iter().copied().map(SelectItem::column).collect();
        self.with_items(items)
    }

    /// Sets the filter predicate
    pub fn with_filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Groups rows by a column
    pub fn with_group_by(mut self, column: Column) -> Self {
        self.group_by = Some(column);
        self
    }

    /// Appends an ordering key
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.order_by.push(sort);
        self
    }

    /// Sets the row limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if any selected item is an aggregate
    pub fn is_aggregate(&self) -> bool {
        match &self.selection {
            Selection::All => false,
            Selection::Items(items) => items.iter().any(SelectItem::is_aggregate),
        }
    }

    /// Checks the structural invariants of a finished plan.
    ///
    /// - A limit must be positive.
    /// - A grouped plan has no limit and orders only by its group key.
    pub fn validate(&self) -> TranslateResult<()> {
        if self.limit == Some(0) {
            return Err(TranslateError::malformed_parameter(
                "Row limit must be a positive integer",
            ));
        }

        if let Some(group) = self.group_by {
            if self.limit.is_some() {
                return Err(TranslateError::invalid_plan(
                    "Grouped plans cannot carry a row limit",
                ));
            }
            if let Some(sort) = self.order_by.iter().find(|s| s.column != group) {
                return Err(TranslateError::invalid_plan(format!(
                    "Grouped plan orders by '{}' instead of group key '{}'",
                    sort.column.as_str(),
                    group.as_str()
                )));
            }
        }

        Ok(())
    }
}
