//! SQL rendering
//!
//! Renders plans for a DuckDB-style engine reading the dataset file directly
//! (`FROM '/path/ratings.csv'`). Filter values are bound as `?` parameters;
//! the inline form exists only for display.

use serde_json::Value;

use super::binding::{quote_literal, TableBinding};
use crate::translator::{FilterOp, QueryPlan, SelectItem, Selection, SortDirection, Translation};

/// Escape character declared on every LIKE clause
const LIKE_ESCAPE: char = '\\';

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Escapes LIKE wildcards so user text only ever matches literally
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone, Copy)]
enum Mode {
    Placeholders,
    Inline,
}

/// Renders plans against a bound table
#[derive(Debug, Clone, Default)]
pub struct SqlRenderer {
    binding: TableBinding,
}

impl SqlRenderer {
    pub fn new(binding: TableBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &TableBinding {
        &self.binding
    }

    /// Renders a plan with `?` placeholders for every filter value
    pub fn render(&self, plan: &QueryPlan) -> RenderedQuery {
        let mut params = Vec::new();
        let sql = self.write(plan, Mode::Placeholders, &mut params);
        RenderedQuery { sql, params }
    }

    /// Renders a plan with literal values, for display only
    pub fn render_inline(&self, plan: &QueryPlan) -> String {
        self.write(plan, Mode::Inline, &mut Vec::new())
    }

    /// Renders whatever a translation produced.
    ///
    /// Passthrough text is bound to the dataset and carries no parameters.
    /// Failures render nothing.
    pub fn render_translation(&self, translation: &Translation) -> Option<RenderedQuery> {
        match translation {
            Translation::Plan { plan, .. } => Some(self.render(plan)),
            Translation::Passthrough { text } => Some(RenderedQuery {
                sql: self.binding.bind_raw(text),
                params: Vec::new(),
            }),
            Translation::Failure { .. } => None,
        }
    }

    fn write(&self, plan: &QueryPlan, mode: Mode, params: &mut Vec<Value>) -> String {
        let mut sql = String::with_capacity(128);

        sql.push_str("SELECT ");
        match &plan.selection {
            Selection::All => sql.push('*'),
            Selection::Items(items) => {
                let rendered: Vec<String> = items.iter().map(select_item).collect();
                sql.push_str(&rendered.join(", "));
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&quote_literal(&self.binding.resolve(&plan.table)));

        if let Some(filter) = &plan.filter {
            let column = filter.column.source_name();
            sql.push_str(" WHERE ");
            match &filter.op {
                FilterOp::Eq(v) => comparison(&mut sql, column, "=", v, mode, params),
                FilterOp::Gte(v) => comparison(&mut sql, column, ">=", v, mode, params),
                FilterOp::Lte(v) => comparison(&mut sql, column, "<=", v, mode, params),
                FilterOp::Gt(v) => comparison(&mut sql, column, ">", v, mode, params),
                FilterOp::Between(low, high) => {
                    comparison(&mut sql, column, ">=", low, mode, params);
                    sql.push_str(" AND ");
                    comparison(&mut sql, column, "<=", high, mode, params);
                }
                FilterOp::Contains(text) => {
                    let pattern = Value::String(format!("%{}%", escape_like(text)));
                    comparison(&mut sql, column, "ILIKE", &pattern, mode, params);
                    sql.push_str(" ESCAPE ");
                    sql.push_str(&quote_literal(&LIKE_ESCAPE.to_string()));
                }
            }
        }

        if let Some(group) = plan.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group.source_name());
        }

        if !plan.order_by.is_empty() {
            let keys: Vec<String> = plan
                .order_by
                .iter()
                .map(|s| {
                    let direction = match s.direction {
                        SortDirection::Asc => "ASC",
                        SortDirection::Desc => "DESC",
                    };
                    format!("{} {}", s.column.source_name(), direction)
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        if let Some(limit) = plan.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}

fn select_item(item: &SelectItem) -> String {
    match item {
        SelectItem::Column { column } => column.source_name().to_string(),
        SelectItem::Count { alias } => format!("COUNT(*) AS {}", alias),
        SelectItem::Average { column, alias } => {
            format!("AVG({}) AS {}", column.source_name(), alias)
        }
    }
}

fn comparison(
    sql: &mut String,
    column: &str,
    operator: &str,
    value: &Value,
    mode: Mode,
    params: &mut Vec<Value>,
) {
    sql.push_str(column);
    sql.push(' ');
    sql.push_str(operator);
    sql.push(' ');
    match mode {
        Mode::Placeholders => {
            sql.push('?');
            params.push(value.clone());
        }
        Mode::Inline => sql.push_str(&literal(value)),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_literal(s),
        Value::Bool(b) => b.to_string().to_uppercase(),
        _ => "NULL".to_string(),
    }
}
