//! Explain output
//!
//! Deterministic, human-readable description of a translation outcome.

use std::fmt;

use super::plan::{FilterOp, Predicate, QueryPlan, SelectItem, Selection};
use super::translator::Translation;

/// Explain output for one translation
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainPlan {
    /// PLAN, PASSTHROUGH or REJECTED
    pub status: &'static str,
    /// Rule that produced the plan (or was committed before failing)
    pub rule: Option<&'static str>,
    /// Output columns
    pub columns: Vec<String>,
    /// Filter description
    pub filter: Option<String>,
    /// Grouping column
    pub group_by: Option<String>,
    /// Ordering keys
    pub sort: Vec<String>,
    /// Row limit
    pub limit: Option<u64>,
    /// Verbatim text (passthrough only)
    pub passthrough: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<&'static str>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Example phrasings (if rejected)
    pub hint: Option<&'static str>,
}

impl ExplainPlan {
    fn empty(status: &'static str) -> Self {
        Self {
            status,
            rule: None,
            columns: Vec::new(),
            filter: None,
            group_by: None,
            sort: Vec::new(),
            limit: None,
            passthrough: None,
            rejection_code: None,
            rejection_reason: None,
            hint: None,
        }
    }

    /// Creates an explain plan from a translation outcome
    pub fn from_translation(translation: &Translation) -> Self {
        match translation {
            Translation::Plan { rule, plan } => Self {
                rule: Some(rule.name()),
                ..Self::from_plan(plan)
            },
            Translation::Passthrough { text } => Self {
                passthrough: Some(text.clone()),
                ..Self::empty("PASSTHROUGH")
            },
            Translation::Failure { error, hint } => Self {
                rule: error.rule().map(|r| r.name()),
                rejection_code: Some(error.code().code()),
                rejection_reason: Some(error.message().to_string()),
                hint: Some(*hint),
                ..Self::empty("REJECTED")
            },
        }
    }

    /// Creates an explain plan from a query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let columns = match &plan.selection {
            Selection::All => vec!["*".to_string()],
            Selection::Items(items) => items.iter().map(describe_item).collect(),
        };

        Self {
            columns,
            filter: plan.filter.as_ref().map(describe_predicate),
            group_by: plan.group_by.map(|c| c.as_str().to_string()),
            sort: plan
                .order_by
                .iter()
                .map(|s| format!("{} {}", s.column.as_str(), s.direction.as_str()))
                .collect(),
            limit: plan.limit,
            ..Self::empty("PLAN")
        }
    }
}

fn describe_item(item: &SelectItem) -> String {
    match item {
        SelectItem::Column { column } => column.as_str().to_string(),
        SelectItem::Count { alias } => format!("count(*) as {}", alias),
        SelectItem::Average { column, alias } => format!("avg({}) as {}", column.as_str(), alias),
    }
}

fn describe_predicate(p: &Predicate) -> String {
    let column = p.column.as_str();
    match &p.op {
        FilterOp::Eq(v) => format!("{} = {}", column, v),
        FilterOp::Gte(v) => format!("{} >= {}", column, v),
        FilterOp::Lte(v) => format!("{} <= {}", column, v),
        FilterOp::Gt(v) => format!("{} > {}", column, v),
        FilterOp::Between(low, high) => format!("{} between {} and {}", column, low, high),
        FilterOp::Contains(text) => format!("{} contains {:?}", column, text),
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Status: {}", self.status)?;

        if let Some(rule) = self.rule {
            writeln!(f, "Rule: {}", rule)?;
        }
        if !self.columns.is_empty() {
            writeln!(f, "Columns: {}", self.columns.join(", "))?;
        }
        if let Some(filter) = &self.filter {
            writeln!(f, "Filter: {}", filter)?;
        }
        if let Some(group) = &self.group_by {
            writeln!(f, "Group By: {}", group)?;
        }
        if !self.sort.is_empty() {
            writeln!(f, "Sort: {}", self.sort.join(", "))?;
        }
        if let Some(limit) = self.limit {
            writeln!(f, "Limit: {}", limit)?;
        }
        if let Some(text) = &self.passthrough {
            writeln!(f, "Query: {}", text)?;
        }
        if let Some(code) = self.rejection_code {
            writeln!(f, "Error Code: {}", code)?;
        }
        if let Some(reason) = &self.rejection_reason {
            writeln!(f, "Reason: {}", reason)?;
        }
        if let Some(hint) = self.hint {
            writeln!(f, "{}", hint)?;
        }

        Ok(())
    }
}
