//! Query report
//!
//! Serializable summary of a translation and its rendered SQL, shared by the
//! CLI and the HTTP endpoint.

use serde::Serialize;
use serde_json::Value;

use super::sql::SqlRenderer;
use crate::translator::{QueryPlan, RuleId, Translation, TranslationKind};

/// Translation outcome as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub success: bool,
    pub kind: TranslationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<QueryPlan>,
    /// SQL with `?` placeholders (verbatim for passthrough)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
    /// SQL with literal values, for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl QueryReport {
    /// Builds a report for a translation rendered against `renderer`'s binding
    pub fn new(translation: &Translation, renderer: &SqlRenderer) -> Self {
        let rendered = renderer.render_translation(translation);
        let display_sql = match translation {
            Translation::Plan { plan, .. } => Some(renderer.render_inline(plan)),
            _ => rendered.as_ref().map(|r| r.sql.clone()),
        };
        let (sql, params) = match rendered {
            Some(r) => (Some(r.sql), r.params),
            None => (None, Vec::new()),
        };

        let (code, error, hint) = match translation {
            Translation::Failure { error, hint } => (
                Some(error.code().code()),
                Some(error.message().to_string()),
                Some(*hint),
            ),
            _ => (None, None, None),
        };

        Self {
            success: translation.is_success(),
            kind: translation.kind(),
            rule: translation.rule(),
            plan: translation.plan().cloned(),
            sql,
            params,
            display_sql,
            code,
            error,
            hint,
        }
    }
}
