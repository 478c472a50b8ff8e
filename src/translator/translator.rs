//! Phrase translator
//!
//! normalize → first matching rule → plan, else passthrough check, else failure.
//! Translation is pure: no logging, no I/O, same input gives the same result.

use serde::Serialize;

use super::builder::build_plan;
use super::errors::TranslateError;
use super::normalize::normalize;
use super::passthrough::{looks_like_query, HINT};
use super::plan::QueryPlan;
use super::rules::{match_rules, RuleId};
use crate::dataset::DEFAULT_TABLE;

/// Outcome of translating one phrase
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// A rule matched and produced a plan
    Plan { rule: RuleId, plan: QueryPlan },
    /// No rule matched but the text already reads as a query; carried verbatim
    Passthrough { text: String },
    /// Translation failed; `hint` lists accepted phrasings
    Failure {
        error: TranslateError,
        hint: &'static str,
    },
}

/// Kind tag for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    Plan,
    Passthrough,
    Failure,
}

impl TranslationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationKind::Plan => "plan",
            TranslationKind::Passthrough => "passthrough",
            TranslationKind::Failure => "failure",
        }
    }
}

impl Translation {
    fn failure(error: TranslateError) -> Self {
        Translation::Failure { error, hint: HINT }
    }

    /// Returns the kind of this outcome
    pub fn kind(&self) -> TranslationKind {
        match self {
            Translation::Plan { .. } => TranslationKind::Plan,
            Translation::Passthrough { .. } => TranslationKind::Passthrough,
            Translation::Failure { .. } => TranslationKind::Failure,
        }
    }

    /// Returns the plan if a rule matched
    pub fn plan(&self) -> Option<&QueryPlan> {
        match self {
            Translation::Plan { plan, .. } => Some(plan),
            _ => None,
        }
    }

    /// Returns the rule that produced a plan or was committed before failing
    pub fn rule(&self) -> Option<RuleId> {
        match self {
            Translation::Plan { rule, .. } => Some(*rule),
            Translation::Failure { error, .. } => error.rule(),
            Translation::Passthrough { .. } => None,
        }
    }

    /// Returns true unless translation failed
    pub fn is_success(&self) -> bool {
        !matches!(self, Translation::Failure { .. })
    }
}

/// Translates phrases into plans over one logical table
#[derive(Debug, Clone)]
pub struct Translator {
    table: String,
}

impl Translator {
    /// Creates a translator whose plans reference `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Logical table name used in plans
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Translates a raw phrase.
    ///
    /// Never fails by panicking or erroring; every outcome is a `Translation`.
    pub fn translate(&self, raw: &str) -> Translation {
        let text = normalize(raw);

        match match_rules(&text) {
            Some(Ok(matched)) => match build_plan(matched.rule, &matched.params, &self.table) {
                Ok(plan) => Translation::Plan {
                    rule: matched.rule,
                    plan,
                },
                Err(error) => Translation::failure(error),
            },
            Some(Err(error)) => Translation::failure(error),
            None if looks_like_query(&text) => Translation::Passthrough {
                text: raw.to_string(),
            },
            None => Translation::failure(TranslateError::no_match()),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE)
    }
}
