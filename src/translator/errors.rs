//! Translator error types
//!
//! Error codes:
//! - REEL_NO_MATCH (no rule fired and the text does not look like a query)
//! - REEL_MALFORMED_PARAMETER (a rule fired but its parameter was unusable)
//! - REEL_INVALID_PLAN (a plan broke a structural invariant)
//!
//! Errors are returned as values inside a failed translation; nothing here is
//! ever raised past the translator.

use std::fmt;

use super::rules::RuleId;

/// Translator error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateErrorCode {
    /// No rule matched and passthrough detection failed
    ReelNoMatch,
    /// Trigger matched but a required value could not be extracted
    ReelMalformedParameter,
    /// Plan violated grouping/limit/ordering invariants
    ReelInvalidPlan,
}

impl TranslateErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            TranslateErrorCode::ReelNoMatch => "REEL_NO_MATCH",
            TranslateErrorCode::ReelMalformedParameter => "REEL_MALFORMED_PARAMETER",
            TranslateErrorCode::ReelInvalidPlan => "REEL_INVALID_PLAN",
        }
    }
}

impl fmt::Display for TranslateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Translator error with context
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateError {
    code: TranslateErrorCode,
    message: String,
    rule: Option<RuleId>,
}

impl TranslateError {
    /// Create a no-match error
    pub fn no_match() -> Self {
        Self {
            code: TranslateErrorCode::ReelNoMatch,
            message: "Could not understand your query".into(),
            rule: None,
        }
    }

    /// Create a malformed parameter error
    pub fn malformed_parameter(reason: impl Into<String>) -> Self {
        Self {
            code: TranslateErrorCode::ReelMalformedParameter,
            message: reason.into(),
            rule: None,
        }
    }

    /// Create an invalid plan error
    pub fn invalid_plan(reason: impl Into<String>) -> Self {
        Self {
            code: TranslateErrorCode::ReelInvalidPlan,
            message: reason.into(),
            rule: None,
        }
    }

    /// Attaches the rule that was committed when the error occurred
    pub fn with_rule(mut self, rule: RuleId) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> TranslateErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the committed rule, if any
    pub fn rule(&self) -> Option<RuleId> {
        self.rule
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(rule) = self.rule {
            write!(f, " [rule {}]", rule.name())?;
        }
        Ok(())
    }
}

impl std::error::Error for TranslateError {}

/// Result type for translator operations
pub type TranslateResult<T> = Result<T, TranslateError>;
