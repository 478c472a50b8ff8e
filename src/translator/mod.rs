//! Phrase-to-query translator
//!
//! Turns informal phrasings about a movie watch log ("top 5 movies",
//! "movies from 2024", "average rating") into structured query plans.
//!
//! # Pipeline
//!
//! 1. Normalize: lower-case and trim
//! 2. Match: ordered rules, first satisfied trigger commits
//! 3. Build: canonical plan for the committed rule, validated
//! 4. Otherwise: passthrough if the text already reads as a query, else failure
//!
//! # Guarantees
//!
//! - Deterministic: same text → same translation
//! - No partial plans: a committed rule either builds a valid plan or fails
//! - All failures are values carrying example phrasings

mod builder;
mod errors;
mod explain;
mod normalize;
mod passthrough;
mod plan;
mod rules;
mod translator;

pub use builder::build_plan;
pub use errors::{TranslateError, TranslateErrorCode, TranslateResult};
pub use explain::ExplainPlan;
pub use normalize::normalize;
pub use passthrough::{looks_like_query, EXAMPLE_PHRASES, HINT};
pub use plan::{FilterOp, Predicate, QueryPlan, SelectItem, Selection, SortDirection, SortSpec};
pub use rules::{match_rules, rules, Params, Rule, RuleId, RuleMatch, DEFAULT_LIMIT};
pub use translator::{Translation, TranslationKind, Translator};
