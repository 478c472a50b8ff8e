//! Observability for the CLI and HTTP edges
//!
//! - Structured JSON logs on stderr
//! - Atomic translation counters
//! - Typed lifecycle and translation events
//!
//! The translator itself never logs. Callers report what it returned.
//!
//! ```ignore
//! use reelquery::observability::{log_translation, MetricsRegistry};
//!
//! let translation = translator.translate(text);
//! metrics.record(&translation);
//! log_translation(text, &translation);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use crate::translator::Translation;

/// Logs an event with no fields
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Logs an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Logs the outcome of translating `text`
pub fn log_translation(text: &str, translation: &Translation) {
    let (event, fields) = translation_fields(text, translation);
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(event, &borrowed);
}

fn translation_fields(text: &str, translation: &Translation) -> (Event, Vec<(&'static str, String)>) {
    let mut fields = vec![("text", text.to_string())];
    let event = match translation {
        Translation::Plan { rule, .. } => {
            fields.push(("rule", rule.name().to_string()));
            Event::TranslatePlan
        }
        Translation::Passthrough { .. } => Event::TranslatePassthrough,
        Translation::Failure { error, .. } => {
            fields.push(("code", error.code().code().to_string()));
            if let Some(rule) = error.rule() {
                fields.push(("rule", rule.name().to_string()));
            }
            Event::TranslateFailure
        }
    };
    (event, fields)
}
