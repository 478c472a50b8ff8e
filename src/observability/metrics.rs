//! Translation counters
//!
//! Monotonic, reset only on process start. Shared across request handlers.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::translator::{TranslateErrorCode, Translation};

/// Atomic counters over every translation served
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    translations: AtomicU64,
    plans: AtomicU64,
    passthroughs: AtomicU64,
    no_match: AtomicU64,
    malformed: AtomicU64,
    rejected_requests: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one translation by outcome
    pub fn record(&self, translation: &Translation) {
        self.translations.fetch_add(1, Ordering::Relaxed);
        let counter = match translation {
            Translation::Plan { .. } => &self.plans,
            Translation::Passthrough { .. } => &self.passthroughs,
            Translation::Failure { error, .. } => match error.code() {
                TranslateErrorCode::ReelNoMatch => &self.no_match,
                // An invalid plan is a committed rule that could not be built.
                TranslateErrorCode::ReelMalformedParameter
                | TranslateErrorCode::ReelInvalidPlan => &self.malformed,
            },
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a request refused before translation
    pub fn increment_rejected_requests(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            translations: self.translations.load(Ordering::Relaxed),
            plans: self.plans.load(Ordering::Relaxed),
            passthroughs: self.passthroughs.load(Ordering::Relaxed),
            no_match: self.no_match.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.snapshot())
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub translations: u64,
    pub plans: u64,
    pub passthroughs: u64,
    pub no_match: u64,
    pub malformed: u64,
    pub rejected_requests: u64,
}
