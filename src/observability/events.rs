//! Lifecycle and translation events
//!
//! Every log line names one of these. Names are stable and upper snake case.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Process lifecycle
    ConfigLoaded,
    ServerStart,
    ServerStop,
    BootFailed,

    // Translation outcomes
    /// A rule produced a plan
    TranslatePlan,
    /// Text forwarded as a raw query
    TranslatePassthrough,
    /// No rule and no passthrough, or a committed rule failed
    TranslateFailure,

    // HTTP
    /// Request rejected before translation (empty or undecodable body)
    RequestRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "REELQUERY_SERVING",
            Event::ServerStop => "REELQUERY_SHUTDOWN",
            Event::BootFailed => "REELQUERY_BOOT_FAILED",
            Event::TranslatePlan => "TRANSLATE_PLAN",
            Event::TranslatePassthrough => "TRANSLATE_PASSTHROUGH",
            Event::TranslateFailure => "TRANSLATE_FAILURE",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::TranslateFailure | Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
