//! Routing metrics.
//!
//! # Metrics
//! - `deeplink_open_total` (counter): dispatch attempts by outcome
//!   (`claimed`, `declined`, `unmatched`)
//! - `deeplink_routes_registered_total` (counter): route registrations by
//!   outcome (`registered`, `skipped`)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Label values are static strings

/// How a call to `Router::open` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Claimed,
    /// At least one route matched but no handler claimed the URL.
    Declined,
    Unmatched,
}

impl OpenOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenOutcome::Claimed => "claimed",
            OpenOutcome::Declined => "declined",
            OpenOutcome::Unmatched => "unmatched",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Skipped,
}

impl RegistrationOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationOutcome::Registered => "registered",
            RegistrationOutcome::Skipped => "skipped",
        }
    }
}

pub fn record_open(outcome: OpenOutcome) {
    ::metrics::counter!("deeplink_open_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_registration(outcome: RegistrationOutcome) {
    ::metrics::counter!("deeplink_routes_registered_total", "outcome" => outcome.as_str())
        .increment(1);
}
