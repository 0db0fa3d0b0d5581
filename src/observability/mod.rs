//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing produces:
//!     → tracing events (registration, claim / decline / no match)
//!     → metrics counters (open outcomes, registrations)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, filtered by RUST_LOG / config)
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (route, url, outcome) instead of formatted messages
//! - Metrics are cheap (atomic increments) and optional

pub mod logging;
pub mod metrics;
