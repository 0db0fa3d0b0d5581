//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     pattern string
//!     → pattern.rs (compile to PatternUrl, or PatternError)
//!     → route.rs (bind handler)
//!     → router.rs (append to ordered table)
//!
//! Incoming URL:
//!     → router.rs (walk routes in registration order)
//!     → pattern.rs (scheme / host / path comparison, placeholder capture)
//!     → matcher.rs (path components, query items)
//!     → context.rs (Context handed to the handler)
//!     → handler verdict: claimed, or declined per DispatchPolicy
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable afterwards
//! - No regex, no wildcards: exact segment counts, literal or placeholder
//! - Deterministic: same input always reaches the same route
//! - First claiming route wins (ordered by registration)

pub mod context;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod route;
pub mod router;
pub mod shared;

pub use context::{Arguments, Context, QueryItem};
pub use pattern::{PatternError, PatternUrl, Segment, PLACEHOLDER_PREFIX};
pub use registry::HandlerRegistry;
pub use route::{Handler, Route};
pub use router::{DispatchPolicy, RegistrationError, Router};
pub use shared::SharedRouter;
