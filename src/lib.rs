//! Deep-link router library.
//!
//! Matches incoming URLs against an ordered list of patterns such as
//! `myapp://user/:id`, extracts placeholder values and query parameters,
//! and hands them to the first route whose handler claims the URL.
//!
//! ```no_run
//! use deeplink_router::Router;
//!
//! let mut router: Router = Router::new();
//! router
//!     .add("myapp://user/:id", |ctx| {
//!         println!("show user {:?}", ctx.argument("id"));
//!         true
//!     })
//!     .expect("valid pattern");
//!
//! assert!(router.open_str("myapp://user/42?tab=posts", None));
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use routing::{
    Context, DispatchPolicy, HandlerRegistry, PatternError, PatternUrl, QueryItem, Route,
    Router, SharedRouter,
};
