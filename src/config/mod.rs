//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every pattern compiled)
//!     → RouterConfig (validated, immutable)
//!     → Router::from_config with the host's HandlerRegistry
//!
//! On reload:
//!     loader.rs loads the new table
//!     → validation.rs validates
//!     → Router::from_config builds a fresh Router
//!     → SharedRouter::replace swaps it in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
