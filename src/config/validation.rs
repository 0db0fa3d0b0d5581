//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every pattern so a bad one is reported before any routing
//! - Detect duplicate or empty route names and empty handler names
//! - Check the log filter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::observability::logging;
use crate::routing::{PatternError, PatternUrl};

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `index` is the zero-based position in `routes`.
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name \"{0}\" is defined more than once")]
    DuplicateRouteName(String),

    #[error("route \"{0}\" has an empty handler name")]
    EmptyHandlerName(String),

    #[error("route \"{name}\": {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("invalid log level \"{0}\"")]
    InvalidLogLevel(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        // An omitted handler falls back to the name, already checked above.
        if route.handler.as_deref().is_some_and(|handler| handler.trim().is_empty()) {
            errors.push(ValidationError::EmptyHandlerName(route.name.clone()));
        }

        if let Err(source) = PatternUrl::compile(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                source,
            });
        }
    }

    if !logging::is_valid_filter(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
