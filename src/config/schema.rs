//! Configuration schema definitions.
//!
//! This module defines the route-table file format.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

pub use crate::routing::DispatchPolicy;

/// Root configuration: an ordered route table plus its dispatch policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// What happens when a matching route's handler declines.
    pub policy: DispatchPolicy,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, tried in the order they appear.
    pub routes: Vec<RouteConfig>,
}

/// One route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// URL pattern, e.g. `myapp://user/:id`.
    pub pattern: String,

    /// Name of the registered handler to invoke. Defaults to the route name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn handler_name(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.name)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset (trace, debug, info, warn, error,
    /// or any `EnvFilter` directive).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.policy, DispatchPolicy::FallThrough);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_handler_name_defaults_to_route_name() {
        let route = RouteConfig::new("profile", "myapp://user/:id");
        assert_eq!(route.handler_name(), "profile");
        assert_eq!(route.with_handler("show_user").handler_name(), "show_user");
    }
}
