//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Find the first route matching a URL
//! - Dispatch to handlers according to the `DispatchPolicy`
//!
//! # Design Decisions
//! - Ordered list + linear scan; overlapping patterns are disambiguated
//!   purely by registration order, no specificity scoring
//! - Immutable while matching (thread-safe without locks); use
//!   `SharedRouter` when the table must be replaced at runtime
//! - A bad route definition is rejected on its own; the rest of the
//!   table still loads

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::RouterConfig;
use crate::observability::metrics::{self, OpenOutcome, RegistrationOutcome};
use crate::routing::context::Context;
use crate::routing::pattern::PatternError;
use crate::routing::registry::HandlerRegistry;
use crate::routing::route::Route;

/// What a declining handler means for the remaining routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Keep trying later routes until a handler claims the URL.
    #[default]
    FallThrough,

    /// Stop at the first structural match and report its handler's verdict.
    FirstMatch,
}

impl DispatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchPolicy::FallThrough => "fall_through",
            DispatchPolicy::FirstMatch => "first_match",
        }
    }
}

/// A route definition that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("route \"{name}\": {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("route \"{name}\": no handler registered as \"{handler}\"")]
    UnknownHandler { name: String, handler: String },
}

/// Ordered route table.
pub struct Router<T = ()> {
    routes: Vec<Route<T>>,
    policy: DispatchPolicy,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            routes: Vec::new(),
            policy,
        }
    }

    /// Build a router from a route table, skipping definitions that fail.
    ///
    /// Returns the router and one error per skipped definition.
    pub fn from_config(
        config: &RouterConfig,
        handlers: &HandlerRegistry<T>,
    ) -> (Self, Vec<RegistrationError>) {
        let mut router = Self::with_policy(config.policy);
        let mut skipped = Vec::new();

        for entry in &config.routes {
            let handler_name = entry.handler_name();
            let Some(handler) = handlers.get(handler_name) else {
                tracing::warn!(
                    route = %entry.name,
                    handler = %handler_name,
                    "Skipping route with unknown handler"
                );
                metrics::record_registration(RegistrationOutcome::Skipped);
                skipped.push(RegistrationError::UnknownHandler {
                    name: entry.name.clone(),
                    handler: handler_name.to_string(),
                });
                continue;
            };

            match Route::with_handler(entry.name.clone(), &entry.pattern, handler) {
                Ok(route) => router.push(route),
                Err(source) => {
                    tracing::warn!(
                        route = %entry.name,
                        pattern = %entry.pattern,
                        error = %source,
                        "Skipping route with invalid pattern"
                    );
                    metrics::record_registration(RegistrationOutcome::Skipped);
                    skipped.push(RegistrationError::InvalidPattern {
                        name: entry.name.clone(),
                        source,
                    });
                }
            }
        }

        tracing::info!(
            routes = router.len(),
            skipped = skipped.len(),
            policy = router.policy.as_str(),
            "Route table built"
        );
        (router, skipped)
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Compile `pattern` and append it. On error the table is unchanged.
    pub fn add<F>(&mut self, pattern: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(Context<T>) -> bool + Send + Sync + 'static,
    {
        self.push(Route::new(pattern, handler)?);
        Ok(())
    }

    pub fn add_named<F>(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        handler: F,
    ) -> Result<(), PatternError>
    where
        F: Fn(Context<T>) -> bool + Send + Sync + 'static,
    {
        self.push(Route::named(name, pattern, handler)?);
        Ok(())
    }

    /// Append an already compiled route.
    pub fn push(&mut self, route: Route<T>) {
        tracing::debug!(
            route = %route.name(),
            pattern = %route.pattern(),
            position = self.routes.len(),
            "Route registered"
        );
        metrics::record_registration(RegistrationOutcome::Registered);
        self.routes.push(route);
    }

    /// Routes in registration (= lookup) order.
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Whether any route structurally matches `url`.
    pub fn can_open(&self, url: &Url) -> bool {
        self.first_match(url).is_some()
    }

    /// First route, in registration order, that structurally matches `url`.
    pub fn first_match(&self, url: &Url) -> Option<&Route<T>> {
        self.routes.iter().find(|route| route.can_respond(url))
    }

    /// First matching route together with its context. No handler runs.
    pub fn resolve(&self, url: &Url, mut user_info: Option<T>) -> Option<(&Route<T>, Context<T>)> {
        self.routes.iter().find_map(|route| {
            route
                .pattern()
                .capture(url)
                .map(|arguments| (route, route.context(url, arguments, user_info.take())))
        })
    }
}

impl<T: Clone> Router<T> {
    /// Dispatch `url` to the routes in order.
    ///
    /// Returns `true` when a handler claimed the URL. Under
    /// [`DispatchPolicy::FirstMatch`] the first structurally matching
    /// route's verdict is final; under [`DispatchPolicy::FallThrough`] a
    /// declining handler passes the URL on to the next matching route.
    pub fn open(&self, url: &Url, user_info: Option<T>) -> bool {
        let mut declined = false;

        for route in &self.routes {
            let Some(arguments) = route.pattern().capture(url) else {
                continue;
            };
            let context = route.context(url, arguments, user_info.clone());

            if route.invoke(context) {
                tracing::debug!(route = %route.name(), url = %url, "URL claimed");
                metrics::record_open(OpenOutcome::Claimed);
                return true;
            }

            declined = true;
            match self.policy {
                DispatchPolicy::FirstMatch => {
                    tracing::debug!(route = %route.name(), url = %url, "URL declined");
                    metrics::record_open(OpenOutcome::Declined);
                    return false;
                }
                DispatchPolicy::FallThrough => {
                    tracing::trace!(
                        route = %route.name(),
                        url = %url,
                        "URL declined, trying next route"
                    );
                }
            }
        }

        let outcome = if declined {
            OpenOutcome::Declined
        } else {
            OpenOutcome::Unmatched
        };
        tracing::debug!(url = %url, outcome = outcome.as_str(), "URL not handled");
        metrics::record_open(outcome);
        false
    }

    /// Parse `url` and dispatch it. An unparseable URL is not handled.
    pub fn open_str(&self, url: &str, user_info: Option<T>) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.open(&parsed, user_info),
            Err(error) => {
                tracing::debug!(url = %url, error = %error, "Ignoring unparseable URL");
                metrics::record_open(OpenOutcome::Unmatched);
                false
            }
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Router<T> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            policy: self.policy,
        }
    }
}

impl<T> std::fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("policy", &self.policy)
            .field("routes", &self.routes)
            .finish()
    }
}
