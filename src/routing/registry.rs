//! Named handlers for route tables loaded from configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::context::Context;
use crate::routing::route::Handler;

/// Handler name -> handler.
///
/// A configuration file can only refer to handlers by name; the host
/// application registers the actual callables here before building a
/// [`Router`](crate::routing::Router) from that configuration.
pub struct HandlerRegistry<T = ()> {
    handlers: HashMap<String, Handler<T>>,
}

impl<T> HandlerRegistry<T> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(Context<T>) -> bool + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(handler))
    }

    pub fn register_shared(&mut self, name: impl Into<String>, handler: Handler<T>) -> &mut Self {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::debug!(handler = %name, "Handler replaced");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Handler<T>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for HandlerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandlerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &names)
            .finish()
    }
}
