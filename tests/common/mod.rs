//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use deeplink_router::Context;
use url::Url;

/// Parse a URL, panicking on malformed test input.
pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Labels of handlers in the order they ran.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that logs `label` and answers `verdict`.
    pub fn handler<T>(
        &self,
        label: &str,
        verdict: bool,
    ) -> impl Fn(Context<T>) -> bool + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |_| {
            calls.lock().unwrap().push(label.clone());
            verdict
        }
    }

    /// A handler that stores the context it receives and claims the URL.
    pub fn capturing<T: Send + 'static>(
        &self,
        label: &str,
        sink: Arc<Mutex<Vec<Context<T>>>>,
    ) -> impl Fn(Context<T>) -> bool + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |context| {
            calls.lock().unwrap().push(label.clone());
            sink.lock().unwrap().push(context);
            true
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}
