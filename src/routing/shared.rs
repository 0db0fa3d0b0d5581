//! Route table that can be replaced while lookups are running.
//!
//! # Design Decisions
//! - Lookups load a snapshot without locking
//! - Replacement swaps the whole table atomically; in-flight lookups finish
//!   against the snapshot they started with

use std::sync::Arc;

use arc_swap::ArcSwap;
use url::Url;

use crate::routing::router::Router;

/// Atomically swappable [`Router`].
pub struct SharedRouter<T = ()> {
    current: ArcSwap<Router<T>>,
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// The table currently in use.
    pub fn snapshot(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    /// Install `router` and return the table it replaced.
    pub fn replace(&self, router: Router<T>) -> Arc<Router<T>> {
        let routes = router.len();
        let previous = self.current.swap(Arc::new(router));
        tracing::info!(routes, previous_routes = previous.len(), "Route table replaced");
        previous
    }

    pub fn can_open(&self, url: &Url) -> bool {
        self.current.load().can_open(url)
    }
}

impl<T: Clone> SharedRouter<T> {
    pub fn open(&self, url: &Url, user_info: Option<T>) -> bool {
        // Handlers may run for a while; hold a full Arc rather than a guard slot.
        self.snapshot().open(url, user_info)
    }
}

impl<T> From<Router<T>> for SharedRouter<T> {
    fn from(router: Router<T>) -> Self {
        Self::new(router)
    }
}

impl<T> std::fmt::Debug for SharedRouter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter")
            .field("current", &*self.current.load())
            .finish()
    }
}
