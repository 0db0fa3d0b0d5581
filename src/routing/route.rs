//! A compiled pattern bound to a handler.
//!
//! # Responsibilities
//! - Compile the pattern once, at registration
//! - Answer "would this route respond?" without side effects
//! - Build a `Context` for a matching URL and hand it to the handler
//!
//! # Design Decisions
//! - Non-matches are `None` / `false`, never errors
//! - The handler's boolean is the claim signal and is returned unchanged
//! - Handlers are `Arc`ed so one handler can serve several routes

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::routing::context::{Arguments, Context};
use crate::routing::matcher::query_items;
use crate::routing::pattern::{PatternError, PatternUrl};

/// Callable invoked with the context of a matched URL.
///
/// Returns `true` when it claims (fully handles) the URL.
pub type Handler<T> = Arc<dyn Fn(Context<T>) -> bool + Send + Sync>;

/// One entry of a route table.
pub struct Route<T = ()> {
    name: String,
    pattern: PatternUrl,
    handler: Handler<T>,
}

impl<T> Route<T> {
    /// Compile `pattern` and bind it to `handler`. The route is named after its pattern.
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(Context<T>) -> bool + Send + Sync + 'static,
    {
        Self::with_handler(pattern, pattern, Arc::new(handler))
    }

    pub fn named<F>(
        name: impl Into<String>,
        pattern: &str,
        handler: F,
    ) -> Result<Self, PatternError>
    where
        F: Fn(Context<T>) -> bool + Send + Sync + 'static,
    {
        Self::with_handler(name, pattern, Arc::new(handler))
    }

    /// Like [`Route::named`], for a handler that is already shared.
    pub fn with_handler(
        name: impl Into<String>,
        pattern: &str,
        handler: Handler<T>,
    ) -> Result<Self, PatternError> {
        let pattern = PatternUrl::compile(pattern)?;
        Ok(Self::from_pattern(name, pattern, handler))
    }

    pub fn from_pattern(name: impl Into<String>, pattern: PatternUrl, handler: Handler<T>) -> Self {
        Self {
            name: name.into(),
            pattern,
            handler,
        }
    }

    /// Route identifier used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PatternUrl {
        &self.pattern
    }

    /// Whether [`Route::parse`] would succeed for `url`. Never calls the handler.
    pub fn can_respond(&self, url: &Url) -> bool {
        self.pattern.matches(url)
    }

    /// Match `url` and build the handler's context.
    pub fn parse(&self, url: &Url, user_info: Option<T>) -> Option<Context<T>> {
        self.pattern
            .capture(url)
            .map(|arguments| self.context(url, arguments, user_info))
    }

    /// Parse `url` and, on a match, return the handler's verdict.
    ///
    /// `false` means either no match or a declining handler.
    pub fn open_if_possible(&self, url: &Url, user_info: Option<T>) -> bool {
        match self.parse(url, user_info) {
            Some(context) => self.invoke(context),
            None => false,
        }
    }

    pub(crate) fn context(
        &self,
        url: &Url,
        arguments: Arguments,
        user_info: Option<T>,
    ) -> Context<T> {
        Context::new(url.clone(), arguments, query_items(url), user_info)
    }

    pub(crate) fn invoke(&self, context: Context<T>) -> bool {
        (self.handler)(context)
    }
}

impl<T> Clone for Route<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_builds_context() {
        let route: Route<u32> = Route::new("myapp://user/:id", |_| true).unwrap();
        let ctx = route
            .parse(&url("myapp://user/42?tab=posts&tab=likes"), Some(7))
            .unwrap();

        assert_eq!(ctx.url().as_str(), "myapp://user/42?tab=posts&tab=likes");
        assert_eq!(ctx.argument("id"), Some("42"));
        assert_eq!(ctx.parameter_values("tab").collect::<Vec<_>>(), vec!["posts", "likes"]);
        assert_eq!(ctx.user_info(), Some(&7));
    }

    #[test]
    fn test_parse_non_match_is_none() {
        let route: Route = Route::new("myapp://user/:id", |_| true).unwrap();
        assert!(route.parse(&url("myapp://user"), None).is_none());
        assert!(route.parse(&url("other://user/42"), None).is_none());
    }

    #[test]
    fn test_can_respond_does_not_invoke_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let route: Route = Route::new("myapp://user/:id", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        assert!(route.can_respond(&url("myapp://user/1")));
        assert!(!route.can_respond(&url("myapp://user")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_open_if_possible_returns_handler_verdict() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let accepting: Route = Route::new("myapp://user/:id", move |ctx| {
            sink.lock().unwrap().push(ctx.argument("id").unwrap_or_default().to_string());
            true
        })
        .unwrap();
        let declining: Route = Route::new("myapp://user/:id", |_| false).unwrap();

        assert!(accepting.open_if_possible(&url("myapp://user/9"), None));
        assert!(!declining.open_if_possible(&url("myapp://user/9"), None));
        assert!(!accepting.open_if_possible(&url("myapp://post/9"), None));
        assert_eq!(*seen.lock().unwrap(), vec!["9".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result: Result<Route, _> = Route::new("not a pattern", |_| true);
        assert!(matches!(result, Err(PatternError::MissingScheme(_))));
    }

    #[test]
    fn test_default_name_is_pattern() {
        let route: Route = Route::new("myapp://home", |_| true).unwrap();
        assert_eq!(route.name(), "myapp://home");
        let named: Route = Route::named("home", "myapp://home", |_| true).unwrap();
        assert_eq!(named.name(), "home");
        assert_eq!(named.pattern().as_str(), "myapp://home");
    }
}
