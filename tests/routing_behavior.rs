//! End-to-end routing behavior through the public API.

use std::sync::{Arc, Mutex};

use deeplink_router::routing::{QueryItem, Route};
use deeplink_router::{Context, DispatchPolicy, PatternError, PatternUrl, Router};

mod common;
use common::{url, CallLog};

#[test]
fn test_scheme_mismatch_never_matches() {
    let pattern = PatternUrl::compile("a://h/x").unwrap();
    assert!(pattern.capture(&url("b://h/x")).is_none());
    assert!(pattern.capture(&url("a://h/x")).is_some());
}

#[test]
fn test_segment_count_must_be_equal() {
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router.add("app://host/a/b", log.handler("ab", true)).unwrap();

    assert!(!router.open(&url("app://host/a"), None));
    assert!(!router.open(&url("app://host/a/b/c"), None));
    assert!(log.is_empty());
    assert!(router.open(&url("app://host/a/b"), None));
}

#[test]
fn test_path_and_host_placeholders() {
    let sink = Arc::new(Mutex::new(Vec::new()));
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router
        .add("app://host/user/:id", log.capturing("user", Arc::clone(&sink)))
        .unwrap();
    router
        .add("app://:tenant/path", log.capturing("tenant", Arc::clone(&sink)))
        .unwrap();

    assert!(router.open(&url("app://host/user/42"), None));
    assert!(router.open(&url("app://acme/path"), None));

    let contexts = sink.lock().unwrap();
    assert_eq!(contexts[0].argument("id"), Some("42"));
    assert_eq!(contexts[1].argument("tenant"), Some("acme"));
    assert_eq!(log.calls(), vec!["user", "tenant"]);
}

#[test]
fn test_literal_host_mismatch() {
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router.add("app://literalhost/x", log.handler("r", true)).unwrap();

    assert!(!router.open(&url("app://otherhost/x"), None));
    assert!(log.is_empty());
}

#[test]
fn test_query_parameters_pass_through_in_order() {
    let sink = Arc::new(Mutex::new(Vec::new()));
    let mut router: Router = Router::new();
    router
        .add("app://h/x", CallLog::new().capturing("x", Arc::clone(&sink)))
        .unwrap();

    assert!(router.open(&url("app://h/x?a=1&a=2&b=3"), None));

    let contexts = sink.lock().unwrap();
    let ctx = &contexts[0];
    assert!(ctx.arguments().is_empty());
    assert_eq!(
        ctx.parameters(),
        &[
            QueryItem::new("a", Some("1".into())),
            QueryItem::new("a", Some("2".into())),
            QueryItem::new("b", Some("3".into())),
        ]
    );
    assert_eq!(ctx.url().as_str(), "app://h/x?a=1&a=2&b=3");
}

#[test]
fn test_first_claiming_route_stops_dispatch() {
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router.add("app://host/user/:id", log.handler("r1", true)).unwrap();
    router.add("app://host/user/:uid", log.handler("r2", true)).unwrap();

    assert!(router.open(&url("app://host/user/7"), None));
    assert_eq!(log.calls(), vec!["r1"]);
}

#[test]
fn test_exhaustion_invokes_no_handler() {
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router.add("app://host/user/:id", log.handler("r1", true)).unwrap();
    router.add("app://host/post/:id", log.handler("r2", true)).unwrap();

    assert!(!router.open(&url("app://host/settings/privacy"), None));
    assert!(!router.open(&url("other://host/user/1"), None));
    assert!(log.is_empty());
}

#[test]
fn test_match_but_decline_paths() {
    let fall_through = CallLog::new();
    let mut router: Router = Router::with_policy(DispatchPolicy::FallThrough);
    router.add("app://host/item/:id", fall_through.handler("decline", false)).unwrap();
    router.add("app://host/item/:key", fall_through.handler("accept", true)).unwrap();
    assert!(router.open(&url("app://host/item/1"), None));
    assert_eq!(fall_through.calls(), vec!["decline", "accept"]);

    let first_match = CallLog::new();
    let mut router: Router = Router::with_policy(DispatchPolicy::FirstMatch);
    router.add("app://host/item/:id", first_match.handler("decline", false)).unwrap();
    router.add("app://host/item/:key", first_match.handler("accept", true)).unwrap();
    assert!(!router.open(&url("app://host/item/1"), None));
    assert_eq!(first_match.calls(), vec!["decline"]);
}

#[test]
fn test_bad_registration_does_not_poison_table() {
    let log = CallLog::new();
    let mut router: Router = Router::new();
    router.add("app://host/ok", log.handler("ok", true)).unwrap();

    let err = router.add("app://host/:id/:id", log.handler("dup", true)).unwrap_err();
    assert_eq!(err, PatternError::DuplicatePlaceholder("id".into()));
    assert_eq!(router.len(), 1);
    assert!(router.open(&url("app://host/ok"), None));
}

#[test]
fn test_user_info_is_passed_through() {
    let received = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&received);
    let mut router: Router<(u32, String)> = Router::new();
    router
        .add("app://checkout/:step", move |ctx: Context<(u32, String)>| {
            *slot.lock().unwrap() = ctx.into_user_info();
            true
        })
        .unwrap();

    assert!(router.open(&url("app://checkout/pay"), Some((3, "cart".into()))));
    assert_eq!(*received.lock().unwrap(), Some((3, "cart".to_string())));
}

#[test]
fn test_route_can_respond_matches_parse() {
    let route: Route = Route::new("myapp://user/:id/posts", |_| true).unwrap();
    for candidate in [
        "myapp://user/1/posts",
        "myapp://user/1/posts/",
        "myapp://user/1",
        "myapp://user//1/posts",
        "MYAPP://user/1/posts",
        "myapp://USER/1/posts",
    ] {
        let u = url(candidate);
        assert_eq!(route.can_respond(&u), route.parse(&u, None).is_some(), "{candidate}");
    }
}

#[test]
fn test_percent_encoding_is_decoded_before_comparison() {
    let sink = Arc::new(Mutex::new(Vec::new()));
    let mut router: Router = Router::new();
    router
        .add("myapp://search/café/:term", CallLog::new().capturing("s", Arc::clone(&sink)))
        .unwrap();

    assert!(router.open(&url("myapp://search/caf%C3%A9/new%20york?q=a%26b"), None));
    let contexts = sink.lock().unwrap();
    assert_eq!(contexts[0].argument("term"), Some("new york"));
    assert_eq!(contexts[0].parameter("q"), Some("a&b"));
}
