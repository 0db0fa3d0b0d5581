//! Concrete URL decomposition.
//!
//! # Responsibilities
//! - Split a parsed URL path into ordered path components
//! - Percent-decode path components
//! - Extract query items in URL order
//!
//! # Design Decisions
//! - Patterns and concrete URLs go through the same decomposition, so
//!   component comparison is plain string equality
//! - A rooted path yields `"/"` as its first component; empty segments
//!   (trailing or doubled slashes) are dropped
//! - Query items keep their order and duplicates; `+` is not a space

use std::borrow::Cow;

use url::Url;

use crate::routing::context::QueryItem;

/// Component standing for the root of a rooted path.
pub const ROOT_COMPONENT: &str = "/";

/// Path components of `url`, still percent-encoded.
///
/// ```text
/// ""        -> []
/// "/"       -> ["/"]
/// "/a/b/"   -> ["/", "a", "b"]
/// "/a//b"   -> ["/", "a", "b"]
/// ```
pub fn raw_path_components(url: &Url) -> Vec<&str> {
    let path = url.path();
    let mut components = Vec::new();

    let rest = match path.strip_prefix('/') {
        Some(rest) => {
            components.push(ROOT_COMPONENT);
            rest
        }
        None => path,
    };
    components.extend(rest.split('/').filter(|segment| !segment.is_empty()));
    components
}

/// Path components of `url`, percent-decoded.
pub fn path_components(url: &Url) -> Vec<Cow<'_, str>> {
    raw_path_components(url)
        .into_iter()
        .map(decode_component)
        .collect()
}

/// Percent-decode a single component.
///
/// Sequences that do not decode to UTF-8 leave the component untouched.
pub fn decode_component(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Query items of `url` in the order they appear.
pub fn query_items(url: &Url) -> Vec<QueryItem> {
    let Some(query) = url.query() else {
        return Vec::new();
    };

    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((name, value)) => QueryItem::new(
                decode_component(name),
                Some(decode_component(value).into_owned()),
            ),
            None => QueryItem::new(decode_component(piece), None),
        })
        .collect()
}
