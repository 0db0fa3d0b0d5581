//! Pattern compilation and structural matching.
//!
//! # Responsibilities
//! - Compile `scheme://host_or_placeholder/segment/...` into a `PatternUrl`
//! - Reject malformed patterns with a typed `PatternError`
//! - Match a concrete URL component-by-component and capture placeholders
//!
//! # Design Decisions
//! - Compilation is the only validation point; a `PatternUrl` is immutable
//!   and always well-formed
//! - Patterns run through the same URL parser as concrete URLs (a
//!   placeholder host is swapped for a stand-in first), so hosts and path
//!   components are compared in canonical, percent-decoded form
//! - Schemes compare exactly. The URL parser lowercases every concrete
//!   scheme, so a pattern scheme containing uppercase letters is rejected
//!   instead of compiled into a route that can never match
//! - Placeholders are classified before percent-decoding: `%3Aid` is the
//!   literal `:id`
//! - A placeholder identifier may appear only once per pattern
//! - Segment counts must be equal; there are no optional or repeated segments

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::routing::context::Arguments;
use crate::routing::matcher::{decode_component, path_components, raw_path_components};

/// Marks a host or path segment as a placeholder.
pub const PLACEHOLDER_PREFIX: char = ':';

const SCHEME_SEPARATOR: &str = "://";

/// Host used to parse patterns whose host is a placeholder.
const STAND_IN_HOST: &str = "placeholder.invalid";

/// Errors raised while compiling a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern \"{0}\" has no scheme")]
    MissingScheme(String),

    /// Not `[A-Za-z][A-Za-z0-9+.-]*`, or contains uppercase letters.
    #[error("invalid scheme \"{0}\"")]
    InvalidScheme(String),

    #[error("pattern \"{0}\" has no host")]
    MissingHost(String),

    /// Empty identifier or characters outside `[A-Za-z0-9_-]`.
    #[error("invalid placeholder \"{0}\"")]
    InvalidPlaceholder(String),

    #[error("placeholder \"{0}\" appears more than once")]
    DuplicatePlaceholder(String),

    /// Userinfo or an explicit port.
    #[error("pattern \"{0}\" may not carry userinfo or a port")]
    UnsupportedAuthority(String),

    #[error("pattern \"{0}\" may not carry a query or fragment")]
    UnexpectedQuery(String),

    #[error("malformed pattern \"{pattern}\": {source}")]
    Malformed {
        pattern: String,
        #[source]
        source: url::ParseError,
    },
}

/// One host or path position of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matched by exact string equality.
    Literal(String),

    /// Captures whatever sits at this position under the given identifier.
    Placeholder(String),
}

impl Segment {
    /// Classify a raw (still percent-encoded) path segment.
    fn from_raw(raw: &str) -> Result<Self, PatternError> {
        match raw.strip_prefix(PLACEHOLDER_PREFIX) {
            Some(identifier) => placeholder(identifier, raw),
            None => Ok(Segment::Literal(decode_component(raw).into_owned())),
        }
    }

    pub fn placeholder_name(&self) -> Option<&str> {
        match self {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(literal) => f.write_str(literal),
            Segment::Placeholder(name) => write!(f, "{PLACEHOLDER_PREFIX}{name}"),
        }
    }
}

fn placeholder(identifier: &str, raw: &str) -> Result<Segment, PatternError> {
    let valid = !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(Segment::Placeholder(identifier.to_string()))
    } else {
        Err(PatternError::InvalidPlaceholder(raw.to_string()))
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
        })
}

/// A compiled URL pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternUrl {
    source: String,
    scheme: String,
    host: Segment,
    path: Vec<Segment>,
}

impl PatternUrl {
    /// Compile a pattern string.
    ///
    /// ```text
    /// myapp://user/:id        scheme "myapp", host "user", path ["/", :id]
    /// myapp://:tenant/home    host placeholder "tenant", path ["/", "home"]
    /// myapp://settings        empty path, matches only URLs with no path
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let (scheme, rest) = pattern
            .split_once(SCHEME_SEPARATOR)
            .filter(|(scheme, _)| !scheme.is_empty())
            .ok_or_else(|| PatternError::MissingScheme(pattern.to_string()))?;
        if !is_valid_scheme(scheme) {
            return Err(PatternError::InvalidScheme(scheme.to_string()));
        }

        let host_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
        let (host_token, remainder) = rest.split_at(host_end);
        if host_token.is_empty() {
            return Err(PatternError::MissingHost(pattern.to_string()));
        }

        let host_placeholder = match host_token.strip_prefix(PLACEHOLDER_PREFIX) {
            Some(identifier) => Some(placeholder(identifier, host_token)?),
            None => None,
        };
        let parse_host = if host_placeholder.is_some() {
            STAND_IN_HOST
        } else {
            host_token
        };

        let url = Url::parse(&format!("{scheme}{SCHEME_SEPARATOR}{parse_host}{remainder}"))
            .map_err(|source| PatternError::Malformed {
                pattern: pattern.to_string(),
                source,
            })?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(PatternError::UnexpectedQuery(pattern.to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() || url.port().is_some() {
            return Err(PatternError::UnsupportedAuthority(pattern.to_string()));
        }

        let host = match host_placeholder {
            Some(segment) => segment,
            None => match url.host_str() {
                Some(host) if !host.is_empty() => {
                    Segment::Literal(decode_component(host).into_owned())
                }
                _ => return Err(PatternError::MissingHost(pattern.to_string())),
            },
        };

        let mut seen: HashSet<&str> = HashSet::new();
        if let Some(name) = host.placeholder_name() {
            seen.insert(name);
        }
        let path = raw_path_components(&url)
            .into_iter()
            .map(Segment::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        for name in path.iter().filter_map(Segment::placeholder_name) {
            if !seen.insert(name) {
                return Err(PatternError::DuplicatePlaceholder(name.to_string()));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            scheme: url.scheme().to_string(),
            host,
            path,
        })
    }

    /// The pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The scheme, exactly as written in the pattern.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &Segment {
        &self.host
    }

    /// Path components, the root (`"/"`) included when the path is rooted.
    pub fn path_components(&self) -> &[Segment] {
        &self.path
    }

    /// Placeholder identifiers, host first, then path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.host)
            .chain(self.path.iter())
            .filter_map(Segment::placeholder_name)
    }

    /// Match `url` against this pattern and capture placeholder values.
    ///
    /// Returns `None` on any mismatch: missing host, different scheme,
    /// different number of path components, or an unequal literal.
    pub fn capture(&self, url: &Url) -> Option<Arguments> {
        let host = url.host_str().filter(|host| !host.is_empty()).map(decode_component)?;
        if url.scheme() != self.scheme {
            return None;
        }

        let components = path_components(url);
        if components.len() != self.path.len() {
            return None;
        }

        let mut arguments = Arguments::new();
        match &self.host {
            Segment::Placeholder(name) => {
                arguments.insert(name.clone(), host.into_owned());
            }
            Segment::Literal(literal) if literal.as_str() == host.as_ref() => {}
            Segment::Literal(_) => return None,
        }

        for (segment, component) in self.path.iter().zip(components) {
            match segment {
                Segment::Placeholder(name) => {
                    arguments.insert(name.clone(), component.into_owned());
                }
                Segment::Literal(literal) if literal.as_str() == component.as_ref() => {}
                Segment::Literal(_) => return None,
            }
        }

        Some(arguments)
    }

    pub fn matches(&self, url: &Url) -> bool {
        self.capture(url).is_some()
    }
}

impl FromStr for PatternUrl {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for PatternUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
