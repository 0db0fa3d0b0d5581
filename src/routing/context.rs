//! Match results handed to route handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder identifier -> captured value.
pub type Arguments = BTreeMap<String, String>;

/// A single `name[=value]` pair from a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryItem {
    pub name: String,

    /// `None` when the item carried no `=` at all.
    pub value: Option<String>,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Everything a successful match extracted from a URL.
///
/// Built fresh for every match and consumed by the route's handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context<T = ()> {
    url: Url,
    arguments: Arguments,
    parameters: Vec<QueryItem>,
    user_info: Option<T>,
}

impl<T> Context<T> {
    pub(crate) fn new(
        url: Url,
        arguments: Arguments,
        parameters: Vec<QueryItem>,
        user_info: Option<T>,
    ) -> Self {
        Self {
            url,
            arguments,
            parameters,
            user_info,
        }
    }

    /// The matched URL, exactly as it was passed in.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Values captured by the pattern's placeholders.
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    /// Query items in URL order, duplicates included.
    pub fn parameters(&self) -> &[QueryItem] {
        &self.parameters
    }

    /// Value of the first query item called `name`.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|item| item.name == name)
            .and_then(|item| item.value.as_deref())
    }

    /// Every value given for `name`, in order. Items without a value are skipped.
    pub fn parameter_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.parameters
            .iter()
            .filter(move |item| item.name == name)
            .filter_map(|item| item.value.as_deref())
    }

    pub fn user_info(&self) -> Option<&T> {
        self.user_info.as_ref()
    }

    pub fn into_user_info(self) -> Option<T> {
        self.user_info
    }
}
