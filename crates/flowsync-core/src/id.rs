//! Identity newtypes for flow documents.
//!
//! A [`UserId`] is the document key. It is supplied by the client and never
//! validated beyond defaulting an empty or missing value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a flow document: one document per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Key used when a request carries no user id.
    pub const DEFAULT: &'static str = "default_user";

    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// Uses `raw` when it is present and non-empty, else [`UserId::DEFAULT`].
    pub fn or_default(raw: Option<String>) -> Self {
        match raw {
            Some(id) if !id.is_empty() => UserId(id),
            _ => UserId(Self::DEFAULT.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        UserId(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(id.to_string())
    }
}
