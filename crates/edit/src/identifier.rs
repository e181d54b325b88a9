//! Namespaced identifiers (`namespace:path`), the only key both type systems
//! agree on.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("invalid namespace in `{0}`")]
    InvalidNamespace(String),
    #[error("invalid path in `{0}`")]
    InvalidPath(String),
}

/// A normalized `namespace:path` key.
///
/// Always lower-case. A missing namespace parses as `minecraft`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    full: Arc<str>,
    /// Byte offset of the `:`.
    split: usize,
}

impl Identifier {
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Parse and normalize. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, IdentifierError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(IdentifierError::Empty);
        }
        let lower = text.to_ascii_lowercase();
        let (namespace, path) = match lower.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (Self::DEFAULT_NAMESPACE, lower.as_str()),
        };
        Self::new(namespace, path).map_err(|err| match err {
            IdentifierError::InvalidNamespace(_) => IdentifierError::InvalidNamespace(text.to_string()),
            IdentifierError::InvalidPath(_) => IdentifierError::InvalidPath(text.to_string()),
            IdentifierError::Empty => IdentifierError::Empty,
        })
    }

    /// Build from already separated parts. Parts are lower-cased but
    /// otherwise must be valid as given.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        let namespace = namespace.to_ascii_lowercase();
        let path = path.to_ascii_lowercase();
        if namespace.is_empty() || !namespace.bytes().all(valid_namespace_byte) {
            return Err(IdentifierError::InvalidNamespace(format!("{namespace}:{path}")));
        }
        if path.is_empty() || !path.bytes().all(valid_path_byte) {
            return Err(IdentifierError::InvalidPath(format!("{namespace}:{path}")));
        }
        Ok(Self {
            split: namespace.len(),
            full: format!("{namespace}:{path}").into(),
        })
    }

    /// Shorthand for `minecraft:<path>`.
    pub fn minecraft(path: &str) -> Result<Self, IdentifierError> {
        Self::new(Self::DEFAULT_NAMESPACE, path)
    }

    pub fn namespace(&self) -> &str {
        &self.full[..self.split]
    }

    pub fn path(&self) -> &str {
        &self.full[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

fn valid_namespace_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-')
}

fn valid_path_byte(b: u8) -> bool {
    valid_namespace_byte(b) || b == b'/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.full)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.full.to_string()
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_offsets() {
        let id = Identifier::parse("Plugin.X:Some/Path").unwrap();
        assert_eq!(id.namespace(), "plugin.x");
        assert_eq!(id.path(), "some/path");
        assert_eq!(id.as_str(), "plugin.x:some/path");
    }

    #[test]
    fn error_keeps_original_text() {
        let err = Identifier::parse("bad ns:stone").unwrap_err();
        assert_eq!(err, IdentifierError::InvalidNamespace("bad ns:stone".into()));
    }
}
