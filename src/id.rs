//! Entity identity - opaque, client-generated string tokens
//!
//! Every story, chapter, choice and media item receives a fresh id before
//! it is first persisted; the store never assigns identities.
//!
//! New ids are random UUIDs rendered in hyphenated form:
//! - `3f1c9a52-8d1e-4a7b-9c36-2b8f0e6d4a11`

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Opaque unique identity shared by all entity kinds.
///
/// Stored and compared as a plain string. [`EntityId::parse`] validates ids
/// typed by a user; ids read back from the database are taken as they are,
/// whoever wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse an id from its string form
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::InvalidId("id must not be empty".to_string()));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(Error::InvalidId(format!("id must not contain whitespace: {:?}", raw)));
        }
        Ok(Self(raw.to_string()))
    }

    /// Wrap an id exactly as it was stored
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntityId::generate();
        let b = EntityId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_accepts_opaque_tokens() {
        let id = EntityId::parse("chapter-7").unwrap();
        assert_eq!(id.as_str(), "chapter-7");
        assert_eq!(id.to_string(), "chapter-7");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(EntityId::parse("").is_err());
        assert!(EntityId::parse("two words").is_err());
        assert!("tab\tid".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_stored_ids_are_not_validated() {
        let id = EntityId::from_stored("legacy id".to_string());
        assert_eq!(id.as_str(), "legacy id");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::parse("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
