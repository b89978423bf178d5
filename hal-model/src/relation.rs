//! Link relations
//!
//! A relation is a plain string, optionally namespaced as `curie:local`.
//! Registered (IANA) relations are never namespaced.

use crate::error::{ModelError, Result};
use hal_vocab::{is_iana_rel, messages, relations::CURIE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A link relation, compared by its exact string value
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relation(Arc<str>);

impl Relation {
    /// Create a relation from its string value
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    /// Create a namespaced relation `curie:local`
    ///
    /// Fails if the curie name is empty.
    pub fn curied(curie: &str, local: &str) -> Result<Self> {
        if curie.is_empty() {
            return Err(ModelError::EmptyCurieName);
        }
        Ok(Self::new(format!("{curie}{CURIE_SEPARATOR}{local}")))
    }

    /// Get the full string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the curie prefix, if the relation is namespaced
    pub fn curie(&self) -> Option<&str> {
        split_curie(&self.0).map(|(prefix, _)| prefix)
    }

    /// Get the relation without its curie prefix
    pub fn local_part(&self) -> &str {
        split_curie(&self.0).map_or(&self.0, |(_, local)| local)
    }

    /// Whether the relation carries a curie prefix
    pub fn is_curied(&self) -> bool {
        split_curie(&self.0).is_some()
    }

    /// Whether the relation is a registered IANA relation
    pub fn is_iana(&self) -> bool {
        is_iana_rel(&self.0)
    }

    /// Whether the relation is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Prefix the relation with the given curie unless it is already
    /// namespaced or registered.
    pub fn curie_if_uncuried(&self, curie: &str) -> Self {
        if curie.is_empty() || self.is_curied() || self.is_iana() {
            return self.clone();
        }
        Self::new(format!("{curie}{CURIE_SEPARATOR}{}", self.0))
    }

    /// Apply a transformation to the local part, keeping the curie prefix
    pub fn map_local_part(&self, f: impl FnOnce(&str) -> String) -> Self {
        match split_curie(&self.0) {
            Some((prefix, local)) => Self::new(format!("{prefix}{CURIE_SEPARATOR}{}", f(local))),
            None => Self::new(f(&self.0)),
        }
    }

    /// Message codes used to look up a title for this relation
    ///
    /// The full value is tried first, then the local part of a namespaced
    /// relation.
    pub fn message_codes(&self) -> Vec<String> {
        let mut codes = vec![messages::title_code(&self.0)];
        if self.is_curied() {
            codes.push(messages::title_code(self.local_part()));
        }
        codes
    }
}

/// Split `prefix:local`. Absolute URIs (`http://...`) and prefixes
/// containing a path are not curies.
fn split_curie(value: &str) -> Option<(&str, &str)> {
    let idx = value.find(CURIE_SEPARATOR)?;
    let (prefix, rest) = value.split_at(idx);
    let local = &rest[1..];
    if prefix.is_empty() || prefix.contains('/') || local.starts_with("//") {
        return None;
    }
    Some((prefix, local))
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Relation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Relation {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for Relation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Relation {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Relation {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
