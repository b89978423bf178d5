//! Title resolution for link relations
//!
//! Titles come from an external message source, looked up by code:
//! `_links.<rel>.title` first, then `_links.<local part>.title` for
//! namespaced relations. An empty message counts as no title.

use hal_model::Relation;
use std::collections::HashMap;

/// Resolves a message for the first known code
pub trait MessageResolver: Send + Sync {
    /// Resolve the first code that has a message, in order
    fn resolve(&self, codes: &[String]) -> Option<String>;
}

/// Resolves nothing
#[derive(Clone, Debug, Default)]
pub struct NoMessages;

impl MessageResolver for NoMessages {
    fn resolve(&self, _codes: &[String]) -> Option<String> {
        None
    }
}

/// In-memory message table
#[derive(Clone, Debug, Default)]
pub struct MapMessageResolver {
    messages: HashMap<String, String>,
}

impl MapMessageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message, builder style
    pub fn with_message(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<HashMap<String, String>> for MapMessageResolver {
    fn from(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }
}

impl MessageResolver for MapMessageResolver {
    fn resolve(&self, codes: &[String]) -> Option<String> {
        codes.iter().find_map(|code| self.messages.get(code).cloned())
    }
}

/// Title for a relation, or `None` when unresolved or empty
pub fn title_for(resolver: &dyn MessageResolver, relation: &Relation) -> Option<String> {
    relation
        .message_codes()
        .into_iter()
        .find_map(|code| resolver.resolve(std::slice::from_ref(&code)).filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_relation_code_first() {
        let resolver = MapMessageResolver::new()
            .with_message("_links.ns:foobar.title", "full")
            .with_message("_links.foobar.title", "local");
        assert_eq!(
            title_for(&resolver, &Relation::new("ns:foobar")).as_deref(),
            Some("full")
        );
    }

    #[test]
    fn test_falls_back_to_local_part() {
        let resolver =
            MapMessageResolver::new().with_message("_links.foobar.title", "Foobar's title!");
        assert_eq!(
            title_for(&resolver, &Relation::new("ns:foobar")).as_deref(),
            Some("Foobar's title!")
        );
    }

    #[test]
    fn test_empty_title_counts_as_unresolved() {
        let resolver = MapMessageResolver::new()
            .with_message("_links.ns:foobar.title", "")
            .with_message("_links.foobar.title", "local");
        assert_eq!(
            title_for(&resolver, &Relation::new("ns:foobar")).as_deref(),
            Some("local")
        );

        let resolver = MapMessageResolver::new().with_message("_links.self.title", "");
        assert_eq!(title_for(&resolver, &Relation::new("self")), None);
    }

    #[test]
    fn test_no_messages() {
        assert_eq!(title_for(&NoMessages, &Relation::new("self")), None);
    }
}
