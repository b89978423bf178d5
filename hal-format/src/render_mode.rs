//! Single-vs-array rendering of link relations
//!
//! A relation with one link renders either as the bare link object or as a
//! one-element array. The default applies unless an override matches:
//!
//! ```json
//! // RenderMode::Single
//! {"_links": {"self": {"href": "/orders/1"}}}
//!
//! // RenderMode::Array
//! {"_links": {"self": [{"href": "/orders/1"}]}}
//! ```
//!
//! Overrides are keyed by patterns. A literal pattern beats every wildcard
//! pattern; among wildcard patterns the first registered match wins.

use crate::error::{HalError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a relation holding a single link is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Bare object (default)
    #[default]
    Single,
    /// Array, even for one link
    Array,
}

/// A relation pattern with path-style wildcards
///
/// - `?` matches one character within a path segment
/// - `*` matches any characters within a path segment
/// - `**` matches across segments
/// - a trailing `/**` also matches the prefix itself
#[derive(Debug, Clone)]
pub struct RelationPattern {
    source: String,
    matcher: Option<Regex>,
}

impl RelationPattern {
    /// Compile a pattern
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if source.is_empty() {
            return Err(HalError::invalid_pattern(source, "pattern must not be empty"));
        }
        let matcher = if is_wildcard(&source) {
            let compiled = Regex::new(&to_regex(&source))
                .map_err(|e| HalError::invalid_pattern(&source, e.to_string()))?;
            Some(compiled)
        } else {
            None
        };
        Ok(Self { source, matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern contains no wildcard
    pub fn is_literal(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn matches(&self, relation: &str) -> bool {
        match &self.matcher {
            Some(regex) => regex.is_match(relation),
            None => self.source == relation,
        }
    }
}

impl PartialEq for RelationPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RelationPattern {}

fn is_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Translate a wildcard pattern into an anchored regex
fn to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if rest == "/**" {
            out.push_str("(/.*)?");
            rest = "";
        } else if rest.starts_with("**") {
            out.push_str(".*");
            rest = &rest[2..];
        } else {
            match c {
                '*' => out.push_str("[^/]*"),
                '?' => out.push_str("[^/]"),
                other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
            rest = &rest[c.len_utf8()..];
        }
    }
    out.push('$');
    out
}

/// Default render mode plus ordered pattern overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModeConfiguration {
    default_mode: RenderMode,
    overrides: Vec<(RelationPattern, RenderMode)>,
}

impl RenderModeConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_mode(&self) -> RenderMode {
        self.default_mode
    }

    /// Copy with a different default mode
    pub fn with_render_mode(&self, mode: RenderMode) -> Self {
        Self {
            default_mode: mode,
            overrides: self.overrides.clone(),
        }
    }

    /// Copy with an override for relations matching `pattern`
    ///
    /// Registering the same pattern again replaces its mode and keeps its
    /// position.
    pub fn with_override_for(&self, pattern: &str, mode: RenderMode) -> Result<Self> {
        let pattern = RelationPattern::new(pattern)?;
        let mut overrides = self.overrides.clone();
        match overrides.iter_mut().find(|(p, _)| *p == pattern) {
            Some(existing) => existing.1 = mode,
            None => overrides.push((pattern, mode)),
        }
        Ok(Self {
            default_mode: self.default_mode,
            overrides,
        })
    }

    /// The explicitly configured mode for a relation, if any override matches
    pub fn override_for(&self, relation: &str) -> Option<RenderMode> {
        let literal = self
            .overrides
            .iter()
            .find(|(p, _)| p.is_literal() && p.matches(relation));
        literal
            .or_else(|| {
                self.overrides
                    .iter()
                    .find(|(p, _)| !p.is_literal() && p.matches(relation))
            })
            .map(|(_, mode)| *mode)
    }

    /// The mode for a relation: matching override, else the default
    pub fn mode_for(&self, relation: &str) -> RenderMode {
        self.override_for(relation).unwrap_or(self.default_mode)
    }

    /// Registered overrides in order
    pub fn overrides(&self) -> impl Iterator<Item = (&str, RenderMode)> {
        self.overrides.iter().map(|(p, m)| (p.as_str(), *m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        let config = RenderModeConfiguration::new();
        assert_eq!(config.default_mode(), RenderMode::Single);
        assert_eq!(config.mode_for("self"), RenderMode::Single);

        let config = config.with_render_mode(RenderMode::Array);
        assert_eq!(config.mode_for("self"), RenderMode::Array);
    }

    #[test]
    fn test_builder_leaves_original_untouched() {
        let base = RenderModeConfiguration::new();
        let derived = base.with_override_for("foo", RenderMode::Array).unwrap();
        assert_eq!(base.mode_for("foo"), RenderMode::Single);
        assert_eq!(derived.mode_for("foo"), RenderMode::Array);
    }

    #[test]
    fn test_trailing_star_matches_prefix() {
        let config = RenderModeConfiguration::new()
            .with_override_for("foo*", RenderMode::Array)
            .unwrap();
        assert_eq!(config.mode_for("foobar"), RenderMode::Array);
        assert_eq!(config.mode_for("foo"), RenderMode::Array);
        assert_eq!(config.mode_for("barfoo"), RenderMode::Single);
    }

    #[test]
    fn test_double_star_matches_hierarchy() {
        let config = RenderModeConfiguration::new()
            .with_override_for("http://example.org/rels/**", RenderMode::Array)
            .unwrap();
        assert_eq!(config.mode_for("http://example.org/rels"), RenderMode::Array);
        assert_eq!(
            config.mode_for("http://example.org/rels/orders/items"),
            RenderMode::Array
        );
        assert_eq!(config.mode_for("http://example.org/other"), RenderMode::Single);
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let pattern = RelationPattern::new("http://example.org/rels/*").unwrap();
        assert!(pattern.matches("http://example.org/rels/orders"));
        assert!(!pattern.matches("http://example.org/rels/orders/items"));
    }

    #[test]
    fn test_question_mark() {
        let pattern = RelationPattern::new("item?").unwrap();
        assert!(pattern.matches("items"));
        assert!(!pattern.matches("item"));
    }

    #[test]
    fn test_literal_beats_wildcard() {
        let config = RenderModeConfiguration::new()
            .with_override_for("foo*", RenderMode::Array)
            .unwrap()
            .with_override_for("foobar", RenderMode::Single)
            .unwrap();
        assert_eq!(config.mode_for("foobar"), RenderMode::Single);
        assert_eq!(config.mode_for("foobaz"), RenderMode::Array);
    }

    #[test]
    fn test_first_registered_wildcard_wins() {
        let array_first = RenderModeConfiguration::new()
            .with_override_for("foo*", RenderMode::Array)
            .unwrap()
            .with_override_for("foob*", RenderMode::Single)
            .unwrap();
        assert_eq!(array_first.mode_for("foobar"), RenderMode::Array);

        let single_first = RenderModeConfiguration::new()
            .with_override_for("foob*", RenderMode::Single)
            .unwrap()
            .with_override_for("foo*", RenderMode::Array)
            .unwrap();
        assert_eq!(single_first.mode_for("foobar"), RenderMode::Single);
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let config = RenderModeConfiguration::new()
            .with_override_for("foo*", RenderMode::Array)
            .unwrap()
            .with_override_for("foob*", RenderMode::Array)
            .unwrap()
            .with_override_for("foo*", RenderMode::Single)
            .unwrap();
        let overrides: Vec<_> = config.overrides().collect();
        assert_eq!(
            overrides,
            [("foo*", RenderMode::Single), ("foob*", RenderMode::Array)]
        );
        assert_eq!(config.mode_for("foobar"), RenderMode::Single);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = RelationPattern::new("a.b*").unwrap();
        assert!(pattern.matches("a.bc"));
        assert!(!pattern.matches("axbc"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            RelationPattern::new(""),
            Err(HalError::InvalidPattern { .. })
        ));
    }
}
