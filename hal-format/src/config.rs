//! HAL rendering configuration

use crate::error::Result;
use crate::render_mode::{RenderMode, RenderModeConfiguration};
use hal_model::Relation;
use serde::{Deserialize, Serialize};

/// Naming strategy applied to the local part of application relations
///
/// Registered relations (`self`, `next`, ...) are never renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// `someSample` -> `some_sample`
    SnakeCase,
    /// `someSample` -> `some-sample`
    KebabCase,
    /// `some_sample` -> `someSample`
    LowerCamelCase,
    /// `some_sample` -> `SomeSample`
    UpperCamelCase,
    /// `someSample` -> `somesample`
    LowerCase,
    /// `someSample` -> `some.sample`
    LowerDotCase,
}

impl NamingStrategy {
    /// Translate a name
    pub fn translate(self, name: &str) -> String {
        let words = split_words(name);
        match self {
            NamingStrategy::SnakeCase => words.join("_"),
            NamingStrategy::KebabCase => words.join("-"),
            NamingStrategy::LowerDotCase => words.join("."),
            NamingStrategy::LowerCase => words.concat(),
            NamingStrategy::LowerCamelCase => words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
                .collect(),
            NamingStrategy::UpperCamelCase => words.iter().map(|w| capitalize(w)).collect(),
        }
    }
}

/// Split a name into lowercase words on separators and case changes
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Configuration for HAL rendering
///
/// Immutable; every `with_*` method consumes and returns the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalConfiguration {
    /// Single-vs-array rendering of link relations
    render_modes: RenderModeConfiguration,

    /// Render every element of a collection model under its collection
    /// relation, even when there is only one element
    enforce_embedded_collections: bool,

    /// Whether `naming_strategy` is applied to relations
    apply_property_naming_strategy: bool,

    /// Naming strategy for application relations
    naming_strategy: Option<NamingStrategy>,
}

impl Default for HalConfiguration {
    fn default() -> Self {
        Self {
            render_modes: RenderModeConfiguration::default(),
            enforce_embedded_collections: true,
            apply_property_naming_strategy: true,
            naming_strategy: None,
        }
    }
}

impl HalConfiguration {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default render mode for single links
    pub fn with_render_single_links(mut self, mode: RenderMode) -> Self {
        self.render_modes = self.render_modes.with_render_mode(mode);
        self
    }

    /// Override the render mode for relations matching a pattern
    pub fn with_render_single_links_for(mut self, pattern: &str, mode: RenderMode) -> Result<Self> {
        self.render_modes = self.render_modes.with_override_for(pattern, mode)?;
        Ok(self)
    }

    /// Replace the render-mode configuration
    pub fn with_render_modes(mut self, render_modes: RenderModeConfiguration) -> Self {
        self.render_modes = render_modes;
        self
    }

    pub fn with_enforce_embedded_collections(mut self, enabled: bool) -> Self {
        self.enforce_embedded_collections = enabled;
        self
    }

    pub fn with_apply_property_naming_strategy(mut self, enabled: bool) -> Self {
        self.apply_property_naming_strategy = enabled;
        self
    }

    pub fn with_naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.naming_strategy = Some(strategy);
        self
    }

    pub fn render_modes(&self) -> &RenderModeConfiguration {
        &self.render_modes
    }

    pub fn enforce_embedded_collections(&self) -> bool {
        self.enforce_embedded_collections
    }

    pub fn apply_property_naming_strategy(&self) -> bool {
        self.apply_property_naming_strategy
    }

    /// The naming strategy in effect, if any
    pub fn naming_strategy(&self) -> Option<NamingStrategy> {
        self.naming_strategy
            .filter(|_| self.apply_property_naming_strategy)
    }

    /// Apply the naming strategy to an application relation
    pub fn rename(&self, relation: &Relation) -> Relation {
        match self.naming_strategy() {
            Some(strategy) if !relation.is_iana() => {
                relation.map_local_part(|local| strategy.translate(local))
            }
            _ => relation.clone(),
        }
    }
}
