//! Configuration file support
//!
//! Loads HAL settings from TOML (or JSON, by extension) and turns them into
//! a ready-to-use [`HalMapper`].
//!
//! ```toml
//! [render]
//! default = "single"
//! overrides = [{ pattern = "acme:*", mode = "array" }]
//!
//! [embedded]
//! enforce_collections = true
//! relations = [{ type = "Order", item = "purchase", collection = "purchases" }]
//!
//! [curies]
//! base_uri = "http://localhost:8080"
//! default = "acme"
//! namespaces = [{ name = "acme", template = "/rels/{rel}" }]
//!
//! [naming]
//! strategy = "snake_case"
//!
//! [messages]
//! "_links.acme:orders.title" = "Orders"
//! ```

use crate::config::{HalConfiguration, NamingStrategy};
use crate::curie::{CurieProvider, DefaultCurieProvider, NoCurieProvider, ReferencedCurieProvider};
use crate::error::ConfigFileError;
use crate::mapper::HalMapper;
use crate::message::MapMessageResolver;
use crate::relprovider::{
    CachingRelationProvider, DelegatingRelationProvider, FixedRelationProvider,
    InflectingRelationProvider, LinkRelationProvider,
};
use crate::render_mode::RenderMode;
use hal_model::Curie;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Top-level settings file structure. Every section is optional.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HalSettings {
    pub render: RenderSettings,
    pub embedded: EmbeddedSettings,
    pub curies: CurieSettings,
    pub naming: NamingSettings,
    pub messages: HashMap<String, String>,
}

/// `[render]`
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    pub default: Option<RenderMode>,
    pub overrides: Vec<RenderOverride>,
}

/// One `{ pattern, mode }` entry of `render.overrides`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderOverride {
    pub pattern: String,
    pub mode: RenderMode,
}

/// `[embedded]`
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbeddedSettings {
    pub enforce_collections: Option<bool>,
    /// Derive relations from type names (`order` / `orders`); defaults to true
    pub inflect: Option<bool>,
    pub relations: Vec<TypeRelations>,
}

/// Explicit relations for one type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeRelations {
    #[serde(rename = "type")]
    pub kind: String,
    pub item: Option<String>,
    pub collection: Option<String>,
}

/// `[curies]`
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurieSettings {
    pub base_uri: Option<String>,
    pub default: Option<String>,
    /// Advertise only the curies referenced by a document's links
    pub referenced_only: bool,
    pub namespaces: Vec<CurieNamespace>,
}

/// One `{ name, template }` entry of `curies.namespaces`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurieNamespace {
    pub name: String,
    pub template: String,
}

/// `[naming]`
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingSettings {
    pub strategy: Option<NamingStrategy>,
    pub apply: Option<bool>,
}

impl HalSettings {
    /// Rendering configuration described by the settings
    pub fn configuration(&self) -> Result<HalConfiguration, ConfigFileError> {
        let mut config = HalConfiguration::new();
        if let Some(mode) = self.render.default {
            config = config.with_render_single_links(mode);
        }
        for rule in &self.render.overrides {
            config = config.with_render_single_links_for(&rule.pattern, rule.mode)?;
        }
        if let Some(enforce) = self.embedded.enforce_collections {
            config = config.with_enforce_embedded_collections(enforce);
        }
        if let Some(strategy) = self.naming.strategy {
            config = config.with_naming_strategy(strategy);
        }
        if let Some(apply) = self.naming.apply {
            config = config.with_apply_property_naming_strategy(apply);
        }
        Ok(config)
    }

    /// Relation provider chain: explicit relations, then inflection, then
    /// `content`, memoized
    pub fn relation_provider(&self) -> Arc<dyn LinkRelationProvider> {
        let mut fixed = FixedRelationProvider::new();
        for entry in &self.embedded.relations {
            if let Some(item) = &entry.item {
                fixed = fixed.with_item_relation(entry.kind.as_str(), item.as_str());
            }
            if let Some(collection) = &entry.collection {
                fixed = fixed.with_collection_relation(entry.kind.as_str(), collection.as_str());
            }
        }

        let mut delegates: Vec<Arc<dyn LinkRelationProvider>> = Vec::new();
        if !fixed.is_empty() {
            delegates.push(Arc::new(fixed));
        }
        if self.embedded.inflect.unwrap_or(true) {
            delegates.push(Arc::new(InflectingRelationProvider));
        }
        Arc::new(CachingRelationProvider::new(Arc::new(
            DelegatingRelationProvider::new(delegates),
        )))
    }

    /// Curie provider described by `[curies]`
    pub fn curie_provider(&self) -> Result<Arc<dyn CurieProvider>, ConfigFileError> {
        let settings = &self.curies;
        if settings.namespaces.is_empty() {
            if let Some(name) = &settings.default {
                return Err(ConfigFileError::InvalidValue(format!(
                    "default curie '{name}' is not declared in curies.namespaces"
                )));
            }
            return Ok(Arc::new(NoCurieProvider));
        }

        let curies = settings
            .namespaces
            .iter()
            .map(|ns| Curie::new(ns.name.as_str(), ns.template.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigFileError::InvalidValue(e.to_string()))?;

        let mut provider = DefaultCurieProvider::new(curies);
        if let Some(name) = &settings.default {
            provider = provider.with_default_curie(name)?;
        }
        if let Some(base_uri) = &settings.base_uri {
            provider = provider.with_base_uri(base_uri.as_str());
        }

        if settings.referenced_only {
            Ok(Arc::new(ReferencedCurieProvider::new(provider)))
        } else {
            Ok(Arc::new(provider))
        }
    }

    /// Build a mapper from the settings
    pub fn build_mapper(&self) -> Result<HalMapper, ConfigFileError> {
        let mapper = HalMapper::builder()
            .shared_relation_provider(self.relation_provider())
            .shared_curie_provider(self.curie_provider()?)
            .messages(MapMessageResolver::from(self.messages.clone()))
            .configuration(self.configuration()?)
            .build();
        debug!(
            curies = self.curies.namespaces.len(),
            overrides = self.render.overrides.len(),
            messages = self.messages.len(),
            "built HAL mapper from settings"
        );
        Ok(mapper)
    }
}

/// Load settings from the given path. Detects format by extension:
/// `.json` -> JSON, everything else -> TOML.
pub fn load_config(path: &Path) -> Result<HalSettings, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if content.trim().is_empty() {
        return Ok(HalSettings::default());
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let settings = if is_json {
        serde_json::from_str(&content).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
    } else {
        toml::from_str(&content).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
    };
    info!(path = %path.display(), "loaded HAL settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_SETTINGS: &str = r#"
[render]
default = "single"
overrides = [{ pattern = "acme:*", mode = "array" }]

[embedded]
enforce_collections = false
relations = [{ type = "Order", item = "purchase", collection = "purchases" }]

[curies]
default = "acme"
namespaces = [{ name = "acme", template = "http://localhost:8080/rels/{rel}" }]

[naming]
strategy = "snake_case"

[messages]
"_links.acme:orders.title" = "Orders"
"#;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml() {
        let file = write_file(".toml", TOML_SETTINGS);
        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.render.overrides.len(), 1);
        assert_eq!(settings.render.overrides[0].mode, RenderMode::Array);
        assert_eq!(settings.embedded.enforce_collections, Some(false));
        assert_eq!(settings.curies.default.as_deref(), Some("acme"));
        assert_eq!(settings.naming.strategy, Some(NamingStrategy::SnakeCase));
        assert_eq!(settings.messages.len(), 1);
    }

    #[test]
    fn test_load_json() {
        let file = write_file(
            ".json",
            r#"{"curies": {"namespaces": [{"name": "ex", "template": "/rels/{rel}"}]}}"#,
        );
        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.curies.namespaces[0].name, "ex");
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_file(".toml", "  \n");
        let settings = load_config(file.path()).unwrap();
        assert!(settings.curies.namespaces.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/hal.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io { .. })));
    }

    #[test]
    fn test_parse_error() {
        let file = write_file(".toml", "[render\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigFileError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_curie_template() {
        let file = write_file(
            ".toml",
            "[curies]\nnamespaces = [{ name = \"acme\", template = \"/rels\" }]\n",
        );
        let settings = load_config(file.path()).unwrap();
        assert!(matches!(
            settings.build_mapper(),
            Err(ConfigFileError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unknown_default_curie() {
        let mut settings = HalSettings::default();
        settings.curies.default = Some("acme".to_string());
        assert!(matches!(
            settings.curie_provider(),
            Err(ConfigFileError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_relation_provider_chain() {
        let file = write_file(".toml", TOML_SETTINGS);
        let settings = load_config(file.path()).unwrap();
        let provider = settings.relation_provider();
        let order = "Order".into();
        assert_eq!(provider.item_relation_for(&order).unwrap(), "purchase");
        let invoice = "Invoice".into();
        assert_eq!(provider.collection_relation_for(&invoice).unwrap(), "invoices");
    }

    #[test]
    fn test_configuration_from_settings() {
        let file = write_file(".toml", TOML_SETTINGS);
        let config = load_config(file.path()).unwrap().configuration().unwrap();
        assert!(!config.enforce_embedded_collections());
        assert_eq!(config.naming_strategy(), Some(NamingStrategy::SnakeCase));
        assert_eq!(config.render_modes().mode_for("acme:orders"), RenderMode::Array);
    }
}
