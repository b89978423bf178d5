//! Format strategies by media type
//!
//! Each media type maps to a pre-built strategy; lookups for unregistered
//! media types go to the fallback strategy when one is configured.

use crate::document::{ParsedEmbedded, ParsedResource};
use crate::error::{json_kind, HalError, Result};
use crate::links::{link_attributes, link_from_json};
use crate::mapper::HalMapper;
use crate::resource::{EmbeddedItem, PageMetadata, Resource};
use hal_model::{Links, Relation};
use hal_vocab::{keys, media_types, relations};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Renders and parses resources for one media type
pub trait FormatStrategy: Send + Sync {
    fn media_type(&self) -> &str;

    fn write(&self, resource: &Resource) -> Result<JsonValue>;

    fn read(&self, document: &JsonValue) -> Result<ParsedResource>;
}

/// HAL documents
#[derive(Clone, Debug)]
pub struct HalStrategy {
    mapper: Arc<HalMapper>,
}

impl HalStrategy {
    pub fn new(mapper: Arc<HalMapper>) -> Self {
        Self { mapper }
    }
}

impl FormatStrategy for HalStrategy {
    fn media_type(&self) -> &str {
        media_types::HAL_JSON
    }

    fn write(&self, resource: &Resource) -> Result<JsonValue> {
        self.mapper.write_value(resource)
    }

    fn read(&self, document: &JsonValue) -> Result<ParsedResource> {
        self.mapper.read_value(document)
    }
}

/// Plain JSON: content fields, a `links` array of `{rel, href, ...}`
/// objects, and embedded resources as a flat `content` array
///
/// ```json
/// {"name": "order", "links": [{"rel": "self", "href": "/orders/1"}], "content": [{"sku": "a"}]}
/// ```
#[derive(Clone, Debug, Default)]
pub struct PlainJsonStrategy;

const PLAIN_LINKS: &str = "links";
const PLAIN_CONTENT: &str = "content";

impl PlainJsonStrategy {
    fn write_resource(&self, resource: &Resource) -> Result<JsonValue> {
        let embedded = resource
            .embedded()
            .iter()
            .flat_map(|item| match item {
                EmbeddedItem::Plain(value) | EmbeddedItem::Related { value, .. } => {
                    vec![value.resource()]
                }
                EmbeddedItem::Collection { values, .. } => {
                    values.iter().map(|v| v.resource()).collect()
                }
            })
            .filter(|r| !r.is_absent())
            .map(|r| self.write_resource(r))
            .collect::<Result<Vec<_>>>()?;

        let mut document = match resource.content() {
            None => Map::new(),
            Some(JsonValue::Object(fields)) => fields.clone(),
            Some(scalar) => {
                if resource.links().is_empty() && embedded.is_empty() && resource.page().is_none() {
                    return Ok(scalar.clone());
                }
                return Err(HalError::NonObjectContent {
                    found: json_kind(scalar),
                });
            }
        };

        let links: Vec<JsonValue> = resource
            .links()
            .iter()
            .filter(|link| !link.is_curies_required())
            .map(|link| {
                let mut view = Map::new();
                view.insert(keys::REL.to_string(), link.rel().as_str().into());
                view.extend(link_attributes(link, link.title()));
                JsonValue::Object(view)
            })
            .collect();

        if !links.is_empty() {
            document.insert(PLAIN_LINKS.to_string(), JsonValue::Array(links));
        }
        if !embedded.is_empty() {
            document.insert(PLAIN_CONTENT.to_string(), JsonValue::Array(embedded));
        }
        if let Some(page) = resource.page() {
            document.insert(keys::PAGE.to_string(), serde_json::to_value(page)?);
        }
        Ok(JsonValue::Object(document))
    }

    fn read_resource(&self, value: &JsonValue) -> Result<ParsedResource> {
        let JsonValue::Object(fields) = value else {
            return Ok(ParsedResource {
                content: (!value.is_null()).then(|| value.clone()),
                ..ParsedResource::default()
            });
        };

        let mut parsed = ParsedResource::default();
        let mut content = Map::new();
        for (key, field) in fields {
            match (key.as_str(), field) {
                (PLAIN_LINKS, JsonValue::Array(items)) => {
                    parsed.links = items
                        .iter()
                        .map(|item| link_from_json(item, None))
                        .collect::<Result<Links>>()?;
                }
                (PLAIN_CONTENT, JsonValue::Array(items)) => {
                    for item in items {
                        parsed.embedded.push(ParsedEmbedded {
                            relation: Relation::new(relations::DEFAULT),
                            resource: self.read_resource(item)?,
                        });
                    }
                }
                (keys::PAGE, _) => match serde_json::from_value::<PageMetadata>(field.clone()) {
                    Ok(page) => parsed.page = Some(page),
                    Err(_) => {
                        content.insert(key.clone(), field.clone());
                    }
                },
                _ => {
                    content.insert(key.clone(), field.clone());
                }
            }
        }
        parsed.content = (!content.is_empty()).then_some(JsonValue::Object(content));
        Ok(parsed)
    }
}

impl FormatStrategy for PlainJsonStrategy {
    fn media_type(&self) -> &str {
        media_types::JSON
    }

    fn write(&self, resource: &Resource) -> Result<JsonValue> {
        self.write_resource(resource)
    }

    fn read(&self, document: &JsonValue) -> Result<ParsedResource> {
        if !document.is_object() {
            return Err(HalError::NotAnObject {
                found: json_kind(document),
            });
        }
        self.read_resource(document)
    }
}

/// Media type to strategy registry with an optional fallback
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn FormatStrategy>>,
    fallback: Option<Arc<dyn FormatStrategy>>,
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut media: Vec<&String> = self.strategies.keys().collect();
        media.sort();
        f.debug_struct("StrategyRegistry")
            .field("media_types", &media)
            .field("fallback", &self.fallback.as_ref().map(|s| s.media_type().to_string()))
            .finish()
    }
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// HAL for `application/hal+json` and `application/json`, plain JSON
    /// for everything else
    pub fn with_defaults(mapper: Arc<HalMapper>) -> Self {
        let hal: Arc<dyn FormatStrategy> = Arc::new(HalStrategy::new(mapper));
        Self::new()
            .with_strategy_for(media_types::HAL_JSON, Arc::clone(&hal))
            .with_strategy_for(media_types::JSON, hal)
            .with_fallback(Arc::new(PlainJsonStrategy))
    }

    /// Register a strategy under its own media type
    pub fn with_strategy(self, strategy: Arc<dyn FormatStrategy>) -> Self {
        let media_type = strategy.media_type().to_string();
        self.with_strategy_for(&media_type, strategy)
    }

    /// Register a strategy under a media type
    pub fn with_strategy_for(
        mut self,
        media_type: &str,
        strategy: Arc<dyn FormatStrategy>,
    ) -> Self {
        self.strategies.insert(normalize(media_type), strategy);
        self
    }

    pub fn with_fallback(mut self, strategy: Arc<dyn FormatStrategy>) -> Self {
        self.fallback = Some(strategy);
        self
    }

    /// Strategy for a media type. Parameters and case are ignored.
    pub fn resolve(&self, media_type: &str) -> Result<Arc<dyn FormatStrategy>> {
        let key = normalize(media_type);
        if let Some(strategy) = self.strategies.get(&key) {
            return Ok(Arc::clone(strategy));
        }
        match &self.fallback {
            Some(fallback) => {
                debug!(
                    media_type = %key,
                    fallback = fallback.media_type(),
                    "using fallback strategy"
                );
                Ok(Arc::clone(fallback))
            }
            None => Err(HalError::UnsupportedMediaType { media_type: key }),
        }
    }

    pub fn contains(&self, media_type: &str) -> bool {
        self.strategies.contains_key(&normalize(media_type))
    }
}

/// `Application/HAL+JSON; charset=UTF-8` -> `application/hal+json`
fn normalize(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::EmbeddedValue;
    use hal_model::Link;
    use serde_json::json;

    fn registry() -> StrategyRegistry {
        StrategyRegistry::with_defaults(Arc::new(HalMapper::new()))
    }

    #[test]
    fn test_resolve_ignores_parameters_and_case() {
        let strategy = registry().resolve("Application/HAL+JSON; charset=UTF-8").unwrap();
        assert_eq!(strategy.media_type(), "application/hal+json");
    }

    #[test]
    fn test_unknown_media_type_uses_fallback() {
        let strategy = registry().resolve("text/plain").unwrap();
        assert_eq!(strategy.media_type(), "application/json");
        assert!(!registry().contains("text/plain"));
    }

    #[test]
    fn test_no_fallback_is_an_error() {
        let result = StrategyRegistry::new().resolve("text/plain");
        assert!(matches!(result, Err(HalError::UnsupportedMediaType { .. })));
    }

    #[test]
    fn test_plain_json_write() {
        let resource = Resource::new(json!({"name": "order"}))
            .with_link(Link::self_link("/orders/1").unwrap())
            .with_embedded(EmbeddedItem::plain(EmbeddedValue::new("Item", json!({"sku": "a"}))));
        let document = PlainJsonStrategy.write(&resource).unwrap();
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"{"name":"order","links":[{"rel":"self","href":"/orders/1"}],"content":[{"sku":"a"}]}"#
        );
    }

    #[test]
    fn test_plain_json_read() {
        let parsed = PlainJsonStrategy
            .read(&json!({
                "name": "order",
                "links": [{"rel": "self", "href": "/orders/1"}],
                "content": [{"sku": "a"}]
            }))
            .unwrap();
        assert_eq!(parsed.content, Some(json!({"name": "order"})));
        assert_eq!(parsed.links.get_link("self").map(|l| l.href()), Some("/orders/1"));
        assert_eq!(parsed.embedded.len(), 1);
    }

    #[test]
    fn test_plain_json_link_requires_rel() {
        let result = PlainJsonStrategy.read(&json!({"links": [{"href": "/"}]}));
        assert!(matches!(result, Err(HalError::MissingRelation)));
    }
}
