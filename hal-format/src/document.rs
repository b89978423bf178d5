//! Document assembly
//!
//! Combines content, the `_links` block and the `_embedded` block into a
//! HAL document, and takes documents apart again.
//!
//! Field order of a rendered document: content fields, `_links`,
//! `_embedded`, `page`.

use crate::config::HalConfiguration;
use crate::curie::CurieProvider;
use crate::embedded::{EmbeddedAggregator, RelationBucket};
use crate::error::{json_kind, HalError, Result};
use crate::links::{LinkCodec, RenderDepth};
use crate::relprovider::LinkRelationProvider;
use crate::resource::{PageMetadata, Resource};
use hal_model::{Link, Links, Relation};
use hal_vocab::keys;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, trace};

/// A parsed HAL document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResource {
    /// Remaining fields, or the bare value of a scalar embed
    pub content: Option<JsonValue>,
    /// All links in document order
    pub links: Links,
    /// All embedded resources in document order
    pub embedded: Vec<ParsedEmbedded>,
    pub page: Option<PageMetadata>,
}

impl ParsedResource {
    /// Embedded resources under a relation
    pub fn embedded_for<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = &'a ParsedResource> + 'a {
        self.embedded
            .iter()
            .filter(move |e| e.relation == relation)
            .map(|e| &e.resource)
    }
}

/// An embedded resource with the relation it was found under
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEmbedded {
    pub relation: Relation,
    pub resource: ParsedResource,
}

/// Renders [`Resource`]s as HAL documents and parses them back
#[derive(Clone)]
pub struct DocumentAssembler {
    relation_provider: Arc<dyn LinkRelationProvider>,
    curie_provider: Arc<dyn CurieProvider>,
    codec: LinkCodec,
    config: Arc<HalConfiguration>,
}

impl std::fmt::Debug for DocumentAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler")
            .field("codec", &self.codec)
            .finish()
    }
}

impl DocumentAssembler {
    pub fn new(
        relation_provider: Arc<dyn LinkRelationProvider>,
        curie_provider: Arc<dyn CurieProvider>,
        codec: LinkCodec,
        config: Arc<HalConfiguration>,
    ) -> Self {
        Self {
            relation_provider,
            curie_provider,
            codec,
            config,
        }
    }

    pub fn codec(&self) -> &LinkCodec {
        &self.codec
    }

    pub fn configuration(&self) -> &HalConfiguration {
        &self.config
    }

    /// A fresh aggregator wired to this assembler's providers
    pub fn aggregator(&self, prefer_collections: bool) -> Result<EmbeddedAggregator> {
        EmbeddedAggregator::builder()
            .relation_provider(Arc::clone(&self.relation_provider))
            .curie_provider(Arc::clone(&self.curie_provider))
            .prefer_collections(prefer_collections)
            .naming_strategy(self.config.naming_strategy())
            .build()
    }

    /// Render a resource as a HAL document
    pub fn write(&self, resource: &Resource) -> Result<JsonValue> {
        self.write_at(resource, RenderDepth::Root)
    }

    fn write_at(&self, resource: &Resource, depth: RenderDepth) -> Result<JsonValue> {
        let prefer_collections =
            resource.is_collection() && self.config.enforce_embedded_collections();
        let mut aggregator = self.aggregator(prefer_collections)?;
        aggregator.add_all(resource.embedded().iter().cloned())?;

        let mut links = resource.links().clone();
        if aggregator.has_curied_embed() {
            trace!("curied embedded relation present");
            links.push(Link::curies_required());
        }
        let link_block = self.codec.serialize(&links, depth);
        let embedded_block = self.embedded_block(aggregator.as_map())?;

        let mut document = match resource.content() {
            None => Map::new(),
            Some(JsonValue::Object(fields)) => fields.clone(),
            Some(scalar) => {
                if link_block.is_none() && embedded_block.is_none() && resource.page().is_none() {
                    return Ok(scalar.clone());
                }
                return Err(HalError::NonObjectContent {
                    found: json_kind(scalar),
                });
            }
        };

        if let Some(block) = link_block {
            document.insert(keys::LINKS.to_string(), JsonValue::Object(block));
        }
        if let Some(block) = embedded_block {
            document.insert(keys::EMBEDDED.to_string(), JsonValue::Object(block));
        }
        if let Some(page) = resource.page() {
            document.insert(keys::PAGE.to_string(), serde_json::to_value(page)?);
        }
        Ok(JsonValue::Object(document))
    }

    fn embedded_block(&self, buckets: &[RelationBucket]) -> Result<Option<Map<String, JsonValue>>> {
        if buckets.is_empty() {
            return Ok(None);
        }
        let mut block = Map::new();
        for bucket in buckets {
            let mut rendered = bucket
                .items()
                .iter()
                .map(|value| self.write_at(value.resource(), RenderDepth::Nested))
                .collect::<Result<Vec<_>>>()?;
            let value = if bucket.is_collection() {
                JsonValue::Array(rendered)
            } else {
                rendered.pop().unwrap_or(JsonValue::Null)
            };
            block.insert(bucket.relation().as_str().to_string(), value);
        }
        Ok(Some(block))
    }

    /// Parse a HAL document
    pub fn read(&self, document: &JsonValue) -> Result<ParsedResource> {
        if !document.is_object() {
            return Err(HalError::NotAnObject {
                found: json_kind(document),
            });
        }
        self.read_resource(document)
    }

    fn read_resource(&self, value: &JsonValue) -> Result<ParsedResource> {
        let JsonValue::Object(fields) = value else {
            let content = (!value.is_null()).then(|| value.clone());
            return Ok(ParsedResource {
                content,
                ..ParsedResource::default()
            });
        };

        let mut parsed = ParsedResource::default();
        let mut content = Map::new();
        for (key, field) in fields {
            match key.as_str() {
                keys::LINKS => parsed.links = self.codec.parse(field)?,
                keys::EMBEDDED => parsed.embedded = self.read_embedded(field)?,
                keys::PAGE => match serde_json::from_value::<PageMetadata>(field.clone()) {
                    Ok(page) => parsed.page = Some(page),
                    Err(e) => {
                        debug!(error = %e, "page field is not page metadata, keeping as content");
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

    fn read_embedded(&self, block: &JsonValue) -> Result<Vec<ParsedEmbedded>> {
        let JsonValue::Object(fields) = block else {
            return Err(HalError::MalformedEmbedded {
                found: json_kind(block),
            });
        };
        let mut embedded = Vec::new();
        for (relation, value) in fields {
            let relation = Relation::new(relation);
            match value {
                JsonValue::Array(items) => {
                    for item in items {
                        embedded.push(ParsedEmbedded {
                            relation: relation.clone(),
                            resource: self.read_resource(item)?,
                        });
                    }
                }
                other => embedded.push(ParsedEmbedded {
                    relation,
                    resource: self.read_resource(other)?,
                }),
            }
        }
        Ok(embedded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curie::NoCurieProvider;
    use crate::message::NoMessages;
    use crate::relprovider::InflectingRelationProvider;
    use crate::resource::{EmbeddedItem, EmbeddedValue};
    use serde_json::json;

    fn assembler() -> DocumentAssembler {
        let config = Arc::new(HalConfiguration::new());
        let codec = LinkCodec::new(Arc::new(NoCurieProvider), Arc::new(NoMessages), config.clone());
        DocumentAssembler::new(
            Arc::new(InflectingRelationProvider),
            Arc::new(NoCurieProvider),
            codec,
            config,
        )
    }

    fn render(resource: &Resource) -> String {
        serde_json::to_string(&assembler().write(resource).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_resource() {
        assert_eq!(render(&Resource::empty()), "{}");
    }

    #[test]
    fn test_content_then_links_then_embedded() {
        let resource = Resource::new(json!({"name": "order"}))
            .with_link(Link::self_link("/orders/1").unwrap())
            .with_embedded(EmbeddedItem::plain(EmbeddedValue::new("Item", json!({"sku": "a"}))));
        assert_eq!(
            render(&resource),
            r#"{"name":"order","_links":{"self":{"href":"/orders/1"}},"_embedded":{"item":{"sku":"a"}}}"#
        );
    }

    #[test]
    fn test_scalar_content_with_links_is_rejected() {
        let resource = Resource::new(json!("text")).with_link(Link::self_link("/").unwrap());
        let err = assembler().write(&resource).unwrap_err();
        assert!(matches!(err, HalError::NonObjectContent { found: "a string" }));
    }

    #[test]
    fn test_collection_enforces_arrays() {
        let resource = Resource::collection(vec![EmbeddedValue::new("String", json!("Sample"))]);
        assert_eq!(render(&resource), r#"{"_embedded":{"strings":["Sample"]}}"#);
    }

    #[test]
    fn test_nested_resource_links() {
        let nested = Resource::new(json!({"text": "test1", "number": 1}))
            .with_link(Link::self_link("localhost").unwrap());
        let resource = Resource::empty().with_embedded(EmbeddedItem::plain(
            EmbeddedValue::from_resource("SimplePojo", nested),
        ));
        assert_eq!(
            render(&resource),
            r#"{"_embedded":{"simplePojo":{"text":"test1","number":1,"_links":{"self":{"href":"localhost"}}}}}"#
        );
    }

    #[test]
    fn test_read_rejects_non_object() {
        assert!(matches!(
            assembler().read(&json!([1, 2])),
            Err(HalError::NotAnObject { found: "an array" })
        ));
    }

    #[test]
    fn test_read_rejects_malformed_embedded() {
        assert!(matches!(
            assembler().read(&json!({"_embedded": []})),
            Err(HalError::MalformedEmbedded { .. })
        ));
    }

    #[test]
    fn test_read_splits_document() {
        let parsed = assembler()
            .read(&json!({
                "name": "order",
                "_links": {"self": {"href": "/orders/1"}},
                "_embedded": {"items": [{"sku": "a"}, {"sku": "b"}], "note": "bare"},
                "page": {"size": 2, "totalElements": 4, "totalPages": 2, "number": 0}
            }))
            .unwrap();
        assert_eq!(parsed.content, Some(json!({"name": "order"})));
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.embedded_for("items").count(), 2);
        assert_eq!(
            parsed.embedded_for("note").next().and_then(|r| r.content.clone()),
            Some(json!("bare"))
        );
        assert_eq!(parsed.page, Some(PageMetadata::new(2, 0, 4)));
    }
}
