//! Entry point wiring providers and configuration together

use crate::config::HalConfiguration;
use crate::curie::{CurieProvider, NoCurieProvider};
use crate::document::{DocumentAssembler, ParsedResource};
use crate::embedded::EmbeddedAggregator;
use crate::error::Result;
use crate::links::LinkCodec;
use crate::message::{MessageResolver, NoMessages};
use crate::relprovider::{DefaultRelationProvider, LinkRelationProvider};
use crate::resource::Resource;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Renders and parses HAL documents
///
/// Built once and shared; rendering does not mutate the mapper.
#[derive(Clone, Debug)]
pub struct HalMapper {
    assembler: DocumentAssembler,
}

impl HalMapper {
    pub fn builder() -> HalMapperBuilder {
        HalMapperBuilder::default()
    }

    /// A mapper with default providers and configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Render a resource as a JSON value
    pub fn write_value(&self, resource: &Resource) -> Result<JsonValue> {
        self.assembler.write(resource)
    }

    /// Render a resource as a compact JSON string
    pub fn write_string(&self, resource: &Resource) -> Result<String> {
        Ok(serde_json::to_string(&self.write_value(resource)?)?)
    }

    /// Render a resource as an indented JSON string
    pub fn write_string_pretty(&self, resource: &Resource) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.write_value(resource)?)?)
    }

    /// Parse a HAL document
    pub fn read_value(&self, document: &JsonValue) -> Result<ParsedResource> {
        self.assembler.read(document)
    }

    /// Parse a HAL document from a string
    pub fn read_str(&self, document: &str) -> Result<ParsedResource> {
        let value: JsonValue = serde_json::from_str(document)?;
        self.read_value(&value)
    }

    pub fn link_codec(&self) -> &LinkCodec {
        self.assembler.codec()
    }

    /// A fresh embedded aggregator using this mapper's providers
    pub fn embedded_aggregator(&self, prefer_collections: bool) -> Result<EmbeddedAggregator> {
        self.assembler.aggregator(prefer_collections)
    }

    pub fn configuration(&self) -> &HalConfiguration {
        self.assembler.configuration()
    }
}

impl Default for HalMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`HalMapper`]
///
/// Unset collaborators default to [`DefaultRelationProvider`],
/// [`NoCurieProvider`], [`NoMessages`] and [`HalConfiguration::default`].
#[derive(Default)]
pub struct HalMapperBuilder {
    relation_provider: Option<Arc<dyn LinkRelationProvider>>,
    curie_provider: Option<Arc<dyn CurieProvider>>,
    messages: Option<Arc<dyn MessageResolver>>,
    config: Option<HalConfiguration>,
}

impl HalMapperBuilder {
    pub fn relation_provider(mut self, provider: impl LinkRelationProvider + 'static) -> Self {
        self.relation_provider = Some(Arc::new(provider));
        self
    }

    pub fn shared_relation_provider(mut self, provider: Arc<dyn LinkRelationProvider>) -> Self {
        self.relation_provider = Some(provider);
        self
    }

    pub fn curie_provider(mut self, provider: impl CurieProvider + 'static) -> Self {
        self.curie_provider = Some(Arc::new(provider));
        self
    }

    pub fn shared_curie_provider(mut self, provider: Arc<dyn CurieProvider>) -> Self {
        self.curie_provider = Some(provider);
        self
    }

    pub fn messages(mut self, resolver: impl MessageResolver + 'static) -> Self {
        self.messages = Some(Arc::new(resolver));
        self
    }

    pub fn configuration(mut self, config: HalConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> HalMapper {
        let relation_provider = self
            .relation_provider
            .unwrap_or_else(|| Arc::new(DefaultRelationProvider));
        let curie_provider = self
            .curie_provider
            .unwrap_or_else(|| Arc::new(NoCurieProvider));
        let messages = self.messages.unwrap_or_else(|| Arc::new(NoMessages));
        let config = Arc::new(self.config.unwrap_or_default());

        let codec = LinkCodec::new(Arc::clone(&curie_provider), messages, Arc::clone(&config));
        HalMapper {
            assembler: DocumentAssembler::new(relation_provider, curie_provider, codec, config),
        }
    }
}
