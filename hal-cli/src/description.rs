//! Resource descriptions accepted by `hal render`
//!
//! ```json
//! {
//!   "content": {"total": 30},
//!   "links": [{"rel": "self", "href": "/orders/1"}],
//!   "embedded": [
//!     {"type": "Item", "value": {"sku": "a"}},
//!     {"type": "Customer", "value": {"name": "x"}, "rel": "customer"},
//!     {"type": "Payment", "values": []}
//!   ]
//! }
//! ```
//!
//! A description with `"collection": true` or a `page` block is a
//! collection model.

use crate::error::{CliError, CliResult};
use hal_format::{EmbeddedItem, EmbeddedValue, PageMetadata, Resource, TypeKey};
use hal_model::{Link, Relation};
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResourceDescription {
    pub content: Option<JsonValue>,
    pub links: Vec<LinkDescription>,
    pub embedded: Vec<EmbeddedDescription>,
    pub page: Option<PageDescription>,
    pub collection: bool,
}

#[derive(Debug, Deserialize)]
pub struct LinkDescription {
    pub rel: String,
    pub href: String,
    pub hreflang: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub deprecation: Option<String>,
    pub profile: Option<String>,
    pub name: Option<String>,
    pub media: Option<String>,
    /// Render this link's relation as an array even when alone
    #[serde(default)]
    pub array: bool,
}

/// One embedded entry: a single `value`, or a `values` collection wrapper
#[derive(Debug, Deserialize)]
pub struct EmbeddedDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<JsonValue>,
    pub values: Option<Vec<JsonValue>>,
    pub rel: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescription {
    pub size: u64,
    #[serde(default)]
    pub number: u64,
    pub total_elements: u64,
}

impl ResourceDescription {
    pub fn from_json(value: JsonValue) -> CliResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| CliError::Input(format!("invalid resource description: {e}")))
    }

    pub fn into_resource(self) -> CliResult<Resource> {
        let is_collection = self.collection || self.page.is_some();
        let mut resource = match (is_collection, self.content) {
            (false, content) => Resource::new(content.unwrap_or(JsonValue::Null)),
            (true, None) => Resource::collection(Vec::new()),
            (true, Some(_)) => {
                return Err(CliError::Input(
                    "collection descriptions cannot carry content".to_string(),
                ))
            }
        };

        for link in &self.links {
            resource = resource.with_link(link.to_link()?);
        }
        for entry in self.embedded {
            resource = resource.with_embedded(entry.into_item()?);
        }
        if let Some(page) = self.page {
            resource = resource.with_page(PageMetadata::new(
                page.size,
                page.number,
                page.total_elements,
            ));
        }
        Ok(resource)
    }
}

impl LinkDescription {
    pub fn to_link(&self) -> CliResult<Link> {
        let mut link = Link::new(self.href.as_str(), self.rel.as_str())?;
        if let Some(hreflang) = &self.hreflang {
            link = link.with_hreflang(hreflang.as_str());
        }
        if let Some(title) = &self.title {
            link = link.with_title(title.as_str());
        }
        if let Some(media_type) = &self.media_type {
            link = link.with_media_type(media_type.as_str());
        }
        if let Some(deprecation) = &self.deprecation {
            link = link.with_deprecation(deprecation.as_str());
        }
        if let Some(profile) = &self.profile {
            link = link.with_profile(profile.as_str());
        }
        if let Some(name) = &self.name {
            link = link.with_name(name.as_str());
        }
        if let Some(media) = &self.media {
            link = link.with_media(media.as_str());
        }
        if self.array {
            link = link.with_prefer_array(true);
        }
        Ok(link)
    }
}

impl EmbeddedDescription {
    pub fn into_item(self) -> CliResult<EmbeddedItem> {
        match (self.value, self.values) {
            (Some(_), Some(_)) => Err(CliError::Input(format!(
                "embedded '{}' has both value and values",
                self.kind
            ))),
            (_, Some(values)) => {
                if !self.links.is_empty() {
                    return Err(CliError::Input(format!(
                        "embedded '{}' collection cannot carry links",
                        self.kind
                    )));
                }
                let elements: Vec<EmbeddedValue> = values
                    .into_iter()
                    .map(|v| EmbeddedValue::new(self.kind.as_str(), v))
                    .collect();
                Ok(EmbeddedItem::Collection {
                    values: elements,
                    relation: self.rel.map(Relation::from),
                    element_type: Some(TypeKey::from(self.kind.as_str())),
                })
            }
            (value, None) => {
                let mut embedded =
                    EmbeddedValue::new(self.kind.as_str(), value.unwrap_or(JsonValue::Null));
                for link in &self.links {
                    embedded = embedded.with_link(link.to_link()?);
                }
                Ok(match self.rel {
                    Some(rel) => EmbeddedItem::related(embedded, rel),
                    None => EmbeddedItem::plain(embedded),
                })
            }
        }
    }
}
