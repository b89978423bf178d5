//! Representation models handed to the document assembler
//!
//! A [`Resource`] is content plus links plus embedded items. Embedded items
//! are tagged: plain values are grouped by the relation derived from their
//! type, related values carry their own relation, and collection wrappers
//! always render as arrays.

use crate::error::Result;
use crate::relprovider::TypeKey;
use hal_model::{Link, Links, Relation};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Paging information of a paged collection
///
/// ```json
/// "page": {"size": 2, "totalElements": 4, "totalPages": 2, "number": 0}
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl PageMetadata {
    /// Create page metadata, deriving the total number of pages
    pub fn new(size: u64, number: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            size,
            total_elements,
            total_pages,
            number,
        }
    }
}

/// Whether a resource is a single entity or a collection model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceKind {
    #[default]
    Entity,
    Collection,
}

/// A representation model: content, links and embedded items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    content: Option<JsonValue>,
    links: Links,
    embedded: Vec<EmbeddedItem>,
    page: Option<PageMetadata>,
    kind: ResourceKind,
}

impl Resource {
    /// A resource without content
    pub fn empty() -> Self {
        Self::default()
    }

    /// A resource wrapping JSON content. `null` counts as no content.
    pub fn new(content: JsonValue) -> Self {
        Self {
            content: non_null(content),
            ..Self::default()
        }
    }

    /// A resource wrapping any serializable value
    pub fn of<T: Serialize>(content: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(content)?))
    }

    /// A collection model embedding the given values
    pub fn collection(values: impl IntoIterator<Item = EmbeddedValue>) -> Self {
        Self {
            embedded: values.into_iter().map(EmbeddedItem::Plain).collect(),
            kind: ResourceKind::Collection,
            ..Self::default()
        }
    }

    /// An empty collection model that still renders its collection relation
    pub fn empty_collection_of(element_type: impl Into<TypeKey>) -> Self {
        Self {
            embedded: vec![EmbeddedItem::empty_collection_of(element_type)],
            kind: ResourceKind::Collection,
            ..Self::default()
        }
    }

    /// A paged collection model
    pub fn paged(values: impl IntoIterator<Item = EmbeddedValue>, page: PageMetadata) -> Self {
        Self::collection(values).with_page(page)
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.links.extend(links);
        self
    }

    pub fn with_embedded(mut self, item: EmbeddedItem) -> Self {
        self.embedded.push(item);
        self
    }

    pub fn with_page(mut self, page: PageMetadata) -> Self {
        self.page = Some(page);
        self
    }

    pub fn content(&self) -> Option<&JsonValue> {
        self.content.as_ref()
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn embedded(&self) -> &[EmbeddedItem] {
        &self.embedded
    }

    pub fn page(&self) -> Option<&PageMetadata> {
        self.page.as_ref()
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn is_collection(&self) -> bool {
        self.kind == ResourceKind::Collection
    }

    /// No content, no links and nothing embedded
    pub fn is_absent(&self) -> bool {
        self.content.is_none() && self.links.is_empty() && self.embedded.is_empty()
    }
}

/// A value to embed, tagged with the type its relation is derived from
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedValue {
    kind: TypeKey,
    resource: Resource,
}

impl EmbeddedValue {
    /// Embed JSON content under an explicit type key
    pub fn new(kind: impl Into<TypeKey>, content: JsonValue) -> Self {
        Self {
            kind: kind.into(),
            resource: Resource::new(content),
        }
    }

    /// Embed a serializable value, keyed by its Rust type name
    pub fn of<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            kind: TypeKey::of::<T>(),
            resource: Resource::of(value)?,
        })
    }

    /// Embed a full resource with its own links and embeds
    pub fn from_resource(kind: impl Into<TypeKey>, resource: Resource) -> Self {
        Self {
            kind: kind.into(),
            resource,
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.resource = self.resource.with_link(link);
        self
    }

    pub fn kind(&self) -> &TypeKey {
        &self.kind
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn content(&self) -> Option<&JsonValue> {
        self.resource.content()
    }

    /// Absent values are skipped by the aggregator
    pub fn is_absent(&self) -> bool {
        self.resource.is_absent()
    }
}

/// An item of a resource's embedded block
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedItem {
    /// Grouped under the relation derived from the value's type
    Plain(EmbeddedValue),

    /// Rendered under an explicit relation; never promoted
    Related {
        value: EmbeddedValue,
        relation: Relation,
    },

    /// Always rendered as an array, possibly empty
    Collection {
        values: Vec<EmbeddedValue>,
        relation: Option<Relation>,
        element_type: Option<TypeKey>,
    },
}

impl EmbeddedItem {
    pub fn plain(value: EmbeddedValue) -> Self {
        Self::Plain(value)
    }

    pub fn related(value: EmbeddedValue, relation: impl Into<Relation>) -> Self {
        Self::Related {
            value,
            relation: relation.into(),
        }
    }

    /// A collection whose relation is derived from its elements
    pub fn collection(values: Vec<EmbeddedValue>) -> Self {
        Self::Collection {
            values,
            relation: None,
            element_type: None,
        }
    }

    /// A collection under an explicit relation
    pub fn collection_with_relation(
        values: Vec<EmbeddedValue>,
        relation: impl Into<Relation>,
    ) -> Self {
        Self::Collection {
            values,
            relation: Some(relation.into()),
            element_type: None,
        }
    }

    /// An empty collection rendered under the collection relation of `element_type`
    pub fn empty_collection_of(element_type: impl Into<TypeKey>) -> Self {
        Self::Collection {
            values: Vec::new(),
            relation: None,
            element_type: Some(element_type.into()),
        }
    }
}

fn non_null(value: JsonValue) -> Option<JsonValue> {
    match value {
        JsonValue::Null => None,
        other => Some(other),
    }
}
