//! Link block codec
//!
//! Serializes an ordered link list into the relation-keyed `_links` object
//! and parses it back into a flat list.
//!
//! ```json
//! {
//!   "self": {"href": "/orders/1"},
//!   "acme:items": [{"href": "/orders/1/items/1"}, {"href": "/orders/1/items/2"}],
//!   "curies": [{"href": "http://localhost:8080/rels/{rel}", "name": "acme", "templated": true}]
//! }
//! ```

use crate::config::HalConfiguration;
use crate::curie::CurieProvider;
use crate::error::{json_kind, HalError, Result};
use crate::message::{title_for, MessageResolver};
use crate::render_mode::RenderMode;
use hal_model::{Link, Links, Relation};
use hal_vocab::keys;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::trace;

/// Nesting level of the document being rendered
///
/// Curies are only declared on the outermost document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDepth {
    Root,
    Nested,
}

/// Links grouped under one effective relation
struct LinkBucket<'a> {
    relation: Relation,
    original: &'a Relation,
    links: Vec<JsonValue>,
    prefer_array: bool,
}

/// Renders and parses `_links` blocks
#[derive(Clone)]
pub struct LinkCodec {
    curie_provider: Arc<dyn CurieProvider>,
    messages: Arc<dyn MessageResolver>,
    config: Arc<HalConfiguration>,
}

impl std::fmt::Debug for LinkCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkCodec")
            .field("curies_enabled", &self.curie_provider.is_enabled())
            .field("config", &self.config)
            .finish()
    }
}

impl LinkCodec {
    pub fn new(
        curie_provider: Arc<dyn CurieProvider>,
        messages: Arc<dyn MessageResolver>,
        config: Arc<HalConfiguration>,
    ) -> Self {
        Self {
            curie_provider,
            messages,
            config,
        }
    }

    /// The relation a link is rendered under
    pub fn effective_relation(&self, rel: &Relation) -> Relation {
        self.curie_provider.namespaced_relation(&self.config.rename(rel))
    }

    /// Render mode a lone link of this relation gets
    pub fn render_mode_for(&self, rel: &Relation) -> RenderMode {
        self.mode_for(&self.effective_relation(rel), rel)
    }

    /// Title resolved from messages for links of this relation
    pub fn resolved_title(&self, rel: &Relation) -> Option<String> {
        title_for(self.messages.as_ref(), &self.effective_relation(rel))
    }

    /// Render a link list as a `_links` object
    ///
    /// Returns `None` when there is nothing to render.
    pub fn serialize(&self, links: &Links, depth: RenderDepth) -> Option<Map<String, JsonValue>> {
        let mut buckets: Vec<LinkBucket<'_>> = Vec::new();
        let mut emitted = Links::new();
        let mut curies_needed = false;

        for link in links {
            if link.is_curies_required() {
                trace!("curie declarations forced");
                curies_needed = true;
                emitted.push(link.clone());
                continue;
            }

            let renamed = self.config.rename(link.rel());
            let effective = self.curie_provider.namespaced_relation(&renamed);
            if effective != renamed {
                curies_needed = true;
            }

            let view = JsonValue::Object(self.link_view(link, &effective));
            match buckets.iter_mut().find(|b| b.relation == effective) {
                Some(bucket) => {
                    bucket.prefer_array |= link.prefers_array();
                    bucket.links.push(view);
                }
                None => buckets.push(LinkBucket {
                    relation: effective,
                    original: link.rel(),
                    links: vec![view],
                    prefer_array: link.prefers_array(),
                }),
            }
            emitted.push(link.clone());
        }

        let mut block = Map::new();
        for bucket in buckets {
            let as_array = bucket.links.len() > 1
                || bucket.prefer_array
                || self.mode_for(&bucket.relation, bucket.original) == RenderMode::Array;
            let value = if as_array {
                JsonValue::Array(bucket.links)
            } else {
                bucket.links.into_iter().next().unwrap_or(JsonValue::Null)
            };
            block.insert(bucket.relation.as_str().to_string(), value);
        }

        if curies_needed && depth == RenderDepth::Root {
            if let Some(curies) = self.curie_entries(&emitted) {
                trace!(count = curies.len(), "declaring curies");
                block.insert(keys::CURIES.to_string(), JsonValue::Array(curies));
            }
        }

        (!block.is_empty()).then_some(block)
    }

    /// Curie declarations for the links, if any link needs a namespace
    pub fn curie_entries_if_needed(&self, links: &Links) -> Option<Vec<JsonValue>> {
        let needed = links.requires_curies()
            || links.iter().any(|link| {
                let renamed = self.config.rename(link.rel());
                self.curie_provider.namespaced_relation(&renamed) != renamed
            });
        if !needed {
            return None;
        }
        self.curie_entries(links)
    }

    /// `links` may carry the sentinel, which stands for curied embedded
    /// relations
    fn curie_entries(&self, emitted: &Links) -> Option<Vec<JsonValue>> {
        if !self.curie_provider.is_enabled() {
            return None;
        }
        let entries: Vec<JsonValue> = self
            .curie_provider
            .curie_information(emitted)
            .iter()
            .filter_map(|entry| serde_json::to_value(entry).ok())
            .collect();
        (!entries.is_empty()).then_some(entries)
    }

    /// Single-vs-array for a bucket: override for the rendered relation,
    /// then for the relation as given, then the default
    fn mode_for(&self, effective: &Relation, original: &Relation) -> RenderMode {
        let modes = self.config.render_modes();
        modes
            .override_for(effective.as_str())
            .or_else(|| modes.override_for(original.as_str()))
            .unwrap_or_else(|| modes.default_mode())
    }

    /// HAL view of a link. The relation is the field name; `media` is not
    /// part of HAL.
    fn link_view(&self, link: &Link, effective: &Relation) -> Map<String, JsonValue> {
        let title = link
            .title()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| title_for(self.messages.as_ref(), effective));
        link_attributes(link, title.as_deref())
    }

    /// Parse a `_links` object into a flat link list, in document order
    pub fn parse(&self, block: &JsonValue) -> Result<Links> {
        let JsonValue::Object(fields) = block else {
            return Err(HalError::MalformedLinks {
                relation: keys::LINKS.to_string(),
                found: json_kind(block),
            });
        };

        let mut links = Links::new();
        for (relation, value) in fields {
            match value {
                JsonValue::Array(items) => {
                    for item in items {
                        links.push(link_from_json(item, Some(relation))?);
                    }
                }
                JsonValue::Object(_) => links.push(link_from_json(value, Some(relation))?),
                other => {
                    return Err(HalError::MalformedLinks {
                        relation: relation.clone(),
                        found: json_kind(other),
                    })
                }
            }
        }
        Ok(links)
    }
}

/// Link attributes in wire order, without the relation
pub fn link_attributes(link: &Link, title: Option<&str>) -> Map<String, JsonValue> {
    let mut view = Map::new();
    view.insert(keys::HREF.to_string(), link.href().into());
    let optional = [
        ("hreflang", link.hreflang()),
        ("title", title),
        ("type", link.media_type()),
        ("deprecation", link.deprecation()),
        ("profile", link.profile()),
        ("name", link.name()),
    ];
    for (key, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            view.insert(key.to_string(), value.into());
        }
    }
    if link.is_templated() {
        view.insert(keys::TEMPLATED.to_string(), JsonValue::Bool(true));
    }
    view
}

/// Parse a link object. A blank or missing `rel` falls back to `default_rel`.
///
/// `templated` is ignored; it is derived from the href.
pub(crate) fn link_from_json(value: &JsonValue, default_rel: Option<&str>) -> Result<Link> {
    let fallback = default_rel.unwrap_or_default();
    let JsonValue::Object(fields) = value else {
        return Err(HalError::MalformedLinks {
            relation: fallback.to_string(),
            found: json_kind(value),
        });
    };
    let text = |key: &str| fields.get(key).and_then(JsonValue::as_str);

    let rel = text(keys::REL)
        .filter(|r| !r.trim().is_empty())
        .or(default_rel)
        .ok_or(HalError::MissingRelation)?;
    let href = text(keys::HREF)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| HalError::MissingHref {
            relation: rel.to_string(),
        })?;

    let mut link = Link::new(href, rel)?;
    if let Some(v) = text("hreflang") {
        link = link.with_hreflang(v);
    }
    if let Some(v) = text("title") {
        link = link.with_title(v);
    }
    if let Some(v) = text("type") {
        link = link.with_media_type(v);
    }
    if let Some(v) = text("deprecation") {
        link = link.with_deprecation(v);
    }
    if let Some(v) = text("profile") {
        link = link.with_profile(v);
    }
    if let Some(v) = text("name") {
        link = link.with_name(v);
    }
    if let Some(v) = text("media") {
        link = link.with_media(v);
    }
    Ok(link)
}
