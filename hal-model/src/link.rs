//! Links and ordered link lists

use crate::error::{ModelError, Result};
use crate::relation::Relation;
use crate::template::UriTemplate;
use hal_vocab::iana;

/// Relation of the synthetic link that forces curie declarations
const CURIES_REQUIRED_REL: &str = "__rel__";

/// Target of the synthetic link that forces curie declarations
const CURIES_REQUIRED_HREF: &str = "¯\\_(ツ)_/¯";

/// A hypermedia link
///
/// Links are immutable; every `with_*` method returns a new value.
/// `templated` is not stored: it is derived from the href.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    rel: Relation,
    href: UriTemplate,
    hreflang: Option<String>,
    title: Option<String>,
    media_type: Option<String>,
    deprecation: Option<String>,
    profile: Option<String>,
    name: Option<String>,
    media: Option<String>,
    prefer_array: bool,
}

impl Link {
    /// Create a link with the given target and relation
    pub fn new(href: impl Into<String>, rel: impl Into<Relation>) -> Result<Self> {
        let href = href.into();
        let rel = rel.into();
        if href.is_empty() {
            return Err(ModelError::EmptyHref);
        }
        if rel.as_str().is_empty() {
            return Err(ModelError::EmptyRelation);
        }
        Ok(Self::unchecked(href, rel))
    }

    /// Create a `self` link
    pub fn self_link(href: impl Into<String>) -> Result<Self> {
        Self::new(href, iana::SELF)
    }

    /// The synthetic link forcing curie declarations
    ///
    /// It is consumed by the codec and never rendered.
    pub fn curies_required() -> Self {
        Self::unchecked(CURIES_REQUIRED_HREF.to_string(), CURIES_REQUIRED_REL.into())
    }

    fn unchecked(href: String, rel: Relation) -> Self {
        Self {
            rel,
            href: UriTemplate::new(href),
            hreflang: None,
            title: None,
            media_type: None,
            deprecation: None,
            profile: None,
            name: None,
            media: None,
            prefer_array: false,
        }
    }

    /// Whether this is the synthetic curie-forcing link
    pub fn is_curies_required(&self) -> bool {
        self.rel == CURIES_REQUIRED_REL && self.href.as_str() == CURIES_REQUIRED_HREF
    }

    pub fn rel(&self) -> &Relation {
        &self.rel
    }

    pub fn href(&self) -> &str {
        self.href.as_str()
    }

    /// The href as a URI template
    pub fn template(&self) -> &UriTemplate {
        &self.href
    }

    /// Whether the href contains template variables
    pub fn is_templated(&self) -> bool {
        self.href.has_variables()
    }

    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The `type` attribute (media type hint of the target)
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `media` attribute. Not every format supports it.
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// Whether this link asks for its relation to render as an array
    pub fn prefers_array(&self) -> bool {
        self.prefer_array
    }

    /// Copy with a different relation
    pub fn with_rel(&self, rel: impl Into<Relation>) -> Self {
        Self {
            rel: rel.into(),
            ..self.clone()
        }
    }

    pub fn with_hreflang(&self, hreflang: impl Into<String>) -> Self {
        Self {
            hreflang: Some(hreflang.into()),
            ..self.clone()
        }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self.clone()
        }
    }

    pub fn with_media_type(&self, media_type: impl Into<String>) -> Self {
        Self {
            media_type: Some(media_type.into()),
            ..self.clone()
        }
    }

    pub fn with_deprecation(&self, deprecation: impl Into<String>) -> Self {
        Self {
            deprecation: Some(deprecation.into()),
            ..self.clone()
        }
    }

    pub fn with_profile(&self, profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..self.clone()
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    pub fn with_media(&self, media: impl Into<String>) -> Self {
        Self {
            media: Some(media.into()),
            ..self.clone()
        }
    }

    /// Force the link's relation to render as an array, even when it is the
    /// only link of that relation.
    pub fn with_prefer_array(&self, prefer_array: bool) -> Self {
        Self {
            prefer_array,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>;rel=\"{}\"", self.href, self.rel)
    }
}

/// An ordered list of links
///
/// Duplicates are preserved, including several links sharing a relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link, builder style
    pub fn and(mut self, link: Link) -> Self {
        self.0.push(link);
        self
    }

    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.0
    }

    /// First link with the given relation
    pub fn get_link(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.rel == rel)
    }

    pub fn has_link(&self, rel: &str) -> bool {
        self.get_link(rel).is_some()
    }

    /// All links with the given relation, in order
    pub fn links_for<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.0.iter().filter(move |link| link.rel == rel)
    }

    /// Whether the synthetic curie-forcing link is present
    pub fn requires_curies(&self) -> bool {
        self.0.iter().any(Link::is_curies_required)
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

impl IntoIterator for Links {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Link> for Links {
    fn extend<I: IntoIterator<Item = Link>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
