//! Curie providers
//!
//! A curie provider decides whether a relation gets a namespace prefix and
//! which curie declarations a document advertises under `_links.curies`.

use crate::error::{HalError, Result};
use hal_model::{Curie, Links, Relation};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A curie declaration as rendered in `_links.curies`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurieEntry {
    pub href: String,
    pub name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl CurieEntry {
    fn from_curie(curie: &Curie, base_uri: Option<&str>) -> Self {
        Self {
            href: curie.href(base_uri),
            name: curie.name().to_string(),
            templated: curie.template().has_variables(),
        }
    }
}

/// Namespaces relations and supplies curie declarations
pub trait CurieProvider: Send + Sync {
    /// The relation to render for `rel`
    ///
    /// Registered relations and relations that already carry a prefix are
    /// returned unchanged.
    fn namespaced_relation(&self, rel: &Relation) -> Relation;

    /// Curie declarations for a document whose emitted links are `links`
    ///
    /// A curies-required sentinel among the links means embedded relations
    /// were namespaced with the default curie.
    fn curie_information(&self, links: &Links) -> Vec<CurieEntry>;

    /// Whether curies are ever rendered
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Never namespaces and never renders curies
#[derive(Clone, Debug, Default)]
pub struct NoCurieProvider;

impl CurieProvider for NoCurieProvider {
    fn namespaced_relation(&self, rel: &Relation) -> Relation {
        rel.clone()
    }

    fn curie_information(&self, _links: &Links) -> Vec<CurieEntry> {
        Vec::new()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Advertises every registered curie
///
/// Relations are prefixed with the default curie: the one named explicitly,
/// or the only registered one.
#[derive(Clone, Debug)]
pub struct DefaultCurieProvider {
    curies: Vec<Curie>,
    default_curie: Option<String>,
    base_uri: Option<String>,
}

impl DefaultCurieProvider {
    /// Create a provider from registered curies
    ///
    /// A later curie with the same name replaces the earlier one.
    pub fn new(curies: impl IntoIterator<Item = Curie>) -> Self {
        let mut registered: Vec<Curie> = Vec::new();
        for curie in curies {
            match registered.iter_mut().find(|c| c.name() == curie.name()) {
                Some(existing) => *existing = curie,
                None => registered.push(curie),
            }
        }
        let default_curie = match registered.as_slice() {
            [only] => Some(only.name().to_string()),
            _ => None,
        };
        Self {
            curies: registered,
            default_curie,
            base_uri: None,
        }
    }

    /// Create a provider with a single curie, which becomes the default
    pub fn single(name: &str, template: &str) -> Result<Self> {
        Ok(Self::new([Curie::new(name, template)?]))
    }

    /// Set the default curie. It must be registered.
    pub fn with_default_curie(mut self, name: &str) -> Result<Self> {
        if !self.curies.iter().any(|c| c.name() == name) {
            return Err(HalError::UnknownCurie {
                name: name.to_string(),
            });
        }
        self.default_curie = Some(name.to_string());
        Ok(self)
    }

    /// Resolve relative curie templates against this base URI
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn default_curie(&self) -> Option<&str> {
        self.default_curie.as_deref()
    }

    pub fn curies(&self) -> &[Curie] {
        &self.curies
    }

    fn entry(&self, curie: &Curie) -> CurieEntry {
        CurieEntry::from_curie(curie, self.base_uri.as_deref())
    }

    fn find(&self, name: &str) -> Option<&Curie> {
        self.curies.iter().find(|c| c.name() == name)
    }
}

impl CurieProvider for DefaultCurieProvider {
    fn namespaced_relation(&self, rel: &Relation) -> Relation {
        match &self.default_curie {
            Some(curie) => rel.curie_if_uncuried(curie),
            None => rel.clone(),
        }
    }

    fn curie_information(&self, _links: &Links) -> Vec<CurieEntry> {
        self.curies.iter().map(|c| self.entry(c)).collect()
    }
}

/// Advertises only the curies referenced by the emitted links
///
/// The default curie is advertised as well when curied embedded relations
/// are present, or when no link references a curie.
#[derive(Clone, Debug)]
pub struct ReferencedCurieProvider {
    inner: DefaultCurieProvider,
}

impl ReferencedCurieProvider {
    pub fn new(inner: DefaultCurieProvider) -> Self {
        Self { inner }
    }
}

impl CurieProvider for ReferencedCurieProvider {
    fn namespaced_relation(&self, rel: &Relation) -> Relation {
        self.inner.namespaced_relation(rel)
    }

    fn curie_information(&self, links: &Links) -> Vec<CurieEntry> {
        let mut names: Vec<String> = links
            .iter()
            .filter(|link| !link.is_curies_required())
            .filter_map(|link| {
                let rel = self.inner.namespaced_relation(link.rel());
                rel.curie().map(str::to_string)
            })
            .collect();

        if links.requires_curies() || names.is_empty() {
            if let Some(default) = self.inner.default_curie() {
                debug!(curie = default, "advertising default curie");
                names.push(default.to_string());
            }
        }

        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .filter_map(|name| self.inner.find(&name).map(|c| self.inner.entry(c)))
            .collect()
    }
}
