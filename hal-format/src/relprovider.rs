//! Link relation providers
//!
//! A provider maps the type of an embedded value to the relation it is
//! rendered under, once as a single item and once as a collection.
//! Providers compose: a [`DelegatingRelationProvider`] asks an ordered chain
//! and falls back to [`DefaultRelationProvider`], and a
//! [`CachingRelationProvider`] memoizes any provider.

use crate::inflector::{pluralize, uncapitalize};
use hal_model::Relation;
use hal_vocab::relations;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Identifies the type of an embedded value
///
/// Derived from the Rust type name (last path segment, generics stripped)
/// or given explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Create a type key from an explicit name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Type key of a Rust type (`alloc::string::String` -> `String`)
    pub fn of<T: ?Sized>() -> Self {
        Self::new(simple_type_name(std::any::type_name::<T>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Strip module path, references and generic arguments from a type name
fn simple_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    let base = base.trim_start_matches('&').trim_start_matches("mut ");
    base.rsplit("::").next().unwrap_or(base)
}

/// Which relation a lookup asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupContext {
    Item,
    Collection,
}

/// Maps value types to item and collection relations
pub trait LinkRelationProvider: Send + Sync {
    /// Relation for a single value of the type
    fn item_relation_for(&self, kind: &TypeKey) -> Option<Relation>;

    /// Relation for a collection of values of the type
    fn collection_relation_for(&self, kind: &TypeKey) -> Option<Relation>;

    /// Whether this provider can answer the lookup
    fn supports(&self, _kind: &TypeKey, _lookup: LookupContext) -> bool {
        true
    }

    /// Dispatch on the lookup context
    fn relation_for(&self, kind: &TypeKey, lookup: LookupContext) -> Option<Relation> {
        match lookup {
            LookupContext::Item => self.item_relation_for(kind),
            LookupContext::Collection => self.collection_relation_for(kind),
        }
    }
}

/// Renders everything under `content`
#[derive(Clone, Debug, Default)]
pub struct DefaultRelationProvider;

impl LinkRelationProvider for DefaultRelationProvider {
    fn item_relation_for(&self, _kind: &TypeKey) -> Option<Relation> {
        Some(Relation::new(relations::DEFAULT))
    }

    fn collection_relation_for(&self, _kind: &TypeKey) -> Option<Relation> {
        Some(Relation::new(relations::DEFAULT))
    }
}

/// Uncapitalized type name for items, its English plural for collections
///
/// `Order` renders as `order` / `orders`, `String` as `string` / `strings`.
#[derive(Clone, Debug, Default)]
pub struct InflectingRelationProvider;

impl LinkRelationProvider for InflectingRelationProvider {
    fn item_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        Some(Relation::new(uncapitalize(kind.as_str())))
    }

    fn collection_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        Some(Relation::new(pluralize(&uncapitalize(kind.as_str()))))
    }
}

#[derive(Clone, Debug, Default)]
struct FixedRelations {
    item: Option<Relation>,
    collection: Option<Relation>,
}

/// Explicitly registered relations per type
///
/// Only supports lookups for which a relation was registered.
#[derive(Clone, Debug, Default)]
pub struct FixedRelationProvider {
    relations: HashMap<TypeKey, FixedRelations>,
}

impl FixedRelationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both relations for a type
    pub fn with_relations(
        self,
        kind: impl Into<TypeKey>,
        item: impl Into<Relation>,
        collection: impl Into<Relation>,
    ) -> Self {
        let kind = kind.into();
        self.with_item_relation(kind.clone(), item)
            .with_collection_relation(kind, collection)
    }

    /// Register the item relation for a type
    pub fn with_item_relation(
        mut self,
        kind: impl Into<TypeKey>,
        item: impl Into<Relation>,
    ) -> Self {
        self.relations.entry(kind.into()).or_default().item = Some(item.into());
        self
    }

    /// Register the collection relation for a type
    pub fn with_collection_relation(
        mut self,
        kind: impl Into<TypeKey>,
        collection: impl Into<Relation>,
    ) -> Self {
        self.relations.entry(kind.into()).or_default().collection = Some(collection.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl LinkRelationProvider for FixedRelationProvider {
    fn item_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.relations.get(kind).and_then(|r| r.item.clone())
    }

    fn collection_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.relations.get(kind).and_then(|r| r.collection.clone())
    }

    fn supports(&self, kind: &TypeKey, lookup: LookupContext) -> bool {
        self.relations.get(kind).is_some_and(|r| match lookup {
            LookupContext::Item => r.item.is_some(),
            LookupContext::Collection => r.collection.is_some(),
        })
    }
}

/// Ordered chain of providers; the first supporting provider answers
pub struct DelegatingRelationProvider {
    delegates: Vec<Arc<dyn LinkRelationProvider>>,
    fallback: Arc<dyn LinkRelationProvider>,
}

impl DelegatingRelationProvider {
    /// Create a chain falling back to [`DefaultRelationProvider`]
    pub fn new(delegates: Vec<Arc<dyn LinkRelationProvider>>) -> Self {
        Self {
            delegates,
            fallback: Arc::new(DefaultRelationProvider),
        }
    }

    /// Replace the fallback provider
    pub fn with_fallback(mut self, fallback: Arc<dyn LinkRelationProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    fn delegate_for(&self, kind: &TypeKey, lookup: LookupContext) -> &dyn LinkRelationProvider {
        self.delegates
            .iter()
            .find(|p| p.supports(kind, lookup))
            .map_or(self.fallback.as_ref(), |p| p.as_ref())
    }
}

impl std::fmt::Debug for DelegatingRelationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatingRelationProvider")
            .field("delegates", &self.delegates.len())
            .finish()
    }
}

impl LinkRelationProvider for DelegatingRelationProvider {
    fn item_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.delegate_for(kind, LookupContext::Item)
            .item_relation_for(kind)
    }

    fn collection_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.delegate_for(kind, LookupContext::Collection)
            .collection_relation_for(kind)
    }
}

/// Memoizes another provider's answers per type and lookup
///
/// Safe to share between concurrent serializations.
pub struct CachingRelationProvider {
    inner: Arc<dyn LinkRelationProvider>,
    cache: RwLock<HashMap<(TypeKey, LookupContext), Option<Relation>>>,
}

impl CachingRelationProvider {
    pub fn new(inner: Arc<dyn LinkRelationProvider>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of memoized lookups
    pub fn cached_entries(&self) -> usize {
        self.cache.read().len()
    }

    fn lookup(&self, kind: &TypeKey, lookup: LookupContext) -> Option<Relation> {
        if let Some(hit) = self.cache.read().get(&(kind.clone(), lookup)) {
            return hit.clone();
        }
        let computed = self.inner.relation_for(kind, lookup);
        trace!(kind = %kind, ?lookup, relation = ?computed, "caching relation lookup");
        self.cache
            .write()
            .entry((kind.clone(), lookup))
            .or_insert(computed)
            .clone()
    }
}

impl std::fmt::Debug for CachingRelationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingRelationProvider")
            .field("cached_entries", &self.cached_entries())
            .finish()
    }
}

impl LinkRelationProvider for CachingRelationProvider {
    fn item_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.lookup(kind, LookupContext::Item)
    }

    fn collection_relation_for(&self, kind: &TypeKey) -> Option<Relation> {
        self.lookup(kind, LookupContext::Collection)
    }

    fn supports(&self, kind: &TypeKey, lookup: LookupContext) -> bool {
        self.inner.supports(kind, lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;

    #[test]
    fn test_type_key_of() {
        assert_eq!(TypeKey::of::<String>().as_str(), "String");
        assert_eq!(TypeKey::of::<Order>().as_str(), "Order");
        assert_eq!(TypeKey::of::<Vec<Order>>().as_str(), "Vec");
        assert_eq!(TypeKey::of::<&str>().as_str(), "str");
        assert_eq!(TypeKey::of::<i64>().as_str(), "i64");
    }

    #[test]
    fn test_default_provider() {
        let provider = DefaultRelationProvider;
        let kind = TypeKey::new("Order");
        assert_eq!(provider.item_relation_for(&kind).unwrap(), "content");
        assert_eq!(provider.collection_relation_for(&kind).unwrap(), "content");
    }

    #[test]
    fn test_inflecting_provider() {
        let provider = InflectingRelationProvider;
        let kind = TypeKey::new("OrderCategory");
        assert_eq!(provider.item_relation_for(&kind).unwrap(), "orderCategory");
        assert_eq!(
            provider.collection_relation_for(&kind).unwrap(),
            "orderCategories"
        );
    }

    #[test]
    fn test_fixed_provider_supports_only_registered() {
        let provider = FixedRelationProvider::new().with_item_relation("Order", "purchase");
        let order = TypeKey::new("Order");
        assert!(provider.supports(&order, LookupContext::Item));
        assert!(!provider.supports(&order, LookupContext::Collection));
        assert!(!provider.supports(&TypeKey::new("Invoice"), LookupContext::Item));
    }

    #[test]
    fn test_delegating_first_supporting_wins() {
        let fixed = FixedRelationProvider::new().with_relations("Order", "purchase", "purchases");
        let provider = DelegatingRelationProvider::new(vec![
            Arc::new(fixed),
            Arc::new(InflectingRelationProvider),
        ]);
        let order = TypeKey::new("Order");
        assert_eq!(provider.item_relation_for(&order).unwrap(), "purchase");
        assert_eq!(provider.collection_relation_for(&order).unwrap(), "purchases");

        let invoice = TypeKey::new("Invoice");
        assert_eq!(provider.item_relation_for(&invoice).unwrap(), "invoice");
    }

    #[test]
    fn test_delegating_falls_back_to_default() {
        let fixed = FixedRelationProvider::new().with_item_relation("Order", "purchase");
        let provider = DelegatingRelationProvider::new(vec![Arc::new(fixed)]);
        let order = TypeKey::new("Order");
        assert_eq!(provider.collection_relation_for(&order).unwrap(), "content");
    }

    #[test]
    fn test_caching_provider_memoizes() {
        let provider = CachingRelationProvider::new(Arc::new(InflectingRelationProvider));
        let kind = TypeKey::new("Order");
        assert_eq!(provider.item_relation_for(&kind).unwrap(), "order");
        assert_eq!(provider.item_relation_for(&kind).unwrap(), "order");
        assert_eq!(provider.collection_relation_for(&kind).unwrap(), "orders");
        assert_eq!(provider.cached_entries(), 2);
    }

    #[test]
    fn test_caching_provider_concurrent_use() {
        let provider = Arc::new(CachingRelationProvider::new(Arc::new(
            InflectingRelationProvider,
        )));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    provider
                        .collection_relation_for(&TypeKey::new("Category"))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "categories");
        }
        assert_eq!(provider.cached_entries(), 1);
    }
}
