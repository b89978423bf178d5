//! Relation-keyed aggregation of embedded values
//!
//! Values are grouped into buckets keyed by relation. A type's first value
//! lands under its item relation; the second value of the same type moves
//! the bucket to the collection relation, where every further value is
//! appended. Buckets keep the order in which their final key was inserted.

use crate::config::NamingStrategy;
use crate::curie::CurieProvider;
use crate::error::{HalError, Result};
use crate::relprovider::{LinkRelationProvider, LookupContext, TypeKey};
use crate::resource::{EmbeddedItem, EmbeddedValue};
use hal_model::Relation;
use hal_vocab::relations;
use std::sync::Arc;
use tracing::{debug, trace};

/// Values grouped under one relation
#[derive(Debug, Clone, PartialEq)]
pub struct RelationBucket {
    relation: Relation,
    items: Vec<EmbeddedValue>,
    forced_collection: bool,
}

impl RelationBucket {
    fn new(relation: Relation, forced_collection: bool) -> Self {
        Self {
            relation,
            items: Vec::new(),
            forced_collection,
        }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn items(&self) -> &[EmbeddedValue] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rendered as an array: two or more items, or created as a collection
    pub fn is_collection(&self) -> bool {
        self.forced_collection || self.items.len() > 1
    }
}

/// Builds an [`EmbeddedAggregator`]
#[derive(Default)]
pub struct EmbeddedAggregatorBuilder {
    relation_provider: Option<Arc<dyn LinkRelationProvider>>,
    curie_provider: Option<Arc<dyn CurieProvider>>,
    prefer_collections: bool,
    naming_strategy: Option<NamingStrategy>,
}

impl EmbeddedAggregatorBuilder {
    pub fn relation_provider(mut self, provider: Arc<dyn LinkRelationProvider>) -> Self {
        self.relation_provider = Some(provider);
        self
    }

    /// Namespace derived relations with this curie provider
    pub fn curie_provider(mut self, provider: Arc<dyn CurieProvider>) -> Self {
        self.curie_provider = Some(provider);
        self
    }

    /// Treat every plain value as a one-element collection
    pub fn prefer_collections(mut self, prefer: bool) -> Self {
        self.prefer_collections = prefer;
        self
    }

    /// Rename the local part of application relations
    pub fn naming_strategy(mut self, strategy: Option<NamingStrategy>) -> Self {
        self.naming_strategy = strategy;
        self
    }

    /// Build the aggregator. Fails without a relation provider.
    pub fn build(self) -> Result<EmbeddedAggregator> {
        let relation_provider = self
            .relation_provider
            .ok_or(HalError::MissingRelationProvider)?;
        Ok(EmbeddedAggregator {
            relation_provider,
            curie_provider: self.curie_provider.filter(|p| p.is_enabled()),
            prefer_collections: self.prefer_collections,
            naming_strategy: self.naming_strategy,
            buckets: Vec::new(),
        })
    }
}

/// Groups embedded items into relation buckets
pub struct EmbeddedAggregator {
    relation_provider: Arc<dyn LinkRelationProvider>,
    curie_provider: Option<Arc<dyn CurieProvider>>,
    prefer_collections: bool,
    naming_strategy: Option<NamingStrategy>,
    buckets: Vec<RelationBucket>,
}

impl std::fmt::Debug for EmbeddedAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedAggregator")
            .field("prefer_collections", &self.prefer_collections)
            .field("curie_provider", &self.curie_provider.as_ref().map(|_| "<curies>"))
            .field("naming_strategy", &self.naming_strategy)
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl EmbeddedAggregator {
    pub fn builder() -> EmbeddedAggregatorBuilder {
        EmbeddedAggregatorBuilder::default()
    }

    /// Aggregator with a relation provider and no curies
    pub fn new(relation_provider: Arc<dyn LinkRelationProvider>) -> Self {
        Self {
            relation_provider,
            curie_provider: None,
            prefer_collections: false,
            naming_strategy: None,
            buckets: Vec::new(),
        }
    }

    /// Add an item. Absent values are skipped.
    pub fn add(&mut self, item: EmbeddedItem) -> Result<()> {
        match item {
            EmbeddedItem::Plain(value) => {
                if value.is_absent() {
                    trace!(kind = %value.kind(), "skipping absent embedded value");
                    return Ok(());
                }
                self.add_plain(value);
                Ok(())
            }
            EmbeddedItem::Related { value, relation } => {
                if value.is_absent() {
                    return Ok(());
                }
                let relation = self.rename(relation);
                self.bucket_mut(&relation, false).items.push(value);
                Ok(())
            }
            EmbeddedItem::Collection {
                values,
                relation,
                element_type,
            } => self.add_collection(values, relation, element_type),
        }
    }

    /// Add every item in order
    pub fn add_all(&mut self, items: impl IntoIterator<Item = EmbeddedItem>) -> Result<()> {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    fn add_plain(&mut self, value: EmbeddedValue) {
        let collection = self.derived_relation(value.kind(), LookupContext::Collection);

        if self.prefer_collections {
            self.bucket_mut(&collection, true).items.push(value);
            return;
        }

        if let Some(bucket) = self.find_mut(&collection) {
            bucket.items.push(value);
            return;
        }

        let singular = self.derived_relation(value.kind(), LookupContext::Item);
        match self.position(&singular) {
            None => self.bucket_mut(&singular, false).items.push(value),
            Some(idx) => {
                let mut bucket = self.buckets.remove(idx);
                bucket.items.push(value);
                debug!(
                    from = %singular,
                    to = %collection,
                    items = bucket.items.len(),
                    "promoting embedded relation to collection"
                );
                bucket.relation = collection;
                self.buckets.push(bucket);
            }
        }
    }

    fn add_collection(
        &mut self,
        values: Vec<EmbeddedValue>,
        relation: Option<Relation>,
        element_type: Option<TypeKey>,
    ) -> Result<()> {
        let values: Vec<EmbeddedValue> = values.into_iter().filter(|v| !v.is_absent()).collect();
        let relation = match relation {
            Some(explicit) => self.rename(explicit),
            None => {
                let kind = element_type
                    .or_else(|| values.first().map(|v| v.kind().clone()))
                    .ok_or_else(|| {
                        HalError::invalid_wrapper(
                            "collection has no relation, no element type and no elements",
                        )
                    })?;
                self.derived_relation(&kind, LookupContext::Collection)
            }
        };
        let bucket = self.bucket_mut(&relation, true);
        bucket.forced_collection = true;
        bucket.items.extend(values);
        Ok(())
    }

    /// Relation from the provider, namespaced and renamed
    fn derived_relation(&self, kind: &TypeKey, lookup: LookupContext) -> Relation {
        let relation = self
            .relation_provider
            .relation_for(kind, lookup)
            .unwrap_or_else(|| Relation::new(relations::DEFAULT));
        let relation = match &self.curie_provider {
            Some(curies) => curies.namespaced_relation(&relation),
            None => relation,
        };
        self.rename(relation)
    }

    fn rename(&self, relation: Relation) -> Relation {
        match self.naming_strategy {
            Some(strategy) if !relation.is_iana() => {
                relation.map_local_part(|local| strategy.translate(local))
            }
            _ => relation,
        }
    }

    fn position(&self, relation: &Relation) -> Option<usize> {
        self.buckets.iter().position(|b| &b.relation == relation)
    }

    fn find_mut(&mut self, relation: &Relation) -> Option<&mut RelationBucket> {
        self.buckets.iter_mut().find(|b| &b.relation == relation)
    }

    /// Existing bucket for the relation, or a new one appended at the end
    fn bucket_mut(&mut self, relation: &Relation, collection: bool) -> &mut RelationBucket {
        let idx = match self.position(relation) {
            Some(idx) => idx,
            None => {
                self.buckets.push(RelationBucket::new(relation.clone(), collection));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx]
    }

    /// Buckets in insertion order of their final relation
    pub fn as_map(&self) -> &[RelationBucket] {
        &self.buckets
    }

    /// Bucket for a relation
    pub fn get(&self, relation: &str) -> Option<&RelationBucket> {
        self.buckets.iter().find(|b| b.relation == relation)
    }

    /// Whether any bucket is keyed by a namespaced relation
    pub fn has_curied_embed(&self) -> bool {
        self.buckets.iter().any(|b| b.relation.is_curied())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_buckets(self) -> Vec<RelationBucket> {
        self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curie::DefaultCurieProvider;
    use crate::relprovider::{DefaultRelationProvider, InflectingRelationProvider};
    use serde_json::json;

    fn inflecting() -> EmbeddedAggregator {
        EmbeddedAggregator::new(Arc::new(InflectingRelationProvider))
    }

    fn string(value: &str) -> EmbeddedItem {
        EmbeddedItem::plain(EmbeddedValue::new("String", json!(value)))
    }

    fn keys(aggregator: &EmbeddedAggregator) -> Vec<&str> {
        aggregator.as_map().iter().map(|b| b.relation().as_str()).collect()
    }

    fn contents(bucket: &RelationBucket) -> Vec<serde_json::Value> {
        bucket
            .items()
            .iter()
            .filter_map(|v| v.content().cloned())
            .collect()
    }

    #[test]
    fn test_builder_requires_relation_provider() {
        let result = EmbeddedAggregator::builder().build();
        assert!(matches!(result, Err(HalError::MissingRelationProvider)));
    }

    #[test]
    fn test_single_value_uses_item_relation() {
        let mut aggregator = inflecting();
        aggregator.add(string("foo")).unwrap();
        assert_eq!(keys(&aggregator), ["string"]);
        assert!(!aggregator.as_map()[0].is_collection());
    }

    #[test]
    fn test_second_value_promotes_bucket() {
        let mut aggregator = inflecting();
        aggregator.add(string("foo")).unwrap();
        aggregator.add(string("bar")).unwrap();
        assert_eq!(keys(&aggregator), ["strings"]);
        let bucket = aggregator.get("strings").unwrap();
        assert!(bucket.is_collection());
        assert_eq!(contents(bucket), [json!("foo"), json!("bar")]);
    }

    #[test]
    fn test_third_value_appends_without_renaming() {
        let mut aggregator = inflecting();
        for value in ["a", "b", "c"] {
            aggregator.add(string(value)).unwrap();
        }
        assert_eq!(keys(&aggregator), ["strings"]);
        assert_eq!(aggregator.get("strings").unwrap().len(), 3);
    }

    #[test]
    fn test_promoted_bucket_moves_to_end() {
        let mut aggregator = inflecting();
        aggregator.add(string("foo")).unwrap();
        aggregator
            .add(EmbeddedItem::plain(EmbeddedValue::new("Long", json!(1))))
            .unwrap();
        aggregator.add(string("bar")).unwrap();
        assert_eq!(keys(&aggregator), ["long", "strings"]);
    }

    #[test]
    fn test_mixed_types_keep_separate_buckets() {
        let mut aggregator = inflecting();
        aggregator.add(string("foo")).unwrap();
        aggregator
            .add(EmbeddedItem::plain(EmbeddedValue::new("Long", json!(1))))
            .unwrap();
        assert_eq!(keys(&aggregator), ["string", "long"]);
    }

    #[test]
    fn test_absent_value_is_skipped() {
        let mut aggregator = inflecting();
        aggregator
            .add(EmbeddedItem::plain(EmbeddedValue::new("String", serde_json::Value::Null)))
            .unwrap();
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_related_values_never_promote() {
        let mut aggregator = inflecting();
        let value = EmbeddedValue::new("String", json!("foo"));
        aggregator
            .add(EmbeddedItem::related(value.clone(), "foo"))
            .unwrap();
        assert_eq!(keys(&aggregator), ["foo"]);
        assert!(!aggregator.as_map()[0].is_collection());

        aggregator.add(EmbeddedItem::related(value, "foo")).unwrap();
        assert_eq!(keys(&aggregator), ["foo"]);
        assert_eq!(aggregator.get("foo").unwrap().len(), 2);
    }

    #[test]
    fn test_related_value_ignores_prefer_collections() {
        let mut aggregator = EmbeddedAggregator::builder()
            .relation_provider(Arc::new(InflectingRelationProvider))
            .prefer_collections(true)
            .build()
            .unwrap();
        aggregator
            .add(EmbeddedItem::related(
                EmbeddedValue::new("String", json!("foo")),
                "foo",
            ))
            .unwrap();
        assert_eq!(keys(&aggregator), ["foo"]);
        assert!(!aggregator.as_map()[0].is_collection());
    }

    #[test]
    fn test_prefer_collections_uses_collection_relation() {
        let mut aggregator = EmbeddedAggregator::builder()
            .relation_provider(Arc::new(InflectingRelationProvider))
            .prefer_collections(true)
            .build()
            .unwrap();
        aggregator.add(string("Sample")).unwrap();
        assert_eq!(keys(&aggregator), ["strings"]);
        assert!(aggregator.as_map()[0].is_collection());
    }

    #[test]
    fn test_default_provider_groups_under_content() {
        let mut aggregator = EmbeddedAggregator::new(Arc::new(DefaultRelationProvider));
        aggregator.add(string("first")).unwrap();
        aggregator.add(string("second")).unwrap();
        assert_eq!(keys(&aggregator), ["content"]);
        assert!(aggregator.get("content").unwrap().is_collection());
    }

    #[test]
    fn test_empty_collection_with_element_type() {
        let mut aggregator = inflecting();
        aggregator
            .add(EmbeddedItem::empty_collection_of("Pojo"))
            .unwrap();
        assert_eq!(keys(&aggregator), ["pojos"]);
        let bucket = aggregator.get("pojos").unwrap();
        assert!(bucket.is_empty());
        assert!(bucket.is_collection());
    }

    #[test]
    fn test_collection_without_relation_or_type_is_invalid() {
        let mut aggregator = inflecting();
        let result = aggregator.add(EmbeddedItem::collection(Vec::new()));
        assert!(matches!(
            result,
            Err(HalError::InvalidEmbeddedWrapper { .. })
        ));
    }

    #[test]
    fn test_curied_embeds() {
        let curies = DefaultCurieProvider::single("curie", "http://localhost/{rel}").unwrap();
        let mut aggregator = EmbeddedAggregator::builder()
            .relation_provider(Arc::new(InflectingRelationProvider))
            .curie_provider(Arc::new(curies))
            .build()
            .unwrap();
        aggregator.add(string("foo")).unwrap();
        assert_eq!(keys(&aggregator), ["curie:string"]);
        assert!(aggregator.has_curied_embed());

        aggregator.add(string("bar")).unwrap();
        assert_eq!(keys(&aggregator), ["curie:strings"]);
    }

    #[test]
    fn test_naming_strategy_applies_to_relations() {
        let mut aggregator = EmbeddedAggregator::builder()
            .relation_provider(Arc::new(InflectingRelationProvider))
            .naming_strategy(Some(NamingStrategy::SnakeCase))
            .build()
            .unwrap();
        aggregator
            .add(EmbeddedItem::plain(EmbeddedValue::new("SomeSample", json!({}))))
            .unwrap();
        assert_eq!(keys(&aggregator), ["some_sample"]);
    }
}
