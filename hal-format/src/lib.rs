//! HAL (Hypertext Application Language) rendering and parsing
//!
//! This crate arranges links and embedded resources into relation-keyed
//! HAL documents and parses such documents back into flat lists.
//!
//! - Links sharing a relation are grouped; a relation renders as an array
//!   when it holds several links or when its render mode says so
//! - Embedded values are grouped by the relation derived from their type
//!   and promoted to the collection relation when a second value arrives
//! - Application relations can be namespaced with curies, which are then
//!   declared under `_links.curies`
//!
//! # Example
//!
//! ```
//! use hal_format::{DefaultCurieProvider, HalMapper, Resource};
//! use hal_model::Link;
//!
//! let mapper = HalMapper::builder()
//!     .curie_provider(
//!         DefaultCurieProvider::single("acme", "http://localhost:8080/rels/{rel}").unwrap(),
//!     )
//!     .build();
//!
//! let resource = Resource::empty()
//!     .with_link(Link::self_link("/orders").unwrap())
//!     .with_link(Link::new("/orders/1", "order").unwrap());
//!
//! let json = mapper.write_string(&resource).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"_links":{"self":{"href":"/orders"},"acme:order":{"href":"/orders/1"},"curies":[{"href":"http://localhost:8080/rels/{rel}","name":"acme","templated":true}]}}"#
//! );
//! ```

pub mod config;
pub mod curie;
pub mod document;
pub mod embedded;
pub mod error;
mod inflector;
pub mod links;
pub mod mapper;
pub mod message;
pub mod registry;
pub mod relprovider;
pub mod render_mode;
pub mod resource;
pub mod settings;

pub use config::{HalConfiguration, NamingStrategy};
pub use curie::{
    CurieEntry, CurieProvider, DefaultCurieProvider, NoCurieProvider, ReferencedCurieProvider,
};
pub use document::{DocumentAssembler, ParsedEmbedded, ParsedResource};
pub use embedded::{EmbeddedAggregator, EmbeddedAggregatorBuilder, RelationBucket};
pub use error::{ConfigFileError, HalError, Result};
pub use links::{link_attributes, LinkCodec, RenderDepth};
pub use mapper::{HalMapper, HalMapperBuilder};
pub use message::{title_for, MapMessageResolver, MessageResolver, NoMessages};
pub use registry::{FormatStrategy, HalStrategy, PlainJsonStrategy, StrategyRegistry};
pub use relprovider::{
    CachingRelationProvider, DefaultRelationProvider, DelegatingRelationProvider,
    FixedRelationProvider, InflectingRelationProvider, LinkRelationProvider, LookupContext,
    TypeKey,
};
pub use render_mode::{RelationPattern, RenderMode, RenderModeConfiguration};
pub use resource::{EmbeddedItem, EmbeddedValue, PageMetadata, Resource, ResourceKind};
pub use settings::{load_config, HalSettings};
