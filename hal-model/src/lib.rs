//! Format-agnostic hypermedia model
//!
//! This crate defines the values the HAL codec arranges into documents:
//! relations, links, link lists, URI templates and curies. It knows nothing
//! about JSON; rendering and parsing live in `hal-format`.
//!
//! # Key Design Principles
//!
//! 1. **Immutable values**: `with_*` methods on [`Link`] return new links
//! 2. **Derived flags**: whether a link is templated comes from its href
//! 3. **Validated construction**: empty hrefs, empty relations and curies
//!    without exactly one template variable are rejected up front
//! 4. **Order preserving**: [`Links`] keeps insertion order and duplicates
//!
//! # Example
//!
//! ```
//! use hal_model::{Link, Links, Relation};
//!
//! let links = Links::new()
//!     .and(Link::self_link("/orders/1").unwrap())
//!     .and(Link::new("/orders/1/items{?page}", "items").unwrap());
//!
//! assert!(links.get_link("items").unwrap().is_templated());
//! assert_eq!(Relation::new("items").curie_if_uncuried("acme"), "acme:items");
//! ```

pub mod curie;
pub mod error;
pub mod link;
pub mod relation;
pub mod template;

pub use curie::Curie;
pub use error::{ModelError, Result};
pub use link::{Link, Links};
pub use relation::Relation;
pub use template::UriTemplate;
