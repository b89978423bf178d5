//! Link relation and wire-format constants for HAL documents
//!
//! This crate provides a centralized location for the relation names, JSON
//! keys and media types shared by the model, the codec and the CLI.
//!
//! # Organization
//!
//! Constants are organized by concern:
//! - `iana` - Registered (IANA) link relations, which are never namespaced
//! - `keys` - Reserved JSON keys of the HAL wire format
//! - `media_types` - Media types a document can be rendered as
//! - `messages` - Message-code templates used for title lookup

pub mod iana;

pub use iana::is_iana_rel;

/// Reserved JSON keys of the HAL wire format
pub mod keys {
    /// Key of the link block
    pub const LINKS: &str = "_links";

    /// Key of the embedded-resource block
    pub const EMBEDDED: &str = "_embedded";

    /// Relation under which curie declarations are rendered
    pub const CURIES: &str = "curies";

    /// Key of the page metadata block of paged collections
    pub const PAGE: &str = "page";

    /// Link attribute carrying the target
    pub const HREF: &str = "href";

    /// Link attribute carrying the relation (plain JSON only; HAL uses the field name)
    pub const REL: &str = "rel";

    /// Link attribute flagging a URI template
    pub const TEMPLATED: &str = "templated";
}

/// Relation names the engine falls back to
pub mod relations {
    /// Relation used when no relation can be derived for an embedded value
    pub const DEFAULT: &str = "content";

    /// Separator between a curie prefix and the local part of a relation
    pub const CURIE_SEPARATOR: char = ':';
}

/// Media type constants
pub mod media_types {
    /// HAL JSON
    pub const HAL_JSON: &str = "application/hal+json";

    /// Plain JSON
    pub const JSON: &str = "application/json";
}

/// Message-code templates for title resolution
pub mod messages {
    /// Prefix of every link title code (`_links.<rel>.title`)
    pub const TITLE_PREFIX: &str = "_links.";

    /// Suffix of every link title code
    pub const TITLE_SUFFIX: &str = ".title";

    /// Build the title message code for a relation value
    pub fn title_code(relation: &str) -> String {
        format!("{TITLE_PREFIX}{relation}{TITLE_SUFFIX}")
    }
}
