//! Registered link relations
//!
//! See <https://www.iana.org/assignments/link-relations/link-relations.xhtml>.
//! Relations in this list are never prefixed with a curie.

/// `self` relation
pub const SELF: &str = "self";

/// `next` relation
pub const NEXT: &str = "next";

/// `prev` relation
pub const PREV: &str = "prev";

/// `first` relation
pub const FIRST: &str = "first";

/// `last` relation
pub const LAST: &str = "last";

/// `search` relation
pub const SEARCH: &str = "search";

/// `profile` relation
pub const PROFILE: &str = "profile";

/// `item` relation
pub const ITEM: &str = "item";

/// `collection` relation
pub const COLLECTION: &str = "collection";

/// All registered relations
pub const LINK_RELATIONS: &[&str] = &[
    "about",
    "alternate",
    "appendix",
    "archives",
    "author",
    "blocked-by",
    "bookmark",
    "canonical",
    "chapter",
    "cite-as",
    "collection",
    "contents",
    "convertedFrom",
    "copyright",
    "create-form",
    "current",
    "describedBy",
    "describes",
    "disclosure",
    "dns-prefetch",
    "duplicate",
    "edit",
    "edit-form",
    "edit-media",
    "enclosure",
    "first",
    "glossary",
    "help",
    "hosts",
    "hub",
    "icon",
    "index",
    "intervalAfter",
    "intervalBefore",
    "intervalContains",
    "intervalDisjoint",
    "intervalDuring",
    "intervalEquals",
    "intervalFinishedBy",
    "intervalFinishes",
    "intervalIn",
    "intervalMeets",
    "intervalMetBy",
    "intervalOverlappedBy",
    "intervalOverlaps",
    "intervalStartedBy",
    "intervalStarts",
    "item",
    "last",
    "latest-version",
    "license",
    "lrdd",
    "memento",
    "monitor",
    "monitor-group",
    "next",
    "next-archive",
    "nofollow",
    "noreferrer",
    "original",
    "payment",
    "pingback",
    "preconnect",
    "predecessor-version",
    "prefetch",
    "preload",
    "prerender",
    "prev",
    "preview",
    "previous",
    "prev-archive",
    "privacy-policy",
    "profile",
    "related",
    "restconf",
    "replies",
    "search",
    "section",
    "self",
    "service",
    "start",
    "stylesheet",
    "subsection",
    "successor-versions",
    "tag",
    "terms-of-service",
    "timegate",
    "timemap",
    "type",
    "up",
    "version-history",
    "via",
    "webmention",
    "working-copy",
    "working-copy-of",
];

/// Check whether a relation is registered. Comparison ignores ASCII case.
pub fn is_iana_rel(relation: &str) -> bool {
    LINK_RELATIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(relation))
}
