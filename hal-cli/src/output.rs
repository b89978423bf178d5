use hal_format::link_attributes;
use hal_model::Link;
use hal_vocab::keys;
use serde_json::{Map, Value as JsonValue};

/// Format a JSON value for display.
pub fn format_json(json: &JsonValue, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
    } else {
        json.to_string()
    }
}

/// Flat view of a link: `rel` first, then the HAL attributes that are set.
pub fn link_json(link: &Link) -> JsonValue {
    let mut view = Map::new();
    view.insert(keys::REL.to_string(), link.rel().as_str().into());
    view.extend(link_attributes(link, link.title()));
    JsonValue::Object(view)
}
