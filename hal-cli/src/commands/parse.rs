use crate::commands::registry;
use crate::error::CliResult;
use crate::input::{read_json, InputSource};
use crate::output::{format_json, link_json};
use hal_format::{HalSettings, ParsedResource};
use serde_json::{json, Map, Value as JsonValue};
use tracing::info;

pub fn run(
    settings: &HalSettings,
    source: &InputSource,
    media_type: &str,
    pretty: bool,
) -> CliResult<()> {
    let document = read_json(source)?;
    let strategy = registry(settings)?.resolve(media_type)?;
    let parsed = strategy.read(&document)?;
    info!(
        links = parsed.links.len(),
        embedded = parsed.embedded.len(),
        "parsed document"
    );
    println!("{}", format_json(&flatten(&parsed), pretty));
    Ok(())
}

/// `{"links": [...], "embedded": [{"rel", "value"}], "content": ..., "page": ...}`
pub fn flatten(parsed: &ParsedResource) -> JsonValue {
    let mut view = Map::new();
    view.insert(
        "links".to_string(),
        parsed.links.iter().map(link_json).collect(),
    );
    view.insert(
        "embedded".to_string(),
        parsed
            .embedded
            .iter()
            .map(|e| json!({"rel": e.relation.as_str(), "value": embedded_value(&e.resource)}))
            .collect(),
    );
    view.insert(
        "content".to_string(),
        parsed.content.clone().unwrap_or(JsonValue::Null),
    );
    if let Some(page) = parsed.page {
        view.insert("page".to_string(), json!(page));
    }
    JsonValue::Object(view)
}

/// Bare content for plain embeds, the flattened view otherwise
fn embedded_value(resource: &ParsedResource) -> JsonValue {
    if resource.links.is_empty() && resource.embedded.is_empty() && resource.page.is_none() {
        resource.content.clone().unwrap_or(JsonValue::Null)
    } else {
        flatten(resource)
    }
}
