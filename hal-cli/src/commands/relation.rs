use crate::error::{CliError, CliResult};
use colored::Colorize;
use hal_format::{HalSettings, RenderMode};
use hal_model::Relation;

pub fn run(settings: &HalSettings, rel: &str) -> CliResult<()> {
    println!("{}", describe(settings, rel)?);
    Ok(())
}

/// Rendered relation, render mode and resolved title of a link relation
pub fn describe(settings: &HalSettings, rel: &str) -> CliResult<String> {
    let relation = Relation::new(rel);
    if relation.is_blank() {
        return Err(CliError::Usage("relation must not be blank".to_string()));
    }

    let mapper = settings.build_mapper()?;
    let codec = mapper.link_codec();
    let mode = match codec.render_mode_for(&relation) {
        RenderMode::Single => "single",
        RenderMode::Array => "array",
    };
    let title = codec
        .resolved_title(&relation)
        .unwrap_or_else(|| "-".to_string());

    Ok(format!(
        "{} {}\n{} {}\n{} {}",
        "relation:".bold(),
        codec.effective_relation(&relation),
        "mode:    ".bold(),
        mode,
        "title:   ".bold(),
        title
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> HalSettings {
        let mut settings: HalSettings = serde_json::from_value(serde_json::json!({
            "render": {"overrides": [{"pattern": "acme:*", "mode": "array"}]},
            "curies": {
                "default": "acme",
                "namespaces": [{"name": "acme", "template": "http://localhost/rels/{rel}"}]
            }
        }))
        .unwrap();
        settings
            .messages
            .insert("_links.acme:orders.title".to_string(), "Orders".to_string());
        settings
    }

    #[test]
    fn test_describe_curied_relation() {
        colored::control::set_override(false);
        assert_eq!(
            describe(&settings(), "orders").unwrap(),
            "relation: acme:orders\nmode:     array\ntitle:    Orders"
        );
    }

    #[test]
    fn test_describe_iana_relation() {
        colored::control::set_override(false);
        assert_eq!(
            describe(&settings(), "self").unwrap(),
            "relation: self\nmode:     single\ntitle:    -"
        );
    }

    #[test]
    fn test_blank_relation_is_usage_error() {
        let err = describe(&HalSettings::default(), "  ").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}
