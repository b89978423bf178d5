//! Curies: namespace prefixes bound to a documentation URI template

use crate::error::{ModelError, Result};
use crate::template::UriTemplate;

/// A named namespace whose template has exactly one variable
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Curie {
    name: String,
    template: UriTemplate,
}

impl Curie {
    /// Create a curie, validating the name and the template
    pub fn new(name: impl Into<String>, template: impl Into<UriTemplate>) -> Result<Self> {
        let name = name.into();
        let template = template.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyCurieName);
        }
        let variables = template.variables().len();
        if variables != 1 {
            return Err(ModelError::InvalidCurieTemplate {
                template: template.as_str().to_string(),
                variables,
            });
        }
        Ok(Self { name, template })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// The href to advertise, resolving relative templates against `base_uri`
    pub fn href(&self, base_uri: Option<&str>) -> String {
        let raw = self.template.as_str();
        match base_uri {
            Some(base) if !raw.starts_with("http") => {
                format!("{}{}", base.trim_end_matches('/'), ensure_leading_slash(raw))
            }
            _ => raw.to_string(),
        }
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
