//! URI templates (RFC 6570 variable discovery)
//!
//! Only what the codec needs: finding the variables of a template so a link
//! can report whether it is templated and a curie can be validated.

use serde::{Deserialize, Serialize};

/// Operator characters that may lead an expression
const OPERATORS: &[char] = &['+', '#', '.', '/', ';', '?', '&'];

/// A URI template with its discovered variable names
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct UriTemplate {
    raw: String,
    variables: Vec<String>,
}

impl UriTemplate {
    /// Parse a template string
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let variables = variable_names(&raw);
        Self { raw, variables }
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Variable names in declaration order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Whether the template declares at least one variable
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}

impl From<String> for UriTemplate {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for UriTemplate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<UriTemplate> for String {
    fn from(template: UriTemplate) -> Self {
        template.raw
    }
}

impl std::fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Variable names of the well-formed `{...}` expressions, in order
fn variable_names(raw: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut offset = 0;
    while let Some(open) = raw[offset..].find('{') {
        let start = offset + open;
        let Some(close) = raw[start..].find('}') else {
            break;
        };
        let end = start + close + 1;
        let body = &raw[start + 1..end - 1];
        let list = match body.chars().next() {
            Some(c) if OPERATORS.contains(&c) => &body[c.len_utf8()..],
            _ => body,
        };
        found.extend(
            list.split(',')
                .map(variable_name)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
        offset = end;
    }
    found
}

/// Strip explode (`*`) and prefix (`:n`) modifiers from a varspec
fn variable_name(spec: &str) -> &str {
    let spec = spec.trim();
    let spec = spec.strip_suffix('*').unwrap_or(spec);
    match spec.find(':') {
        Some(idx) => &spec[..idx],
        None => spec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_has_no_variables() {
        let template = UriTemplate::new("/customers/1");
        assert!(!template.has_variables());
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_simple_variable() {
        let template = UriTemplate::new("http://localhost:8080/rels/{rel}");
        assert_eq!(template.variables(), ["rel"]);
    }

    #[test]
    fn test_query_expression() {
        let template = UriTemplate::new("/foo{?bar,baz*,page:3}");
        assert_eq!(template.variables(), ["bar", "baz", "page"]);
    }

    #[test]
    fn test_unclosed_expression_is_literal() {
        assert!(!UriTemplate::new("/foo{bar").has_variables());
        assert!(!UriTemplate::new("/foo{}").has_variables());
    }
}
