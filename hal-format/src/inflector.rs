//! English pluralization for relation names
//!
//! Operates on the last camel-case segment, so `orderCategory` becomes
//! `orderCategories` and `salesPerson` becomes `salesPeople`.

/// Singular/plural pairs that do not follow the suffix rules
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("knife", "knives"),
    ("life", "lives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("criterion", "criteria"),
    ("datum", "data"),
];

/// Words whose plural is the word itself
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
];

/// Lowercase the first character (`OrderItem` -> `orderItem`)
pub fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pluralize a (camel-case) word
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let split = last_segment_start(word);
    let (head, last) = word.split_at(split);
    format!("{head}{}", pluralize_segment(last))
}

fn last_segment_start(word: &str) -> usize {
    word.char_indices()
        .filter(|(idx, c)| *idx > 0 && c.is_uppercase())
        .map(|(idx, _)| idx)
        .last()
        .unwrap_or(0)
}

fn pluralize_segment(segment: &str) -> String {
    let lower = segment.to_lowercase();
    let capitalized = segment.chars().next().is_some_and(char::is_uppercase);

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return segment.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return if capitalized {
            capitalize(plural)
        } else {
            (*plural).to_string()
        };
    }

    if let Some(stem) = segment.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{segment}es");
    }
    format!("{segment}s")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(pluralize("string"), "strings");
        assert_eq!(pluralize("order"), "orders");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("match"), "matches");
    }

    #[test]
    fn test_y_suffix() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("salesPerson"), "salesPeople");
    }

    #[test]
    fn test_camel_case_last_segment() {
        assert_eq!(pluralize("orderCategory"), "orderCategories");
        assert_eq!(pluralize("lineItem"), "lineItems");
    }

    #[test]
    fn test_uncapitalize() {
        assert_eq!(uncapitalize("OrderItem"), "orderItem");
        assert_eq!(uncapitalize("i64"), "i64");
        assert_eq!(uncapitalize(""), "");
    }
}
