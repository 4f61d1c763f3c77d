//! Directive scanning for component templates
//!
//! Templates are scanned, not rendered. Every opening tag carrying one or more
//! `doc-<name>` attributes contributes one directive per attribute, keyed by
//! the attribute value.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::DirectiveError;

/// Kind of a template directive, derived from the attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveType {
    Editable,
    Container,
    Image,
    Html,
    If,
    Slideshow,
    Link,
    Media,
    Interactive,
    Unknown,
}

impl DirectiveType {
    /// Map an attribute suffix (`image` for `doc-image`) to a type
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "editable" => DirectiveType::Editable,
            "container" => DirectiveType::Container,
            "image" => DirectiveType::Image,
            "html" => DirectiveType::Html,
            "if" => DirectiveType::If,
            "slideshow" => DirectiveType::Slideshow,
            "link" => DirectiveType::Link,
            "media" => DirectiveType::Media,
            "interactive" => DirectiveType::Interactive,
            _ => DirectiveType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveType::Editable => "editable",
            DirectiveType::Container => "container",
            DirectiveType::Image => "image",
            DirectiveType::Html => "html",
            DirectiveType::If => "if",
            DirectiveType::Slideshow => "slideshow",
            DirectiveType::Link => "link",
            DirectiveType::Media => "media",
            DirectiveType::Interactive => "interactive",
            DirectiveType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DirectiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `doc-*` attribute found in a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub key: String,
    pub directive_type: DirectiveType,
    /// Lowercase attribute suffix (`chart` for `doc-chart`)
    pub name: String,
    /// Lowercase tag name of the element carrying the attribute
    pub tag: String,
}

/// Directives of one template in document order, unique by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    entries: Vec<Directive>,
    /// Key to position in `entries`
    index: HashMap<String, usize>,
}

impl Directives {
    pub fn get(&self, key: &str) -> Option<&Directive> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directives of the given type
    pub fn of_type(&self, directive_type: DirectiveType) -> impl Iterator<Item = &Directive> {
        self.entries
            .iter()
            .filter(move |d| d.directive_type == directive_type)
    }

    /// Directives with the given attribute suffix
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Directive> + 'a {
        self.entries.iter().filter(move |d| d.name == name)
    }

    fn push(&mut self, directive: Directive) -> Result<(), DirectiveError> {
        if self.contains(&directive.key) {
            return Err(DirectiveError::DuplicateKey { key: directive.key });
        }
        self.index.insert(directive.key.clone(), self.entries.len());
        self.entries.push(directive);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Directives {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)(\s[^>]*)?>").expect("valid tag regex")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+)))?"#,
        )
        .expect("valid attribute regex")
    })
}

/// Scan an HTML template for `doc-*` directives.
///
/// Attribute names match case-insensitively. A valueless attribute yields the
/// empty key. Comments are skipped.
pub fn scan_directives(html: &str) -> Result<Directives, DirectiveError> {
    let html = comment_pattern().replace_all(html, "");
    let mut directives = Directives::default();

    for tag in tag_pattern().captures_iter(&html) {
        let Some(attributes) = tag.get(2) else {
            continue;
        };
        let tag_name = tag[1].to_ascii_lowercase();

        for attribute in attribute_pattern().captures_iter(attributes.as_str()) {
            let attribute_name = attribute[1].to_ascii_lowercase();
            let Some(name) = attribute_name.strip_prefix("doc-") else {
                continue;
            };
            let name = name.to_string();
            let key = (2..=4)
                .find_map(|group| attribute.get(group))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            directives.push(Directive {
                key,
                directive_type: DirectiveType::from_name(&name),
                name,
                tag: tag_name.clone(),
            })?;
        }
    }

    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_basic_template() {
        let html = r#"
            <figure doc-container="gallery">
              <img doc-image="photo" class="hero">
              <figcaption doc-editable='caption'></figcaption>
              <a doc-link=source href="https://example.com">Source</a>
            </figure>
        "#;
        let directives = scan_directives(html).unwrap();
        let keys: Vec<_> = directives.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["gallery", "photo", "caption", "source"]);

        let photo = directives.get("photo").unwrap();
        assert_eq!(photo.directive_type, DirectiveType::Image);
        assert_eq!(photo.tag, "img");
        assert_eq!(directives.get("source").unwrap().directive_type, DirectiveType::Link);
    }

    #[test]
    fn test_case_insensitive_names() {
        let directives = scan_directives(r#"<DIV DOC-Editable="title"></DIV>"#).unwrap();
        let title = directives.get("title").unwrap();
        assert_eq!(title.directive_type, DirectiveType::Editable);
        assert_eq!(title.name, "editable");
        assert_eq!(title.tag, "div");
    }

    #[test]
    fn test_unknown_directive_names() {
        let directives =
            scan_directives(r#"<div doc-chart="chart"></div><div doc-infogram="ig"></div>"#)
                .unwrap();
        assert!(directives.iter().all(|d| d.directive_type == DirectiveType::Unknown));
        assert_eq!(directives.named("chart").count(), 1);
        assert_eq!(directives.named("infogram").count(), 1);
    }

    #[test]
    fn test_multiple_attributes_on_one_tag() {
        let directives =
            scan_directives(r#"<p doc-editable="text" doc-if="show-text"></p>"#).unwrap();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives.get("show-text").unwrap().directive_type, DirectiveType::If);
    }

    #[test]
    fn test_valueless_attribute_yields_empty_key() {
        let directives = scan_directives("<div doc-container></div>").unwrap();
        assert_eq!(directives.get("").unwrap().directive_type, DirectiveType::Container);
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let err = scan_directives(r#"<h1 doc-editable="title"></h1><img doc-image="title">"#)
            .unwrap_err();
        assert!(err.to_string().contains("attributes must be unique"));
        assert_eq!(err, DirectiveError::DuplicateKey { key: "title".into() });
    }

    #[test]
    fn test_ignores_lookalike_attributes() {
        let directives =
            scan_directives(r#"<div data-doc-editable="x" class="doc-editable"></div>"#).unwrap();
        assert!(directives.is_empty());
    }

    #[test]
    fn test_attribute_values_are_not_scanned() {
        let directives =
            scan_directives(r#"<div title="see doc-image" doc-html="embed"></div>"#).unwrap();
        assert_eq!(directives.len(), 1);
        assert!(directives.contains("embed"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let html = r#"<!-- <div doc-editable="title"></div> --><h1 doc-editable="title"></h1>"#;
        let directives = scan_directives(html).unwrap();
        assert_eq!(directives.len(), 1);
    }

    #[test]
    fn test_self_closing_tags() {
        let directives = scan_directives(r#"<img doc-image=photo/>"#).unwrap();
        assert!(directives.contains("photo"));
    }

    #[test]
    fn test_lookup_by_key_in_large_template() {
        let html: String = (0..500)
            .map(|i| format!(r#"<div doc-editable="text-{}"></div>"#, i))
            .collect();
        let directives = scan_directives(&html).unwrap();
        assert_eq!(directives.len(), 500);
        for i in [0, 250, 499] {
            let key = format!("text-{}", i);
            assert_eq!(directives.get(&key).unwrap().key, key);
        }
        assert_eq!(directives.iter().nth(250).unwrap().key, "text-250");
        assert!(directives.get("text-500").is_none());
        assert!(!directives.contains("text-500"));
    }
}
