//! Property references inside a component's `properties` list

use serde::{Deserialize, Serialize};

use super::definition::ComponentProperty;

/// A reference from a component to a property.
///
/// Parsed once at deserialization: `"name"` is [`Bare`](Self::Bare),
/// `"name:key"` is [`WithDirective`](Self::WithDirective) (split at the first
/// colon), an object is [`Inline`](Self::Inline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReference", into = "RawReference")]
pub enum PropertyReference {
    Bare(String),
    WithDirective { name: String, key: String },
    Inline(Box<ComponentProperty>),
}

impl PropertyReference {
    /// Name of the referenced property
    pub fn property_name(&self) -> &str {
        match self {
            PropertyReference::Bare(name) => name,
            PropertyReference::WithDirective { name, .. } => name,
            PropertyReference::Inline(property) => &property.name,
        }
    }

    /// Directive key named by the reference itself
    pub fn directive_key(&self) -> Option<&str> {
        match self {
            PropertyReference::WithDirective { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The reference as written in the definition
    pub fn as_written(&self) -> String {
        match self {
            PropertyReference::Bare(name) => name.clone(),
            PropertyReference::WithDirective { name, key } => format!("{}:{}", name, key),
            PropertyReference::Inline(property) => property.name.clone(),
        }
    }
}

impl std::fmt::Display for PropertyReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_written())
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawReference {
    Name(String),
    Inline(Box<ComponentProperty>),
}

impl From<RawReference> for PropertyReference {
    fn from(raw: RawReference) -> Self {
        match raw {
            RawReference::Name(text) => match text.split_once(':') {
                Some((name, key)) => PropertyReference::WithDirective {
                    name: name.to_string(),
                    key: key.to_string(),
                },
                None => PropertyReference::Bare(text),
            },
            RawReference::Inline(property) => PropertyReference::Inline(property),
        }
    }
}

impl From<PropertyReference> for RawReference {
    fn from(reference: PropertyReference) -> Self {
        match reference {
            PropertyReference::Inline(property) => RawReference::Inline(property),
            other => RawReference::Name(other.as_written()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> PropertyReference {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bare_reference() {
        let reference = parse(json!("alignment"));
        assert_eq!(reference, PropertyReference::Bare("alignment".into()));
        assert_eq!(reference.directive_key(), None);
    }

    #[test]
    fn test_reference_splits_at_first_colon() {
        let reference = parse(json!("link:target:blank"));
        assert_eq!(
            reference,
            PropertyReference::WithDirective {
                name: "link".into(),
                key: "target:blank".into()
            }
        );
        assert_eq!(reference.as_written(), "link:target:blank");
    }

    #[test]
    fn test_inline_reference() {
        let reference = parse(json!({
            "name": "caption-style",
            "label": "Caption style",
            "control": { "type": "text" },
            "directiveKey": "caption"
        }));
        match reference {
            PropertyReference::Inline(ref property) => {
                assert_eq!(property.directive_key.as_deref(), Some("caption"))
            }
            other => panic!("expected inline reference, got {:?}", other),
        }
        assert_eq!(reference.property_name(), "caption-style");
    }

    #[test]
    fn test_serializes_as_written() {
        let reference = PropertyReference::WithDirective {
            name: "media".into(),
            key: "video".into(),
        };
        assert_eq!(serde_json::to_value(&reference).unwrap(), json!("media:video"));
    }
}
