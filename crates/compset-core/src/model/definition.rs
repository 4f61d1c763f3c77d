//! Raw definition types, deserialized from `components-definition.json`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::control::{Control, DataType};
use super::reference::PropertyReference;

/// The root of a component set definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsDefinition {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_component_on_enter: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
    #[serde(default)]
    pub component_properties: Vec<ComponentProperty>,
    #[serde(default)]
    pub groups: Vec<ComponentGroup>,
    #[serde(default)]
    pub conversion_rules: Vec<ConversionRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Shortcuts>,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub custom_styles: Vec<CustomStyle>,
    #[serde(default)]
    pub character_styles: Vec<Value>,
}

impl ComponentsDefinition {
    /// Components named as conversion shortcuts, empty when none are declared
    pub fn shortcut_components(&self) -> &[String] {
        self.shortcuts
            .as_ref()
            .and_then(|s| s.conversion.as_ref())
            .map(|c| c.components.as_slice())
            .unwrap_or(&[])
    }
}

/// A display label: either literal text or a localization key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Localized { key: String },
}

/// A component as declared in the definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub name: String,
    pub label: Label,
    pub icon: String,
    #[serde(default)]
    pub properties: Vec<PropertyReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_nesting: Option<bool>,
    /// Child component name → optional content requirement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_children: Option<BTreeMap<String, Option<ChildRestriction>>>,
    #[serde(default)]
    pub directive_options: BTreeMap<String, DirectiveOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_statistics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_component_on_enter: Option<String>,
}

/// Requirement placed on a restricted child component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRestriction {
    /// Directive key of the child that must hold content
    pub with_content: String,
}

/// Per-directive editor options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofill: Option<Autofill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_styling_on_paste: Option<bool>,
}

/// Fill a directive automatically from another directive of the same component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autofill {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_field: Option<String>,
}

/// A reusable component property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperty {
    pub name: String,
    pub label: Label,
    pub control: Control,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_properties: Vec<ChildProperties>,
}

/// Properties that only apply when the parent property holds `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProperties {
    pub value: Value,
    pub properties: Vec<String>,
}

/// A palette group of components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub name: String,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
}

/// How a conversion rule treats containers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionKind {
    #[default]
    Standard,
    FromContainer,
    ToContainer,
}

/// Maps one component onto another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRule {
    #[serde(rename = "type", default)]
    pub kind: ConversionKind,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub directives: Vec<DirectiveMapping>,
    /// Container directive used by `from-container` / `to-container` rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcuts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionShortcuts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionShortcuts {
    #[serde(default)]
    pub components: Vec<String>,
}

/// A named custom stylesheet shipped with the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStyle {
    pub name: String,
    pub label: Label,
    /// Package path of the default stylesheet
    pub default: String,
}
