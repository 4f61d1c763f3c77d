//! The cross-referenced, read-only model handed to validators

use std::collections::BTreeMap;

use super::definition::{ComponentDefinition, ComponentGroup, ComponentProperty, ConversionRule};
use crate::directives::{Directive, Directives};

/// A property resolved from a component's reference list
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProperty {
    reference: String,
    property: ComponentProperty,
    directive_key: Option<String>,
}

impl ParsedProperty {
    pub(crate) fn new(
        reference: String,
        property: ComponentProperty,
        directive_key: Option<String>,
    ) -> Self {
        Self {
            reference,
            property,
            directive_key,
        }
    }

    /// The reference as written in the component (`"name"` or `"name:key"`)
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn property(&self) -> &ComponentProperty {
        &self.property
    }

    pub fn name(&self) -> &str {
        &self.property.name
    }

    /// The directive this property is bound to, if any
    pub fn directive_key(&self) -> Option<&str> {
        self.directive_key.as_deref()
    }
}

/// A component together with its scanned template and resolved properties
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComponent {
    definition: ComponentDefinition,
    directives: Directives,
    properties: Vec<ParsedProperty>,
}

impl ParsedComponent {
    pub(crate) fn new(
        definition: ComponentDefinition,
        directives: Directives,
        properties: Vec<ParsedProperty>,
    ) -> Self {
        Self {
            definition,
            directives,
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    /// Directives found in the template, in document order
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn directive(&self, key: &str) -> Option<&Directive> {
        self.directives.get(key)
    }

    /// Resolved properties in reference order
    pub fn properties(&self) -> &[ParsedProperty] {
        &self.properties
    }

    /// The property bound to `key`, if any
    pub fn property_for_directive(&self, key: &str) -> Option<&ParsedProperty> {
        self.properties
            .iter()
            .find(|p| p.directive_key() == Some(key))
    }
}

/// All parsed components of a definition plus the definition-level data
/// validators consult.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedComponentSet {
    components: Vec<ParsedComponent>,
    index: BTreeMap<String, usize>,
    groups: Vec<ComponentGroup>,
    default_component_on_enter: Option<String>,
    conversion_rules: Vec<ConversionRule>,
    conversion_shortcut_components: Vec<String>,
    scripts: Vec<String>,
}

impl ParsedComponentSet {
    pub(crate) fn new(
        components: Vec<ParsedComponent>,
        groups: Vec<ComponentGroup>,
        default_component_on_enter: Option<String>,
        conversion_rules: Vec<ConversionRule>,
        conversion_shortcut_components: Vec<String>,
        scripts: Vec<String>,
    ) -> Self {
        // First occurrence wins the lookup; duplicates are reported by the
        // components validator.
        let mut index = BTreeMap::new();
        for (position, component) in components.iter().enumerate() {
            index.entry(component.name().to_string()).or_insert(position);
        }

        Self {
            components,
            index,
            groups,
            default_component_on_enter,
            conversion_rules,
            conversion_shortcut_components,
            scripts,
        }
    }

    /// Components in definition order
    pub fn components(&self) -> impl Iterator<Item = &ParsedComponent> {
        self.components.iter()
    }

    pub fn component(&self, name: &str) -> Option<&ParsedComponent> {
        self.index.get(name).map(|&i| &self.components[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn groups(&self) -> &[ComponentGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ComponentGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn default_component_on_enter(&self) -> Option<&str> {
        self.default_component_on_enter.as_deref()
    }

    pub fn conversion_rules(&self) -> &[ConversionRule] {
        &self.conversion_rules
    }

    pub fn conversion_shortcut_components(&self) -> &[String] {
        &self.conversion_shortcut_components
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}
