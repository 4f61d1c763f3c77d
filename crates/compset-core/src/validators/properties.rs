//! Component property declarations

use async_trait::async_trait;
use std::collections::HashSet;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::model::{ComponentProperty, ComponentsDefinition, Control, DataType, PropertyReference};
use crate::report::Reporter;

/// Property names the editor reserves for itself
pub const RESERVED_PROPERTY_NAMES: [&str; 1] = ["parallax"];

/// Every property declared in the definition: shared ones first, then the
/// ones declared inline on components.
pub(crate) fn declared_properties(
    definition: &ComponentsDefinition,
) -> impl Iterator<Item = &ComponentProperty> {
    let inline = definition
        .components
        .iter()
        .flat_map(|c| c.properties.iter())
        .filter_map(|r| match r {
            PropertyReference::Inline(property) => Some(property.as_ref()),
            _ => None,
        });
    definition.component_properties.iter().chain(inline)
}

pub struct PropertiesValidator;

#[async_trait]
impl Validator for PropertiesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Properties
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let definition = ctx.definition;
        let shared: HashSet<&str> = definition
            .component_properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        let mut seen = HashSet::new();
        for property in &definition.component_properties {
            if !seen.insert(property.name.as_str()) {
                reporter.error(format!("property \"{}\" is declared more than once", property.name));
            }
        }

        for property in declared_properties(definition) {
            let name = property.name.as_str();

            if RESERVED_PROPERTY_NAMES.contains(&name) {
                reporter.error(format!("property \"{}\" uses a reserved name", name));
            }

            if let Control::Radio { options } = &property.control {
                for icon in options.iter().filter_map(|o| o.icon.as_deref()) {
                    if !ctx.files.contains(icon) {
                        reporter.error(format!(
                            "property \"{}\": radio option icon \"{}\" does not exist",
                            name, icon
                        ));
                    }
                }
            }

            if property.data_type == Some(DataType::DocMedia)
                && !matches!(property.control, Control::MediaProperties {})
            {
                reporter.error(format!(
                    "property \"{}\": dataType \"doc-media\" requires a \"media-properties\" control, found \"{}\"",
                    name,
                    property.control.type_name()
                ));
            }

            for child in &property.child_properties {
                for child_name in &child.properties {
                    if !shared.contains(child_name.as_str()) {
                        reporter.error(format!(
                            "property \"{}\": child property \"{}\" does not exist",
                            name, child_name
                        ));
                    }
                }
            }
        }
    }
}
