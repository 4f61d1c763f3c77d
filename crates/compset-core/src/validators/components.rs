//! Component declarations and the files each component needs

use async_trait::async_trait;
use std::collections::HashSet;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::parser::template_path;
use crate::report::Reporter;

/// Component names with this prefix are reserved for the editor
pub const RESERVED_PREFIX: &str = "__internal__";

/// Stylesheets every package ships regardless of its components
pub const REQUIRED_STYLESHEETS: [&str; 3] =
    ["styles/_common.scss", "styles/design.scss", "styles/design.css"];

pub fn stylesheet_path(component: &str) -> String {
    format!("styles/_{}.scss", component)
}

pub struct ComponentsValidator;

#[async_trait]
impl Validator for ComponentsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Components
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let mut seen = HashSet::new();

        for component in &ctx.definition.components {
            let name = component.name.as_str();

            if !seen.insert(name) {
                reporter.error(format!("component \"{}\" is declared more than once", name));
            }
            if name.starts_with(RESERVED_PREFIX) {
                reporter.error(format!(
                    "component \"{}\" uses the reserved prefix \"{}\"",
                    name, RESERVED_PREFIX
                ));
            }
            if !ctx.files.contains(&component.icon) {
                reporter.error(format!(
                    "component \"{}\": icon \"{}\" does not exist",
                    name, component.icon
                ));
            }

            let template = template_path(name);
            if !ctx.files.contains(&template) {
                reporter.error(format!("component \"{}\": template \"{}\" is missing", name, template));
            }
            let stylesheet = stylesheet_path(name);
            if !ctx.files.contains(&stylesheet) {
                reporter.error(format!(
                    "component \"{}\": stylesheet \"{}\" is missing",
                    name, stylesheet
                ));
            }
        }

        for path in REQUIRED_STYLESHEETS {
            if !ctx.files.contains(path) {
                reporter.error(format!("stylesheet \"{}\" is missing", path));
            }
        }
    }
}
