//! Component groups

use async_trait::async_trait;
use std::collections::HashSet;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::report::Reporter;

pub struct GroupsValidator;

#[async_trait]
impl Validator for GroupsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Groups
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let mut seen = HashSet::new();

        for group in ctx.parsed.groups() {
            if !seen.insert(group.name.as_str()) {
                reporter.error(format!("group \"{}\" is declared more than once", group.name));
            }
            for component in &group.components {
                if !ctx.parsed.contains(component) {
                    reporter.error(format!(
                        "group \"{}\": component \"{}\" does not exist",
                        group.name, component
                    ));
                }
            }
            if let Some(icon) = &group.icon {
                if !ctx.files.contains(icon) {
                    reporter.error(format!("group \"{}\": icon \"{}\" does not exist", group.name, icon));
                }
            }
        }
    }
}
