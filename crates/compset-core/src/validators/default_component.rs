//! The component inserted when the user presses enter

use async_trait::async_trait;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::report::Reporter;

pub struct DefaultComponentOnEnterValidator;

#[async_trait]
impl Validator for DefaultComponentOnEnterValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DefaultComponentOnEnter
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        if let Some(name) = ctx.parsed.default_component_on_enter() {
            if !ctx.parsed.contains(name) {
                reporter.error(format!("defaultComponentOnEnter: component \"{}\" does not exist", name));
            }
        }
    }
}

/// Per-component override, available from 1.1
pub struct DefaultComponentOnEnterOverrideValidator;

#[async_trait]
impl Validator for DefaultComponentOnEnterOverrideValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DefaultComponentOnEnterOverride
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            if let Some(name) = component.definition().default_component_on_enter.as_deref() {
                if !ctx.parsed.contains(name) {
                    reporter.error(format!(
                        "component \"{}\": defaultComponentOnEnter \"{}\" does not exist",
                        component.name(),
                        name
                    ));
                }
            }
        }
    }
}
