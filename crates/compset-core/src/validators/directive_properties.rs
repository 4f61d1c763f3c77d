//! Properties that must be bound to a template directive

use async_trait::async_trait;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::model::Control;
use crate::report::Reporter;

pub struct DirectivePropertiesValidator;

#[async_trait]
impl Validator for DirectivePropertiesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DirectiveProperties
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            for parsed in component.properties() {
                let property = parsed.property();
                let needs_directive = matches!(
                    property.control,
                    Control::ImageEditor { .. } | Control::Interactive {} | Control::MediaProperties {}
                );
                let expected = property.data_type.and_then(|dt| dt.directive_type());

                let Some(key) = parsed.directive_key() else {
                    if needs_directive {
                        reporter.error(format!(
                            "component \"{}\": property \"{}\" with control \"{}\" requires a directive",
                            component.name(),
                            parsed.reference(),
                            property.control.type_name()
                        ));
                    } else if let Some(data_type) = property.data_type.filter(|_| expected.is_some()) {
                        reporter.error(format!(
                            "component \"{}\": property \"{}\" with dataType \"{}\" requires a directive",
                            component.name(),
                            parsed.reference(),
                            data_type
                        ));
                    }
                    continue;
                };

                let Some(expected) = expected else {
                    continue;
                };
                match component.directive(key) {
                    None => reporter.error(format!(
                        "component \"{}\": property \"{}\" is bound to missing directive \"{}\"",
                        component.name(),
                        parsed.reference(),
                        key
                    )),
                    Some(directive) if directive.directive_type != expected => {
                        reporter.error(format!(
                            "component \"{}\": property \"{}\" expects directive type {}, \"{}\" has type {}",
                            component.name(),
                            parsed.reference(),
                            expected,
                            key,
                            directive.directive_type
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }
}
