//! `directiveOptions` entries of components

use async_trait::async_trait;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::directives::DirectiveType;
use crate::model::{DirectiveOption, ParsedComponent, ParsedComponentSet};
use crate::report::Reporter;

/// Iterate the directive options of every component
fn options(
    parsed: &ParsedComponentSet,
) -> impl Iterator<Item = (&ParsedComponent, &str, &DirectiveOption)> {
    parsed.components().flat_map(|component| {
        component
            .definition()
            .directive_options
            .iter()
            .map(move |(key, option)| (component, key.as_str(), option))
    })
}

/// Every option key must name a directive of the component
pub struct DirectiveOptionsValidator;

#[async_trait]
impl Validator for DirectiveOptionsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DirectiveOptions
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for (component, key, _) in options(ctx.parsed) {
            if !component.directives().contains(key) {
                reporter.error(format!(
                    "component \"{}\": directiveOptions entry \"{}\" does not name a directive",
                    component.name(),
                    key
                ));
            }
        }
    }
}

/// Group restrictions only apply to containers and slideshows
pub struct ContainerGroupsValidator;

#[async_trait]
impl Validator for ContainerGroupsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::ContainerGroups
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for (component, key, option) in options(ctx.parsed) {
            let Some(groups) = &option.groups else {
                continue;
            };

            if let Some(directive) = component.directive(key) {
                if !matches!(
                    directive.directive_type,
                    DirectiveType::Container | DirectiveType::Slideshow
                ) {
                    reporter.error(format!(
                        "component \"{}\": groups on \"{}\" require a container or slideshow directive, found {}",
                        component.name(),
                        key,
                        directive.directive_type
                    ));
                }
            }

            for group in groups {
                if ctx.parsed.group(group).is_none() {
                    reporter.error(format!(
                        "component \"{}\": directive \"{}\" references unknown group \"{}\"",
                        component.name(),
                        key,
                        group
                    ));
                }
            }
        }
    }
}

pub struct AutofillValidator;

#[async_trait]
impl Validator for AutofillValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Autofill
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for (component, key, option) in options(ctx.parsed) {
            let Some(autofill) = &option.autofill else {
                continue;
            };
            let name = component.name();

            if autofill.source == key {
                reporter.error(format!(
                    "component \"{}\": directive \"{}\" cannot autofill from itself",
                    name, key
                ));
            }

            match component.directive(key) {
                None => reporter.error(format!(
                    "component \"{}\": autofill destination \"{}\" does not exist",
                    name, key
                )),
                Some(destination)
                    if !matches!(
                        destination.directive_type,
                        DirectiveType::Editable | DirectiveType::Link
                    ) =>
                {
                    reporter.error(format!(
                        "component \"{}\": autofill destination \"{}\" must be an editable or link directive, found {}",
                        name, key, destination.directive_type
                    ))
                }
                Some(_) => {}
            }

            match component.directive(&autofill.source) {
                None => reporter.error(format!(
                    "component \"{}\": autofill source \"{}\" does not exist",
                    name, autofill.source
                )),
                Some(source)
                    if source.directive_type == DirectiveType::Image
                        && autofill.metadata_field.is_none() =>
                {
                    reporter.error(format!(
                        "component \"{}\": autofill from image \"{}\" requires a metadataField",
                        name, autofill.source
                    ))
                }
                Some(_) => {}
            }
        }
    }
}

/// `stripStylingOnPaste` only makes sense on editables
pub struct StripStylingOnPasteValidator;

#[async_trait]
impl Validator for StripStylingOnPasteValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::StripStylingOnPaste
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for (component, key, option) in options(ctx.parsed) {
            if option.strip_styling_on_paste.is_none() {
                continue;
            }
            if let Some(directive) = component.directive(key) {
                if directive.directive_type != DirectiveType::Editable {
                    reporter.error(format!(
                        "component \"{}\": stripStylingOnPaste on \"{}\" requires an editable directive, found {}",
                        component.name(),
                        key,
                        directive.directive_type
                    ));
                }
            }
        }
    }
}
