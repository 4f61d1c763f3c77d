//! Child restrictions and the slides control

use async_trait::async_trait;
use std::collections::BTreeSet;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::directives::DirectiveType;
use crate::model::Control;
use crate::report::Reporter;

pub struct RestrictChildrenValidator;

#[async_trait]
impl Validator for RestrictChildrenValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::RestrictChildren
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            let name = component.name();
            let restrict = component.definition().restrict_children.as_ref();
            let has_slideshow = component
                .directives()
                .of_type(DirectiveType::Slideshow)
                .next()
                .is_some();

            if has_slideshow {
                match restrict {
                    None => reporter.error(format!(
                        "component \"{}\": doc-slideshow requires restrictChildren",
                        name
                    )),
                    Some(children) if children.len() != 1 => reporter.error(format!(
                        "component \"{}\": doc-slideshow requires exactly one restrictChildren entry, found {}",
                        name,
                        children.len()
                    )),
                    Some(_) => {}
                }
            }

            let Some(children) = restrict else {
                continue;
            };
            for (child, restriction) in children {
                if child == name {
                    reporter.error(format!(
                        "component \"{}\": restrictChildren cannot reference the component itself",
                        name
                    ));
                    continue;
                }
                let Some(target) = ctx.parsed.component(child) else {
                    reporter.error(format!(
                        "component \"{}\": restrictChildren references unknown component \"{}\"",
                        name, child
                    ));
                    continue;
                };
                if let Some(restriction) = restriction {
                    if !target.directives().contains(&restriction.with_content) {
                        reporter.error(format!(
                            "component \"{}\": withContent \"{}\" is not a directive of \"{}\"",
                            name, restriction.with_content, child
                        ));
                    }
                }
            }
        }
    }
}

pub struct SlidesValidator;

#[async_trait]
impl Validator for SlidesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Slides
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            for property in component.properties() {
                let Control::Slides { include, exclude } = &property.property().control else {
                    continue;
                };

                let Some(children) = component.definition().restrict_children.as_ref() else {
                    reporter.error(format!(
                        "component \"{}\": slides control \"{}\" requires restrictChildren",
                        component.name(),
                        property.reference()
                    ));
                    continue;
                };

                let child_properties: BTreeSet<&str> = children
                    .keys()
                    .filter_map(|child| ctx.parsed.component(child))
                    .flat_map(|child| child.properties().iter().map(|p| p.name()))
                    .collect();

                let listed = include.iter().flatten().chain(exclude.iter().flatten());
                for name in listed {
                    if !child_properties.contains(name.as_str()) {
                        reporter.error(format!(
                            "component \"{}\": slides control \"{}\" lists \"{}\", which is not a property of its children",
                            component.name(),
                            property.reference(),
                            name
                        ));
                    }
                }
            }
        }
    }
}
