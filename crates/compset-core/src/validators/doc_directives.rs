//! Cardinality rules for structural directives

use async_trait::async_trait;
use compset_schemas::SchemaVersion;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::directives::DirectiveType;
use crate::model::{Control, ParsedComponent};
use crate::report::Reporter;

/// From this version a container must be the only directive of its component
pub const EXCLUSIVE_CONTAINER_SINCE: SchemaVersion = SchemaVersion::new(1, 5, 0);

fn at_most_one(
    component: &ParsedComponent,
    directive_type: DirectiveType,
    reporter: &mut Reporter<'_>,
) -> usize {
    let count = component.directives().of_type(directive_type).count();
    if count > 1 {
        reporter.error(format!(
            "component \"{}\": found {} doc-{} directives, at most one is allowed",
            component.name(),
            count,
            directive_type
        ));
    }
    count
}

pub struct DocContainerValidator {
    exclusive: bool,
}

impl DocContainerValidator {
    /// Rule set for definitions of `version`
    pub fn for_version(version: &SchemaVersion) -> Self {
        Self {
            exclusive: version >= &EXCLUSIVE_CONTAINER_SINCE,
        }
    }

    /// Whether the container must be the only directive
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }
}

#[async_trait]
impl Validator for DocContainerValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DocContainer
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            if at_most_one(component, DirectiveType::Container, reporter) == 0 {
                continue;
            }

            if self.exclusive {
                if component.directives().len() > 1 {
                    reporter.error(format!(
                        "component \"{}\": doc-container must be the only directive",
                        component.name()
                    ));
                }
            } else if component.directives().of_type(DirectiveType::Slideshow).next().is_some() {
                reporter.error(format!(
                    "component \"{}\": doc-container cannot be combined with doc-slideshow",
                    component.name()
                ));
            }
        }
    }
}

pub struct DocSlideshowValidator;

#[async_trait]
impl Validator for DocSlideshowValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DocSlideshow
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            at_most_one(component, DirectiveType::Slideshow, reporter);
        }
    }
}

pub struct DocMediaValidator;

#[async_trait]
impl Validator for DocMediaValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DocMedia
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            at_most_one(component, DirectiveType::Media, reporter);
        }
    }
}

/// A `doc-<name>` directive and its control come in pairs
fn check_paired_control(
    component: &ParsedComponent,
    name: &str,
    is_control: fn(&Control) -> bool,
    reporter: &mut Reporter<'_>,
) {
    let directives: Vec<_> = component.directives().named(name).collect();
    let controls: Vec<_> = component
        .properties()
        .iter()
        .filter(|p| is_control(&p.property().control))
        .collect();

    match (directives.as_slice(), controls.as_slice()) {
        ([], []) => {}
        ([], [property, ..]) => reporter.error(format!(
            "component \"{}\": property \"{}\" has a {} control but the template has no doc-{} directive",
            component.name(),
            property.reference(),
            name,
            name
        )),
        ([directive], [property]) => {
            if property.directive_key() != Some(directive.key.as_str()) {
                reporter.error(format!(
                    "component \"{}\": property \"{}\" must be bound to doc-{} directive \"{}\"",
                    component.name(),
                    property.reference(),
                    name,
                    directive.key
                ));
            }
        }
        ([_], []) => reporter.error(format!(
            "component \"{}\": doc-{} directive requires exactly one {} control property",
            component.name(),
            name,
            name
        )),
        ([_], _) => reporter.error(format!(
            "component \"{}\": found {} {} control properties, exactly one is allowed",
            component.name(),
            controls.len(),
            name
        )),
        (_, _) => reporter.error(format!(
            "component \"{}\": found {} doc-{} directives, at most one is allowed",
            component.name(),
            directives.len(),
            name
        )),
    }
}

pub struct DocChartValidator;

#[async_trait]
impl Validator for DocChartValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DocChart
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            check_paired_control(component, "chart", |c| matches!(c, Control::Chart {}), reporter);
        }
    }
}

pub struct DocInfogramValidator;

#[async_trait]
impl Validator for DocInfogramValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DocInfogram
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            check_paired_control(
                component,
                "infogram",
                |c| matches!(c, Control::Infogram {}),
                reporter,
            );
        }
    }
}
