//! Conversion rules and conversion shortcuts

use async_trait::async_trait;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::directives::DirectiveType;
use crate::model::{ConversionKind, ConversionRule, ParsedComponent};
use crate::report::Reporter;

fn describe(rule: &ConversionRule) -> String {
    format!("conversion rule \"{}\" -> \"{}\"", rule.from, rule.to)
}

pub struct ConversionRulesValidator;

impl ConversionRulesValidator {
    fn check_container(
        rule: &ConversionRule,
        owner: Option<&ParsedComponent>,
        reporter: &mut Reporter<'_>,
    ) {
        let Some(owner) = owner else {
            return;
        };
        let Some(container) = rule.container.as_deref() else {
            reporter.error(format!(
                "{}: rule type requires a container directive of \"{}\"",
                describe(rule),
                owner.name()
            ));
            return;
        };
        match owner.directive(container).map(|d| d.directive_type) {
            Some(DirectiveType::Container | DirectiveType::Slideshow) => {}
            Some(other) => reporter.error(format!(
                "{}: directive \"{}\" of \"{}\" has type {}, expected container or slideshow",
                describe(rule),
                container,
                owner.name(),
                other
            )),
            None => reporter.error(format!(
                "{}: container directive \"{}\" does not exist on \"{}\"",
                describe(rule),
                container,
                owner.name()
            )),
        }
    }
}

#[async_trait]
impl Validator for ConversionRulesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::ConversionRules
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for rule in ctx.parsed.conversion_rules() {
            let from = ctx.parsed.component(&rule.from);
            let to = ctx.parsed.component(&rule.to);

            if from.is_none() {
                reporter.error(format!("{}: component \"{}\" does not exist", describe(rule), rule.from));
            }
            if to.is_none() {
                reporter.error(format!("{}: component \"{}\" does not exist", describe(rule), rule.to));
            }

            for mapping in &rule.directives {
                if let Some(from) = from {
                    if !from.directives().contains(&mapping.from) {
                        reporter.error(format!(
                            "{}: directive \"{}\" does not exist on \"{}\"",
                            describe(rule),
                            mapping.from,
                            from.name()
                        ));
                    }
                }
                if let Some(to) = to {
                    if !to.directives().contains(&mapping.to) {
                        reporter.error(format!(
                            "{}: directive \"{}\" does not exist on \"{}\"",
                            describe(rule),
                            mapping.to,
                            to.name()
                        ));
                    }
                }
            }

            match rule.kind {
                ConversionKind::Standard => {}
                ConversionKind::FromContainer => Self::check_container(rule, from, reporter),
                ConversionKind::ToContainer => Self::check_container(rule, to, reporter),
            }
        }
    }
}

pub struct ConversionShortcutsValidator;

#[async_trait]
impl Validator for ConversionShortcutsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::ConversionShortcuts
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for name in ctx.parsed.conversion_shortcut_components() {
            if !ctx.parsed.contains(name) {
                reporter.error(format!("conversion shortcut: component \"{}\" does not exist", name));
            }
        }
    }
}
