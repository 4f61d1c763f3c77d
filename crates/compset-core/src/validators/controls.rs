//! Control-specific rules

use async_trait::async_trait;

use super::properties::declared_properties;
use super::{ValidationContext, Validator, ValidatorKind};
use crate::model::{Control, DataType, ParsedComponent, ParsedProperty};
use crate::report::Reporter;

/// Units accepted by text controls, compared case-insensitively
pub const ACCEPTED_UNITS: [&str; 2] = ["em", "px"];

fn properties_with<'a>(
    component: &'a ParsedComponent,
    is_control: fn(&Control) -> bool,
) -> impl Iterator<Item = &'a ParsedProperty> + 'a {
    component
        .properties()
        .iter()
        .filter(move |p| is_control(&p.property().control))
}

fn at_most_once(
    component: &ParsedComponent,
    control: &str,
    is_control: fn(&Control) -> bool,
    reporter: &mut Reporter<'_>,
) {
    let count = properties_with(component, is_control).count();
    if count > 1 {
        reporter.error(format!(
            "component \"{}\": found {} {} properties, at most one is allowed",
            component.name(),
            count,
            control
        ));
    }
}

/// Report properties with the given control that are not stored as `expected`
fn require_data_type(
    component: &ParsedComponent,
    is_control: fn(&Control) -> bool,
    expected: DataType,
    reporter: &mut Reporter<'_>,
) {
    for property in properties_with(component, is_control) {
        let found = property.property().data_type;
        if found != Some(expected) {
            reporter.error(format!(
                "component \"{}\": {} control \"{}\" requires dataType \"{}\", found {}",
                component.name(),
                property.property().control.type_name(),
                property.reference(),
                expected,
                found.map_or("none", |d| d.as_str())
            ));
        }
    }
}

pub struct DropCapitalValidator;

#[async_trait]
impl Validator for DropCapitalValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DropCapital
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let is_drop_capital: fn(&Control) -> bool = |c| matches!(c, Control::DropCapital {});
        for component in ctx.parsed.components() {
            at_most_once(component, "drop-capital", is_drop_capital, reporter);
            for property in properties_with(component, is_drop_capital) {
                let data_type = property.property().data_type;
                if data_type != Some(DataType::Data) {
                    reporter.error(format!(
                        "component \"{}\": drop-capital property \"{}\" must use dataType \"data\", found {}",
                        component.name(),
                        property.reference(),
                        data_type.map_or("none", |d| d.as_str())
                    ));
                }
            }
        }
    }
}

pub struct FittingValidator;

#[async_trait]
impl Validator for FittingValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Fitting
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            at_most_once(component, "fitting", |c| matches!(c, Control::Fitting {}), reporter);
        }
    }
}

/// Focus points cannot be set on plain `<img>` elements
pub struct FocuspointValidator;

#[async_trait]
impl Validator for FocuspointValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Focuspoint
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            let with_focuspoint = properties_with(component, |c| {
                matches!(c, Control::ImageEditor { focuspoint: Some(true) })
            });
            for property in with_focuspoint {
                let Some(directive) = property.directive_key().and_then(|k| component.directive(k)) else {
                    continue;
                };
                if directive.tag == "img" {
                    reporter.error(format!(
                        "component \"{}\": focuspoint of \"{}\" is not supported on the <img> directive \"{}\"",
                        component.name(),
                        property.reference(),
                        directive.key
                    ));
                }
            }
        }
    }
}

pub struct ImageEditorValidator;

#[async_trait]
impl Validator for ImageEditorValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::ImageEditor
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            require_data_type(
                component,
                |c| matches!(c, Control::ImageEditor { .. }),
                DataType::DocImage,
                reporter,
            );
        }
    }
}

pub struct InteractiveValidator;

#[async_trait]
impl Validator for InteractiveValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Interactive
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            require_data_type(
                component,
                |c| matches!(c, Control::Interactive {}),
                DataType::DocInteractive,
                reporter,
            );
        }
    }
}

/// Only checked for definitions before 1.4
pub struct DisableFullscreenCheckboxValidator;

#[async_trait]
impl Validator for DisableFullscreenCheckboxValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DisableFullscreenCheckbox
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for component in ctx.parsed.components() {
            require_data_type(
                component,
                |c| matches!(c, Control::Checkbox { disable_fullscreen: Some(true), .. }),
                DataType::DocInteractive,
                reporter,
            );
        }
    }
}

pub struct UnitTypeValidator;

#[async_trait]
impl Validator for UnitTypeValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::UnitType
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for property in declared_properties(ctx.definition) {
            let Control::Text { unit: Some(unit), .. } = &property.control else {
                continue;
            };
            let accepted = ACCEPTED_UNITS.iter().any(|u| u.eq_ignore_ascii_case(unit));
            if !accepted {
                reporter.error(format!(
                    "property \"{}\": unit \"{}\" is unacceptable, use one of {}",
                    property.name,
                    unit,
                    ACCEPTED_UNITS.join(", ")
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::{component, property, Fixture};
    use serde_json::json;

    #[tokio::test]
    async fn test_drop_capital() {
        let fixture = Fixture::components(
            json!([component("para", json!(["dropcap", "dropcap-styled"]))]),
            json!([
                { "name": "dropcap", "label": "Drop", "control": { "type": "drop-capital" }, "dataType": "data" },
                { "name": "dropcap-styled", "label": "Drop", "control": { "type": "drop-capital" }, "dataType": "styles" }
            ]),
        )
        .version("1.1.0");

        let errors = fixture.run(&DropCapitalValidator).await;
        assert_eq!(
            errors,
            [
                "component \"para\": found 2 drop-capital properties, at most one is allowed",
                "component \"para\": drop-capital property \"dropcap-styled\" must use dataType \"data\", found styles",
            ]
        );
    }

    #[tokio::test]
    async fn test_fitting() {
        let fixture = Fixture::components(
            json!([component("img", json!(["fit", "fit-2"])), component("img2", json!(["fit"]))]),
            json!([
                property("fit", json!({ "type": "fitting" })),
                property("fit-2", json!({ "type": "fitting" }))
            ]),
        );
        assert_eq!(
            fixture.run(&FittingValidator).await,
            ["component \"img\": found 2 fitting properties, at most one is allowed"]
        );
    }

    #[tokio::test]
    async fn test_image_editor_and_focuspoint() {
        let fixture = Fixture::components(
            json!([component(
                "hero",
                json!(["crop:photo", "focus:photo", "focus:frame", "styled:frame", "loose"])
            )]),
            json!([
                { "name": "crop", "label": "Crop", "control": { "type": "image-editor" }, "dataType": "doc-image" },
                { "name": "focus", "label": "Focus", "control": { "type": "image-editor", "focuspoint": true },
                  "dataType": "doc-image" },
                { "name": "styled", "label": "Styled", "control": { "type": "image-editor" }, "dataType": "styles" },
                property("loose", json!({ "type": "image-editor" }))
            ]),
        )
        .template("hero", r#"<img doc-image="photo"><div doc-image="frame"></div>"#);

        assert_eq!(
            fixture.run(&ImageEditorValidator).await,
            [
                "component \"hero\": image-editor control \"styled:frame\" requires dataType \"doc-image\", found styles",
                "component \"hero\": image-editor control \"loose\" requires dataType \"doc-image\", found none",
            ]
        );
        assert_eq!(
            fixture.run(&FocuspointValidator).await,
            ["component \"hero\": focuspoint of \"focus:photo\" is not supported on the <img> directive \"photo\""]
        );
    }

    #[tokio::test]
    async fn test_interactive_and_fullscreen_checkbox() {
        let fixture = Fixture::components(
            json!([
                component("embed", json!(["player:app", "fullscreen:app"])),
                component("plain", json!(["widget:app", "toggle"]))
            ]),
            json!([
                { "name": "player", "label": "Player", "control": { "type": "interactive" },
                  "dataType": "doc-interactive" },
                { "name": "widget", "label": "Widget", "control": { "type": "interactive" }, "dataType": "data" },
                { "name": "fullscreen", "label": "Fullscreen",
                  "control": { "type": "checkbox", "value": true, "disableFullscreen": true },
                  "dataType": "doc-interactive" },
                { "name": "toggle", "label": "Toggle",
                  "control": { "type": "checkbox", "value": true, "disableFullscreen": true },
                  "dataType": "styles" }
            ]),
        )
        .version("1.2.0")
        .template("embed", r#"<div doc-interactive="app"></div>"#)
        .template("plain", r#"<div doc-interactive="app"></div>"#);

        assert_eq!(
            fixture.run(&InteractiveValidator).await,
            ["component \"plain\": interactive control \"widget:app\" requires dataType \"doc-interactive\", found data"]
        );
        assert_eq!(
            fixture.run(&DisableFullscreenCheckboxValidator).await,
            ["component \"plain\": checkbox control \"toggle\" requires dataType \"doc-interactive\", found styles"]
        );
    }

    #[tokio::test]
    async fn test_unit_type() {
        let fixture = Fixture::components(
            json!([]),
            json!([
                property("a", json!({ "type": "text", "unit": "PX" })),
                property("b", json!({ "type": "text", "unit": "em" })),
                property("c", json!({ "type": "text", "unit": "rem" })),
                property("d", json!({ "type": "text" }))
            ]),
        );
        assert_eq!(
            fixture.run(&UnitTypeValidator).await,
            ["property \"c\": unit \"rem\" is unacceptable, use one of em, px"]
        );
    }
}
