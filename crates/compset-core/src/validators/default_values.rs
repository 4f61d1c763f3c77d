//! Default values of component properties

use async_trait::async_trait;
use serde_json::Value;

use super::properties::declared_properties;
use super::{ValidationContext, Validator, ValidatorKind};
use crate::model::{ComponentProperty, Control};
use crate::report::Reporter;

/// Keys of a drop-capital default value
pub const DROP_CAPITAL_KEYS: [&str; 3] = ["characters", "lines", "spacing"];

/// Accepted default values of a fitting control
pub const FITTING_VALUES: [&str; 2] = ["fit", "none"];

pub struct DefaultValuesValidator;

impl DefaultValuesValidator {
    /// Why `value` is not an acceptable default for `control`, if it is not
    fn shape_error(control: &Control, value: &Value) -> Option<String> {
        match control {
            Control::Text { .. }
            | Control::Textarea { .. }
            | Control::Url {}
            | Control::Time {}
            | Control::ColorPicker { .. } => {
                (!value.is_string()).then(|| format!("expected a string, found {}", value))
            }
            Control::Select { options } | Control::Radio { options } => {
                (!options.iter().any(|o| o.value.as_ref() == Some(value)))
                    .then(|| format!("{} has no matching entry in the options", value))
            }
            Control::Checkbox { value: checked, .. } => (checked != value)
                .then(|| format!("{} does not match the checkbox value {}", value, checked)),
            Control::DropCapital {} => Self::drop_capital_error(value),
            Control::Fitting {} => match value.as_str() {
                Some(v) if FITTING_VALUES.contains(&v) => None,
                _ => Some(format!("{} is not one of \"fit\" or \"none\"", value)),
            },
            Control::Slider {
                min_value,
                max_value,
                ..
            } => match value.as_f64() {
                Some(n) if n >= *min_value && n <= *max_value => None,
                Some(n) => Some(format!("{} is outside [{}, {}]", n, min_value, max_value)),
                None => Some(format!("expected a number, found {}", value)),
            },
            other => Some(format!(
                "control \"{}\" does not take a default value",
                other.type_name()
            )),
        }
    }

    fn drop_capital_error(value: &Value) -> Option<String> {
        let Some(object) = value.as_object() else {
            return Some(format!("expected an object, found {}", value));
        };
        let keys_match = object.len() == DROP_CAPITAL_KEYS.len()
            && DROP_CAPITAL_KEYS.iter().all(|k| object.contains_key(*k));
        if !keys_match {
            return Some("expected exactly the keys characters, lines and spacing".to_string());
        }
        object
            .iter()
            .find(|(_, v)| !v.is_number())
            .map(|(k, v)| format!("\"{}\" must be a number, found {}", k, v))
    }

    fn check(property: &ComponentProperty, reporter: &mut Reporter<'_>) {
        let Some(value) = &property.default_value else {
            if matches!(property.control, Control::Slider { .. }) {
                reporter.error(format!(
                    "property \"{}\": slider control requires a defaultValue",
                    property.name
                ));
            }
            return;
        };

        match property.data_type {
            Some(data_type) if data_type.accepts_default_value() => {}
            Some(data_type) => {
                reporter.error(format!(
                    "property \"{}\": defaultValue is not allowed for unsupported data type \"{}\"",
                    property.name, data_type
                ));
                return;
            }
            None => {
                reporter.error(format!(
                    "property \"{}\": defaultValue requires a dataType of styles, inlineStyles or data",
                    property.name
                ));
                return;
            }
        }

        if let Some(problem) = Self::shape_error(&property.control, value) {
            reporter.error(format!(
                "property \"{}\": invalid defaultValue: {}",
                property.name, problem
            ));
        }
    }
}

#[async_trait]
impl Validator for DefaultValuesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::DefaultValues
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for property in declared_properties(ctx.definition) {
            Self::check(property, reporter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::Fixture;
    use serde_json::json;

    async fn run(properties: Value) -> Vec<String> {
        Fixture::components(json!([]), properties)
            .run(&DefaultValuesValidator)
            .await
    }

    fn select(default: Value, data_type: &str) -> Value {
        json!({
            "name": "align",
            "label": "Align",
            "control": { "type": "select", "options": [{ "value": "left" }, { "value": "right" }] },
            "dataType": data_type,
            "defaultValue": default
        })
    }

    #[tokio::test]
    async fn test_select_defaults() {
        assert!(run(json!([select(json!("left"), "styles")])).await.is_empty());

        let errors = run(json!([select(json!("center"), "styles")])).await;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no matching entry"));
    }

    #[tokio::test]
    async fn test_options_without_value() {
        let property = |default: &str| {
            json!({
                "name": "variant",
                "label": "Variant",
                "control": {
                    "type": "select",
                    "options": [{ "caption": "a" }, { "caption": "b", "value": "v" }]
                },
                "dataType": "styles",
                "defaultValue": default
            })
        };

        assert!(run(json!([property("v")])).await.is_empty());

        let errors = run(json!([property("x")])).await;
        assert_eq!(
            errors,
            ["property \"variant\": invalid defaultValue: \"x\" has no matching entry in the options"]
        );
    }

    #[tokio::test]
    async fn test_doc_editable_has_unsupported_data_type() {
        let errors = run(json!([select(json!("left"), "doc-editable")])).await;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unsupported data type \"doc-editable\""));
    }

    #[tokio::test]
    async fn test_scalar_controls() {
        let errors = run(json!([
            { "name": "a", "label": "A", "control": { "type": "text" }, "dataType": "data", "defaultValue": "x" },
            { "name": "b", "label": "B", "control": { "type": "url" }, "dataType": "data", "defaultValue": 3 },
            { "name": "c", "label": "C", "control": { "type": "checkbox", "value": "on" }, "dataType": "styles", "defaultValue": "on" },
            { "name": "d", "label": "D", "control": { "type": "checkbox", "value": "on" }, "dataType": "styles", "defaultValue": true },
            { "name": "e", "label": "E", "control": { "type": "fitting" }, "dataType": "styles", "defaultValue": "fit" },
            { "name": "f", "label": "F", "control": { "type": "fitting" }, "dataType": "styles", "defaultValue": "cover" }
        ]))
        .await;

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("property \"b\": invalid defaultValue: expected a string"));
        assert!(errors[1].starts_with("property \"d\""));
        assert!(errors[2].starts_with("property \"f\""));
    }

    #[tokio::test]
    async fn test_drop_capital() {
        let errors = run(json!([
            { "name": "ok", "label": "Ok", "control": { "type": "drop-capital" }, "dataType": "data",
              "defaultValue": { "characters": 1, "lines": 2, "spacing": 0.5 } },
            { "name": "extra", "label": "Extra", "control": { "type": "drop-capital" }, "dataType": "data",
              "defaultValue": { "characters": 1, "lines": 2, "spacing": 0, "color": 1 } },
            { "name": "text", "label": "Text", "control": { "type": "drop-capital" }, "dataType": "data",
              "defaultValue": { "characters": "1", "lines": 2, "spacing": 0 } }
        ]))
        .await;

        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("expected exactly the keys"));
        assert!(errors[1].contains("\"characters\" must be a number"));
    }

    #[tokio::test]
    async fn test_slider() {
        let errors = run(json!([
            { "name": "in", "label": "In", "control": { "type": "slider", "minValue": 0, "maxValue": 10 },
              "dataType": "styles", "defaultValue": 10 },
            { "name": "out", "label": "Out", "control": { "type": "slider", "minValue": 0, "maxValue": 10 },
              "dataType": "styles", "defaultValue": 11 },
            { "name": "none", "label": "None", "control": { "type": "slider", "minValue": 0, "maxValue": 10 },
              "dataType": "styles" }
        ]))
        .await;

        assert_eq!(
            errors,
            [
                "property \"out\": invalid defaultValue: 11 is outside [0, 10]",
                "property \"none\": slider control requires a defaultValue",
            ]
        );
    }
}
