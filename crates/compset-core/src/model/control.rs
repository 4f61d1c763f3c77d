//! Property controls and data types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Label;
use crate::directives::DirectiveType;

/// One selectable option of a `select` or `radio` control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlOption {
    /// An option without a value stores nothing when chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Only meaningful for radio options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Editor control of a component property, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Control {
    #[serde(rename = "select")]
    Select { options: Vec<ControlOption> },

    #[serde(rename = "radio")]
    Radio { options: Vec<ControlOption> },

    #[serde(rename = "checkbox")]
    Checkbox {
        value: Value,
        #[serde(
            default,
            rename = "disableFullscreen",
            skip_serializing_if = "Option::is_none"
        )]
        disable_fullscreen: Option<bool>,
    },

    #[serde(rename = "text")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },

    #[serde(rename = "time")]
    Time {},

    #[serde(rename = "colorPicker")]
    ColorPicker {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        colors: Option<Vec<String>>,
    },

    #[serde(rename = "image-editor")]
    ImageEditor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focuspoint: Option<bool>,
    },

    #[serde(rename = "drop-capital")]
    DropCapital {},

    #[serde(rename = "media-properties")]
    MediaProperties {},

    #[serde(rename = "fitting")]
    Fitting {},

    #[serde(rename = "slides")]
    Slides {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude: Option<Vec<String>>,
    },

    #[serde(rename = "interactive")]
    Interactive {},

    #[serde(rename = "header")]
    Header {},

    #[serde(rename = "textarea")]
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },

    #[serde(rename = "url")]
    Url {},

    #[serde(rename = "slider")]
    Slider {
        #[serde(rename = "minValue")]
        min_value: f64,
        #[serde(rename = "maxValue")]
        max_value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },

    #[serde(rename = "chart")]
    Chart {},

    #[serde(rename = "infogram")]
    Infogram {},
}

impl Control {
    /// The `type` tag as written in the definition
    pub fn type_name(&self) -> &'static str {
        match self {
            Control::Select { .. } => "select",
            Control::Radio { .. } => "radio",
            Control::Checkbox { .. } => "checkbox",
            Control::Text { .. } => "text",
            Control::Time {} => "time",
            Control::ColorPicker { .. } => "colorPicker",
            Control::ImageEditor { .. } => "image-editor",
            Control::DropCapital {} => "drop-capital",
            Control::MediaProperties {} => "media-properties",
            Control::Fitting {} => "fitting",
            Control::Slides { .. } => "slides",
            Control::Interactive {} => "interactive",
            Control::Header {} => "header",
            Control::Textarea { .. } => "textarea",
            Control::Url {} => "url",
            Control::Slider { .. } => "slider",
            Control::Chart {} => "chart",
            Control::Infogram {} => "infogram",
        }
    }

    /// Options of a select or radio control
    pub fn options(&self) -> Option<&[ControlOption]> {
        match self {
            Control::Select { options } | Control::Radio { options } => Some(options),
            _ => None,
        }
    }
}

/// Where a property stores its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "styles")]
    Styles,
    #[serde(rename = "inlineStyles")]
    InlineStyles,
    #[serde(rename = "data")]
    Data,
    #[serde(rename = "doc-editable")]
    DocEditable,
    #[serde(rename = "doc-image")]
    DocImage,
    #[serde(rename = "doc-html")]
    DocHtml,
    #[serde(rename = "doc-slideshow")]
    DocSlideshow,
    #[serde(rename = "doc-media")]
    DocMedia,
    #[serde(rename = "doc-interactive")]
    DocInteractive,
    #[serde(rename = "doc-link")]
    DocLink,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Styles => "styles",
            DataType::InlineStyles => "inlineStyles",
            DataType::Data => "data",
            DataType::DocEditable => "doc-editable",
            DataType::DocImage => "doc-image",
            DataType::DocHtml => "doc-html",
            DataType::DocSlideshow => "doc-slideshow",
            DataType::DocMedia => "doc-media",
            DataType::DocInteractive => "doc-interactive",
            DataType::DocLink => "doc-link",
        }
    }

    /// The directive type a `doc-*` data type is stored in
    pub fn directive_type(&self) -> Option<DirectiveType> {
        match self {
            DataType::Styles | DataType::InlineStyles | DataType::Data => None,
            DataType::DocEditable => Some(DirectiveType::Editable),
            DataType::DocImage => Some(DirectiveType::Image),
            DataType::DocHtml => Some(DirectiveType::Html),
            DataType::DocSlideshow => Some(DirectiveType::Slideshow),
            DataType::DocMedia => Some(DirectiveType::Media),
            DataType::DocInteractive => Some(DirectiveType::Interactive),
            DataType::DocLink => Some(DirectiveType::Link),
        }
    }

    /// Whether a property of this type may declare a `defaultValue`
    pub fn accepts_default_value(&self) -> bool {
        matches!(self, DataType::Styles | DataType::InlineStyles | DataType::Data)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_control_tagging() {
        let control: Control = serde_json::from_value(json!({
            "type": "slider", "minValue": 1, "maxValue": 5, "step": 0.5
        }))
        .unwrap();
        assert_eq!(
            control,
            Control::Slider { min_value: 1.0, max_value: 5.0, step: Some(0.5) }
        );

        let control: Control = serde_json::from_value(json!({ "type": "time" })).unwrap();
        assert_eq!(control.type_name(), "time");

        let control: Control = serde_json::from_value(json!({
            "type": "checkbox", "value": "on", "disableFullscreen": true
        }))
        .unwrap();
        assert!(matches!(
            control,
            Control::Checkbox { disable_fullscreen: Some(true), .. }
        ));
    }

    #[test]
    fn test_unknown_control_rejected() {
        let result: Result<Control, _> = serde_json::from_value(json!({ "type": "spinner" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_data_type_mapping() {
        let dt: DataType = serde_json::from_value(json!("doc-media")).unwrap();
        assert_eq!(dt, DataType::DocMedia);
        assert_eq!(dt.directive_type(), Some(DirectiveType::Media));
        assert!(!dt.accepts_default_value());
        assert!(DataType::InlineStyles.accepts_default_value());
        assert_eq!(DataType::Styles.directive_type(), None);
    }
}
