//! Semantic validators
//!
//! Each validator checks one class of invariant against the parsed model and
//! reports every violation it finds. Validators share nothing but read-only
//! references, so any subset runs in any order with identical results.

use async_trait::async_trait;
use serde::Serialize;

use crate::model::{ComponentsDefinition, ParsedComponentSet};
use crate::report::Reporter;
use crate::source::{FileSet, PackageSource};

pub mod assets;
pub mod components;
pub mod controls;
pub mod conversion;
pub mod default_component;
pub mod default_values;
pub mod directive_options;
pub mod directive_properties;
pub mod doc_directives;
pub mod groups;
pub mod localization;
pub mod package_limits;
pub mod properties;
pub mod restrict_children;

pub use assets::{CustomStylesValidator, IconsValidator, ScriptsValidator};
pub use components::ComponentsValidator;
pub use controls::{
    DisableFullscreenCheckboxValidator, DropCapitalValidator, FittingValidator,
    FocuspointValidator, ImageEditorValidator, InteractiveValidator, UnitTypeValidator,
};
pub use conversion::{ConversionRulesValidator, ConversionShortcutsValidator};
pub use default_component::{DefaultComponentOnEnterOverrideValidator, DefaultComponentOnEnterValidator};
pub use default_values::DefaultValuesValidator;
pub use directive_options::{
    AutofillValidator, ContainerGroupsValidator, DirectiveOptionsValidator,
    StripStylingOnPasteValidator,
};
pub use directive_properties::DirectivePropertiesValidator;
pub use doc_directives::{
    DocChartValidator, DocContainerValidator, DocInfogramValidator, DocMediaValidator,
    DocSlideshowValidator,
};
pub use groups::GroupsValidator;
pub use localization::LocalizationValidator;
pub use package_limits::PackageLimitsValidator;
pub use properties::PropertiesValidator;
pub use restrict_children::{RestrictChildrenValidator, SlidesValidator};

/// Everything a validator may consult
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub definition: &'a ComponentsDefinition,
    pub parsed: &'a ParsedComponentSet,
    pub files: &'a FileSet,
    pub source: &'a dyn PackageSource,
}

/// A single semantic check over a parsed package
#[async_trait]
pub trait Validator: Send + Sync {
    fn kind(&self) -> ValidatorKind;

    /// Report every violation through `reporter`. Never stops at the first.
    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>);
}

macro_rules! validator_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Identifies a validator in the registry and in reports
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum ValidatorKind {
            $(#[serde(rename = $name)] $variant,)*
        }

        impl ValidatorKind {
            /// Every kind, in registry order
            pub const ALL: &'static [ValidatorKind] = &[$(ValidatorKind::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ValidatorKind::$variant => $name,)*
                }
            }
        }
    };
}

validator_kinds! {
    Components => "components",
    Properties => "properties",
    Groups => "groups",
    ConversionRules => "conversion-rules",
    ConversionShortcuts => "conversion-shortcuts",
    DefaultComponentOnEnter => "default-component-on-enter",
    DefaultComponentOnEnterOverride => "default-component-on-enter-override",
    DefaultValues => "default-values",
    DirectiveOptions => "directive-options",
    ContainerGroups => "container-groups",
    DirectiveProperties => "directive-properties",
    Autofill => "autofill",
    DocContainer => "doc-container",
    DocSlideshow => "doc-slideshow",
    DocMedia => "doc-media",
    DocChart => "doc-chart",
    DocInfogram => "doc-infogram",
    DropCapital => "drop-capital",
    Fitting => "fitting",
    Focuspoint => "focuspoint",
    ImageEditor => "image-editor",
    Interactive => "interactive",
    DisableFullscreenCheckbox => "disable-fullscreen-checkbox",
    UnitType => "unit-type",
    RestrictChildren => "restrict-children",
    Slides => "slides",
    StripStylingOnPaste => "strip-styling-on-paste",
    Icons => "icons",
    Scripts => "scripts",
    CustomStyles => "custom-styles",
    Localization => "localization",
    Package => "package",
}

impl std::fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<_> = ValidatorKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ValidatorKind::ALL.len());
        assert_eq!(ValidatorKind::ALL.len(), 32);
    }

    #[test]
    fn test_kind_serializes_by_name() {
        let json = serde_json::to_string(&ValidatorKind::DocContainer).unwrap();
        assert_eq!(json, "\"doc-container\"");
    }
}
