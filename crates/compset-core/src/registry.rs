//! Validator registry
//!
//! Which validators run depends on the definition version. Each entry names
//! the version a validator was introduced in and, optionally, the version it
//! was retired in (exclusive). Definitions older than [`FLOOR`] get no
//! validators at all.

use compset_schemas::SchemaVersion;

use crate::validators::*;

/// Oldest definition version the registry knows
pub const FLOOR: SchemaVersion = SchemaVersion::new(1, 0, 0);

const V1_1: SchemaVersion = SchemaVersion::new(1, 1, 0);
const V1_3: SchemaVersion = SchemaVersion::new(1, 3, 0);
const V1_4: SchemaVersion = SchemaVersion::new(1, 4, 0);
const V1_6: SchemaVersion = SchemaVersion::new(1, 6, 0);

type Factory = fn(&SchemaVersion) -> Box<dyn Validator>;

struct Entry {
    kind: ValidatorKind,
    introduced: SchemaVersion,
    retired: Option<SchemaVersion>,
    build: Factory,
}

impl Entry {
    fn applies_to(&self, version: &SchemaVersion) -> bool {
        version >= &self.introduced && self.retired.as_ref().map_or(true, |r| version < r)
    }
}

macro_rules! entry {
    ($kind:ident, $since:expr, $build:expr) => {
        entry!($kind, $since, None, $build)
    };
    ($kind:ident, $since:expr, $retired:expr, $build:expr) => {
        Entry {
            kind: ValidatorKind::$kind,
            introduced: $since,
            retired: $retired,
            build: $build,
        }
    };
}

static ENTRIES: [Entry; 32] = [
    entry!(Components, FLOOR, |_| Box::new(ComponentsValidator)),
    entry!(Properties, FLOOR, |_| Box::new(PropertiesValidator)),
    entry!(Groups, FLOOR, |_| Box::new(GroupsValidator)),
    entry!(ConversionRules, FLOOR, |_| Box::new(ConversionRulesValidator)),
    entry!(ConversionShortcuts, V1_3, |_| Box::new(ConversionShortcutsValidator)),
    entry!(DefaultComponentOnEnter, FLOOR, |_| Box::new(DefaultComponentOnEnterValidator)),
    entry!(DefaultComponentOnEnterOverride, V1_1, |_| {
        Box::new(DefaultComponentOnEnterOverrideValidator)
    }),
    entry!(DefaultValues, FLOOR, |_| Box::new(DefaultValuesValidator)),
    entry!(DirectiveOptions, FLOOR, |_| Box::new(DirectiveOptionsValidator)),
    entry!(ContainerGroups, V1_1, |_| Box::new(ContainerGroupsValidator)),
    entry!(DirectiveProperties, FLOOR, |_| Box::new(DirectivePropertiesValidator)),
    entry!(Autofill, V1_1, |_| Box::new(AutofillValidator)),
    entry!(DocContainer, FLOOR, |v| Box::new(DocContainerValidator::for_version(v))),
    entry!(DocSlideshow, FLOOR, |_| Box::new(DocSlideshowValidator)),
    entry!(DocMedia, FLOOR, |_| Box::new(DocMediaValidator)),
    entry!(DocChart, FLOOR, |_| Box::new(DocChartValidator)),
    entry!(DocInfogram, FLOOR, |_| Box::new(DocInfogramValidator)),
    entry!(DropCapital, FLOOR, |_| Box::new(DropCapitalValidator)),
    entry!(Fitting, FLOOR, |_| Box::new(FittingValidator)),
    entry!(Focuspoint, FLOOR, |_| Box::new(FocuspointValidator)),
    entry!(ImageEditor, FLOOR, |_| Box::new(ImageEditorValidator)),
    entry!(Interactive, FLOOR, |_| Box::new(InteractiveValidator)),
    entry!(DisableFullscreenCheckbox, FLOOR, Some(V1_4), |_| {
        Box::new(DisableFullscreenCheckboxValidator)
    }),
    entry!(UnitType, FLOOR, |_| Box::new(UnitTypeValidator)),
    entry!(RestrictChildren, FLOOR, |_| Box::new(RestrictChildrenValidator)),
    entry!(Slides, FLOOR, |_| Box::new(SlidesValidator)),
    entry!(StripStylingOnPaste, V1_6, |_| Box::new(StripStylingOnPasteValidator)),
    entry!(Icons, FLOOR, |_| Box::new(IconsValidator)),
    entry!(Scripts, FLOOR, |_| Box::new(ScriptsValidator)),
    entry!(CustomStyles, FLOOR, |_| Box::new(CustomStylesValidator)),
    entry!(Localization, FLOOR, |_| Box::new(LocalizationValidator)),
    entry!(Package, FLOOR, |_| Box::new(PackageLimitsValidator::default())),
];

fn entries_for(version: &SchemaVersion) -> Option<impl Iterator<Item = &'static Entry> + '_> {
    if version < &FLOOR {
        return None;
    }
    Some(ENTRIES.iter().filter(move |e| e.applies_to(version)))
}

/// Validators for a definition of `version`, in registry order.
///
/// Returns `None` for versions below [`FLOOR`].
pub fn validators_for(version: &SchemaVersion) -> Option<Vec<Box<dyn Validator>>> {
    entries_for(version).map(|entries| entries.map(|e| (e.build)(version)).collect())
}

/// The kinds [`validators_for`] would return
pub fn kinds_for(version: &SchemaVersion) -> Option<Vec<ValidatorKind>> {
    entries_for(version).map(|entries| entries.map(|e| e.kind).collect())
}
