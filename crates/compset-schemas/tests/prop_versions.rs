//! Property-based tests for version parsing and family selection

use compset_schemas::{family_for, SchemaResolver, SchemaVersion, VersionRange};
use proptest::prelude::*;
use serde_json::json;

fn release_strategy() -> impl Strategy<Value = SchemaVersion> {
    (0u32..4, 0u32..10, 0u32..20).prop_map(|(major, minor, patch)| SchemaVersion::new(major, minor, patch))
}

fn pre_release_strategy() -> impl Strategy<Value = SchemaVersion> {
    (release_strategy(), "(alpha|beta|next|rc)(\\.[0-9]{1,2})?")
        .prop_map(|(v, pre)| SchemaVersion::pre(v.major, v.minor, v.patch, pre))
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(v in prop_oneof![release_strategy(), pre_release_strategy()]) {
        let parsed = SchemaVersion::parse(&v.to_string()).unwrap();
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn ordering_is_total_and_consistent(a in release_strategy(), b in release_strategy()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
    }

    #[test]
    fn pre_release_sorts_below_its_release(v in pre_release_strategy()) {
        let release = SchemaVersion::new(v.major, v.minor, v.patch);
        prop_assert!(v < release);
    }

    #[test]
    fn releases_map_to_their_minor_family(minor in 0u32..7, patch in 0u32..50) {
        let version = SchemaVersion::new(1, minor, patch);
        let (_, family) = family_for(&version).unwrap();
        prop_assert_eq!(family.name(), format!("1.{}", minor));
    }

    #[test]
    fn foreign_pre_releases_never_resolve(v in pre_release_strategy()) {
        prop_assume!(!(v.triple() == (1, 7, 0) && v.pre_release.as_deref().is_some_and(|p| p.starts_with("next"))));
        prop_assert!(family_for(&v).is_none());
    }

    #[test]
    fn tilde_never_admits_next_minor(major in 0u32..3, minor in 0u32..9, patch in 0u32..9) {
        let range = VersionRange::parse(&format!("~{}.{}.{}", major, minor, patch)).unwrap();
        prop_assert!(!range.matches(&SchemaVersion::new(major, minor + 1, 0)));
        prop_assert!(range.matches(&SchemaVersion::new(major, minor, patch + 1)));
    }
}

#[test]
fn next_channel_resolves_to_its_own_document() {
    let resolver = SchemaResolver::new();
    let version = SchemaVersion::parse("1.7.0-next.12").unwrap();
    let schema = resolver.resolve(&version).unwrap().unwrap();
    assert_eq!(schema.family(), "next");

    let definition = json!({
        "name": "demo",
        "version": "1.7.0-next.12",
        "components": [],
        "componentProperties": [
            {
                "name": "headline",
                "label": "Headline",
                "control": { "type": "text" },
                "dataType": "doc-editable"
            }
        ]
    });
    assert!(schema.validate(&definition).is_empty());
}

#[test]
fn families_are_listed_in_ladder_order() {
    let names: Vec<_> = SchemaResolver::new().families().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["1.0", "1.1", "1.2", "1.3", "1.4", "1.5", "1.6", "next"]);
}
