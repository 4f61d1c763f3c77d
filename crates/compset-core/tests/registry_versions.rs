//! Validator membership across the schema ladder

use compset_core::{kinds_for, validators_for, SchemaVersion, ValidatorKind};
use compset_schemas::families;

fn release(minor: u32) -> SchemaVersion {
    SchemaVersion::new(1, minor, 0)
}

#[test]
fn test_membership_only_grows_except_the_retired_checkbox_rule() {
    for minor in 0..6 {
        let older = kinds_for(&release(minor)).unwrap();
        let newer = kinds_for(&release(minor + 1)).unwrap();
        for kind in &older {
            if *kind == ValidatorKind::DisableFullscreenCheckbox && minor + 1 == 4 {
                assert!(!newer.contains(kind));
                continue;
            }
            assert!(newer.contains(kind), "{} dropped at 1.{}", kind, minor + 1);
        }
    }
}

#[test]
fn test_every_family_has_validators() {
    for family in families() {
        let version = match family.name() {
            "next" => SchemaVersion::pre(1, 7, 0, "next"),
            name => format!("{}.0", name).parse().unwrap(),
        };
        let validators = validators_for(&version).unwrap();
        assert!(!validators.is_empty(), "family {}", family.name());
        assert!(validators.iter().any(|v| v.kind() == ValidatorKind::Components));
    }
}

#[test]
fn test_patch_releases_share_their_minor_set() {
    assert_eq!(kinds_for(&"1.3.7".parse().unwrap()), kinds_for(&release(3)));
    assert_eq!(kinds_for(&"v1.5.1".parse().unwrap()), kinds_for(&release(5)));
}

#[test]
fn test_list_length_never_shrinks_except_at_1_4() {
    let ladder: Vec<SchemaVersion> = families()
        .iter()
        .map(|family| match family.name() {
            "next" => SchemaVersion::pre(1, 7, 0, "next"),
            name => format!("{}.0", name).parse().unwrap(),
        })
        .collect();

    for pair in ladder.windows(2) {
        let older = validators_for(&pair[0]).unwrap().len();
        let newer = validators_for(&pair[1]).unwrap().len();
        if pair[1] == release(4) {
            assert_eq!(newer + 1, older, "1.3 -> 1.4 retires exactly one validator");
        } else {
            assert!(newer >= older, "{} -> {}: {} < {}", pair[0], pair[1], newer, older);
        }
    }
}
