//! The append-only ladder of schema families
//!
//! Each family covers a range of definition versions and embeds exactly one
//! schema document. Families are matched in ladder order; the first match wins.
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

use crate::versioning::{SchemaVersion, VersionRange};
use std::sync::OnceLock;

/// A schema family: a version range and the document that governs it
#[derive(Debug)]
pub struct SchemaFamily {
    name: &'static str,
    range: VersionRange,
    document: &'static str,
}

impl SchemaFamily {
    fn new(name: &'static str, range: VersionRange, document: &'static str) -> Self {
        Self { name, range, document }
    }

    /// Short family name (`1.0` … `1.6`, `next`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The version range served by this family
    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    /// The raw JSON Schema document
    pub fn document(&self) -> &'static str {
        self.document
    }

    /// Whether `version` falls into this family
    pub fn matches(&self, version: &SchemaVersion) -> bool {
        self.range.matches(version)
    }
}

fn tilde(major: u32, minor: u32) -> VersionRange {
    VersionRange::Tilde(SchemaVersion::new(major, minor, 0))
}

/// All families in ladder order
pub fn families() -> &'static [SchemaFamily] {
    static LADDER: OnceLock<Vec<SchemaFamily>> = OnceLock::new();
    LADDER.get_or_init(|| {
        vec![
            SchemaFamily::new(
                "1.0",
                tilde(1, 0),
                include_str!("../schemas/components-definition-1.0.json"),
            ),
            SchemaFamily::new(
                "1.1",
                tilde(1, 1),
                include_str!("../schemas/components-definition-1.1.json"),
            ),
            SchemaFamily::new(
                "1.2",
                tilde(1, 2),
                include_str!("../schemas/components-definition-1.2.json"),
            ),
            SchemaFamily::new(
                "1.3",
                tilde(1, 3),
                include_str!("../schemas/components-definition-1.3.json"),
            ),
            SchemaFamily::new(
                "1.4",
                tilde(1, 4),
                include_str!("../schemas/components-definition-1.4.json"),
            ),
            SchemaFamily::new(
                "1.5",
                tilde(1, 5),
                include_str!("../schemas/components-definition-1.5.json"),
            ),
            SchemaFamily::new(
                "1.6",
                tilde(1, 6),
                include_str!("../schemas/components-definition-1.6.json"),
            ),
            SchemaFamily::new(
                "next",
                VersionRange::All(vec![
                    VersionRange::GreaterOrEqual(SchemaVersion::pre(1, 7, 0, "next")),
                    VersionRange::LessThan(SchemaVersion::new(1, 7, 0)),
                ]),
                include_str!("../schemas/components-definition-next.json"),
            ),
        ]
    })
}

/// Find the family that governs `version`
pub fn family_for(version: &SchemaVersion) -> Option<(usize, &'static SchemaFamily)> {
    families()
        .iter()
        .enumerate()
        .find(|(_, family)| family.matches(version))
}
