//! Semantic version parsing and range matching
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: Option<String>,
    pub build_metadata: Option<String>,
}

impl SchemaVersion {
    /// Create a new release version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Create a pre-release version such as `1.7.0-next`
    pub fn pre(major: u32, minor: u32, patch: u32, pre_release: impl Into<String>) -> Self {
        Self {
            pre_release: Some(pre_release.into()),
            ..Self::new(major, minor, patch)
        }
    }

    /// Parse a version string (`X.Y.Z[-pre][+build]`, optional leading `v`)
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        let trimmed = version_str.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let (version_part, build_metadata) = match trimmed.split_once('+') {
            Some((version, build)) => (version, Some(build.to_string())),
            None => (trimmed, None),
        };

        let (version_part, pre_release) = match version_part.split_once('-') {
            Some((version, pre)) => (version, Some(pre.to_string())),
            None => (version_part, None),
        };

        if matches!(pre_release.as_deref(), Some("")) || matches!(build_metadata.as_deref(), Some("")) {
            return Err(VersionError::InvalidFormat(format!(
                "empty pre-release or build identifier in '{}'",
                version_str
            )));
        }

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(format!(
                "expected format X.Y.Z, got '{}'",
                version_str
            )));
        }

        let number = |label: &str, raw: &str| -> Result<u32, VersionError> {
            if raw.is_empty() || (raw.len() > 1 && raw.starts_with('0')) {
                return Err(VersionError::InvalidFormat(format!(
                    "invalid {} version '{}'",
                    label, raw
                )));
            }
            raw.parse().map_err(|_| {
                VersionError::InvalidFormat(format!("invalid {} version '{}'", label, raw))
            })
        };

        Ok(Self {
            major: number("major", parts[0])?,
            minor: number("minor", parts[1])?,
            patch: number("patch", parts[2])?,
            pre_release,
            build_metadata,
        })
    }

    /// Check if this is a pre-release version
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// The `major.minor.patch` triple, ignoring pre-release and build data
    pub fn triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Check if this version satisfies a version range
    pub fn satisfies(&self, range: &VersionRange) -> bool {
        range.matches(self)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                // A pre-release sorts below its release
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_pre_release(a, b),
            })
    }
}

/// Compare dot-separated pre-release identifiers: numeric identifiers compare
/// numerically and sort below alphanumeric ones, a shorter list of equal
/// prefix sorts first.
fn compare_pre_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(n), Ok(m)) => n.cmp(&m),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// A range of versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// Exact version match
    Exact(SchemaVersion),
    /// Caret range (^X.Y.Z) - compatible with specified version
    Caret(SchemaVersion),
    /// Tilde range (~X.Y.Z) - patch level changes allowed
    Tilde(SchemaVersion),
    /// Greater than or equal
    GreaterOrEqual(SchemaVersion),
    /// Less than
    LessThan(SchemaVersion),
    /// Every comparator must match (`>=1.0.0 <1.4.0`)
    All(Vec<VersionRange>),
    /// Any version
    Any,
}

impl VersionRange {
    /// Parse a version range string. Whitespace separated comparators are
    /// combined into a conjunction.
    pub fn parse(range_str: &str) -> Result<Self, VersionError> {
        let range_str = range_str.trim();

        if range_str == "*" || range_str.is_empty() {
            return Ok(VersionRange::Any);
        }

        let comparators: Vec<&str> = range_str.split_whitespace().collect();
        if comparators.len() > 1 {
            let parts = comparators
                .into_iter()
                .map(Self::parse_comparator)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(VersionRange::All(parts));
        }

        Self::parse_comparator(range_str)
    }

    fn parse_comparator(raw: &str) -> Result<Self, VersionError> {
        let invalid = |e: VersionError| VersionError::InvalidRange(format!("'{}': {}", raw, e));

        if raw == "*" {
            return Ok(VersionRange::Any);
        }
        if let Some(version_str) = raw.strip_prefix('^') {
            return SchemaVersion::parse(version_str).map(VersionRange::Caret).map_err(invalid);
        }
        if let Some(version_str) = raw.strip_prefix('~') {
            return SchemaVersion::parse(version_str).map(VersionRange::Tilde).map_err(invalid);
        }
        if let Some(version_str) = raw.strip_prefix(">=") {
            return SchemaVersion::parse(version_str)
                .map(VersionRange::GreaterOrEqual)
                .map_err(invalid);
        }
        if let Some(version_str) = raw.strip_prefix('<') {
            return SchemaVersion::parse(version_str).map(VersionRange::LessThan).map_err(invalid);
        }
        SchemaVersion::parse(raw.strip_prefix('=').unwrap_or(raw))
            .map(VersionRange::Exact)
            .map_err(invalid)
    }

    /// Check if a version matches this range.
    ///
    /// A pre-release version only matches when one of the range's
    /// comparators names a pre-release on the same `major.minor.patch`.
    pub fn matches(&self, version: &SchemaVersion) -> bool {
        if version.is_pre_release() && !self.admits_pre_release_of(version) {
            return false;
        }
        self.matches_ordering(version)
    }

    fn admits_pre_release_of(&self, version: &SchemaVersion) -> bool {
        match self {
            VersionRange::Any => false,
            VersionRange::All(parts) => parts.iter().any(|p| p.admits_pre_release_of(version)),
            VersionRange::Exact(v)
            | VersionRange::Caret(v)
            | VersionRange::Tilde(v)
            | VersionRange::GreaterOrEqual(v)
            | VersionRange::LessThan(v) => v.is_pre_release() && v.triple() == version.triple(),
        }
    }

    fn matches_ordering(&self, version: &SchemaVersion) -> bool {
        match self {
            VersionRange::Any => true,
            VersionRange::Exact(v) => version.cmp(v) == Ordering::Equal,
            VersionRange::Caret(v) => {
                let upper = if v.major > 0 {
                    SchemaVersion::new(v.major + 1, 0, 0)
                } else if v.minor > 0 {
                    SchemaVersion::new(0, v.minor + 1, 0)
                } else {
                    SchemaVersion::new(0, 0, v.patch + 1)
                };
                version >= v && version < &upper
            }
            VersionRange::Tilde(v) => {
                let upper = SchemaVersion::new(v.major, v.minor + 1, 0);
                version >= v && version < &upper
            }
            VersionRange::GreaterOrEqual(v) => version >= v,
            VersionRange::LessThan(v) => version < v,
            VersionRange::All(parts) => parts.iter().all(|p| p.matches_ordering(version)),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => write!(f, "*"),
            VersionRange::Exact(v) => write!(f, "{}", v),
            VersionRange::Caret(v) => write!(f, "^{}", v),
            VersionRange::Tilde(v) => write!(f, "~{}", v),
            VersionRange::GreaterOrEqual(v) => write!(f, ">={}", v),
            VersionRange::LessThan(v) => write!(f, "<{}", v),
            VersionRange::All(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Version parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    #[error("Invalid version range: {0}")]
    InvalidRange(String),
}
