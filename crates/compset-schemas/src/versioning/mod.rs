//! Semantic versioning for component set definitions
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

pub mod version;

pub use version::{SchemaVersion, VersionError, VersionRange};
