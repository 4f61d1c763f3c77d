//! Compset Schemas - versioned JSON Schema documents for component sets
//!
//! This crate owns the structural half of component set validation:
//! - **Versioning**: semantic version parsing and range matching, including
//!   prerelease channels
//! - **Families**: the append-only ladder mapping version ranges onto schema
//!   documents (`1.0` through `1.6`, plus the `next` channel)
//! - **Resolution**: selection and memoized compilation of the draft-07
//!   document for a given definition version
//!
//! ## Quick Start
//!
//! ```rust
//! use compset_schemas::{SchemaResolver, SchemaVersion};
//! use serde_json::json;
//!
//! let version = SchemaVersion::parse("1.2.0").unwrap();
//! let schema = SchemaResolver::new().resolve(&version).unwrap().unwrap();
//!
//! let definition = json!({
//!     "name": "demo",
//!     "version": "1.2.0",
//!     "components": [],
//!     "componentProperties": []
//! });
//! assert!(schema.validate(&definition).is_empty());
//! ```
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod families;
pub mod resolver;
pub mod versioning;

pub use error::{SchemaError, SchemaResult};
pub use families::{families, family_for, SchemaFamily};
pub use resolver::{CompiledSchema, SchemaResolver, SchemaViolation};
pub use versioning::{SchemaVersion, VersionError, VersionRange};
