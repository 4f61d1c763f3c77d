//! Schema selection and compilation
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::families::{families, family_for, SchemaFamily};
use crate::versioning::SchemaVersion;
use jsonschema::{Draft, Validator};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A single structural violation reported by a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// JSON pointer into the validated instance
    pub instance_path: String,
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// A compiled schema document bound to its family
pub struct CompiledSchema {
    family: &'static str,
    validator: Validator,
}

impl CompiledSchema {
    fn compile(family: &SchemaFamily) -> SchemaResult<Self> {
        let document: Value =
            serde_json::from_str(family.document()).map_err(|e| SchemaError::InvalidDocument {
                family: family.name(),
                reason: e.to_string(),
            })?;

        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(&document)
            .map_err(|e| SchemaError::CompileFailed {
                family: family.name(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            family: family.name(),
            validator,
        })
    }

    /// Name of the family this schema belongs to
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Collect every violation of `instance`; empty when valid
    pub fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.validator
            .iter_errors(instance)
            .map(|err| SchemaViolation {
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect()
    }

    /// Whether `instance` satisfies the schema
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

type Slot = OnceLock<SchemaResult<Arc<CompiledSchema>>>;

fn slots() -> &'static [Slot] {
    static SLOTS: OnceLock<Vec<Slot>> = OnceLock::new();
    SLOTS.get_or_init(|| families().iter().map(|_| OnceLock::new()).collect())
}

/// Resolves definition versions to compiled schemas.
///
/// Compilation happens at most once per family for the life of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaResolver;

impl SchemaResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the schema for `version`. `Ok(None)` means no family covers it.
    pub fn resolve(&self, version: &SchemaVersion) -> SchemaResult<Option<Arc<CompiledSchema>>> {
        let Some((index, family)) = family_for(version) else {
            debug!(%version, "no schema family matches");
            return Ok(None);
        };

        let compiled = slots()[index].get_or_init(|| {
            debug!(family = family.name(), "compiling schema");
            CompiledSchema::compile(family).map(Arc::new)
        });

        compiled.clone().map(Some)
    }

    /// The families known to the resolver, in ladder order
    pub fn families(&self) -> &'static [SchemaFamily] {
        families()
    }
}
