//! Error types for schema resolution
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised while loading or compiling a schema document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema document for family {family} is not valid JSON: {reason}")]
    InvalidDocument { family: &'static str, reason: String },

    #[error("Failed to compile schema for family {family}: {reason}")]
    CompileFailed { family: &'static str, reason: String },
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
