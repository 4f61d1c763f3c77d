//! Error types for the compset core library
//!
//! Hard failures abort a validation run before any semantic validator runs.
//! Rule violations found by validators are not errors in this sense; they are
//! streamed through a [`Reporter`](crate::report::Reporter).

use compset_schemas::{SchemaError, SchemaViolation, VersionError};
use thiserror::Error;

/// Raised by the directive scanner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("doc-* attributes must be unique, found duplicate key \"{key}\"")]
    DuplicateKey { key: String },
}

/// Errors from a [`PackageSource`](crate::source::PackageSource)
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("invalid package path: {path}")]
    InvalidPath { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Utf8 { path: String },

    #[error("failed to list package files: {message}")]
    Walk { message: String },
}

/// Raised by the definition parser; any of these prevents validation
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("component \"{component}\": unknown property \"{property}\"")]
    UnknownProperty { component: String, property: String },

    #[error("component \"{component}\": directive \"{key}\" referenced by \"{reference}\" does not exist in the template")]
    MissingDirective {
        component: String,
        key: String,
        reference: String,
    },

    #[error("component \"{component}\": {source}")]
    Directive {
        component: String,
        #[source]
        source: DirectiveError,
    },

    #[error("component \"{component}\": could not read template: {source}")]
    Template {
        component: String,
        #[source]
        source: SourceError,
    },
}

/// Hard failures of a package validation run
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("components-definition.json is missing")]
    MissingDefinition,

    #[error("components-definition.json is not valid json: {0}")]
    InvalidJson(String),

    #[error("components-definition.json has no usable version: {0}")]
    MissingVersion(String),

    #[error("invalid version \"{raw}\": {source}")]
    InvalidVersion {
        raw: String,
        #[source]
        source: VersionError,
    },

    #[error("no schema for version {0}")]
    NoSchema(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("components-definition.json does not match schema {family} ({} violations)", .violations.len())]
    SchemaViolations {
        family: &'static str,
        violations: Vec<SchemaViolation>,
    },

    #[error("components-definition.json could not be read as a definition: {0}")]
    Deserialize(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl PackageError {
    /// The messages this error contributes to a report.
    ///
    /// Schema violations expand to one message each; every other variant is a
    /// single message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            PackageError::SchemaViolations { family, violations } => violations
                .iter()
                .map(|v| format!("components-definition.json (schema {}): {}", family, v))
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Convenience alias for results carrying a [`PackageError`]
pub type Result<T> = std::result::Result<T, PackageError>;
