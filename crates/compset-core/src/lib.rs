//! Compset Core - semantic validation of component set packages
//!
//! A component set package is a directory holding a
//! `components-definition.json`, one HTML template per component,
//! stylesheets, icons, scripts and localization files. This crate checks
//! such a package in two tiers:
//!
//! - **Structure**: the definition must parse and match the JSON Schema of
//!   its declared version (see `compset-schemas`)
//! - **Semantics**: templates are scanned for `doc-*` directives, property
//!   references are resolved, and the validators registered for the version
//!   check every cross-reference the schema cannot express
//!
//! # Main Components
//!
//! - [`directives`]: the `doc-*` attribute scanner
//! - [`parser`]: builds the read-only [`ParsedComponentSet`]
//! - [`validators`]: the [`Validator`] trait and its implementations
//! - [`registry`]: which validators run for which version
//! - [`package`]: the end-to-end [`PackageValidator`] pipeline
//! - [`source`]: the [`PackageSource`] abstraction over directories and memory
//!
//! # Example
//!
//! ```no_run
//! use compset_core::{PackageValidator, Reporter};
//!
//! # async fn example() {
//! let validator = PackageValidator::from_dir("./my-components");
//! let mut reporter = Reporter::new(|message| eprintln!("{}", message));
//! if !validator.validate(&mut reporter).await {
//!     std::process::exit(2);
//! }
//! # }
//! ```
//!
//! Copyright (c) 2025 Compset Team
//! Licensed under the Apache-2.0 license

pub mod directives;
pub mod error;
pub mod model;
pub mod package;
pub mod parser;
pub mod registry;
pub mod report;
pub mod source;
pub mod validators;

pub use directives::{scan_directives, Directive, DirectiveType, Directives};
pub use error::{DirectiveError, PackageError, ParseError, Result, SourceError};
pub use model::{ComponentsDefinition, ParsedComponent, ParsedComponentSet, ParsedProperty};
pub use package::{PackageValidator, DEFINITION_FILE};
pub use parser::DefinitionParser;
pub use registry::{kinds_for, validators_for};
pub use report::{Reporter, ValidationOutcome};
pub use source::{DirectorySource, FileSet, MemorySource, PackageSource};
pub use validators::{ValidationContext, Validator, ValidatorKind};

pub use compset_schemas::{SchemaVersion, SchemaViolation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
