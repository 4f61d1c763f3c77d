//! The package validation pipeline

use std::path::PathBuf;

use compset_schemas::{SchemaResolver, SchemaVersion};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{PackageError, Result};
use crate::model::ComponentsDefinition;
use crate::parser::DefinitionParser;
use crate::registry;
use crate::report::{Reporter, ValidationOutcome};
use crate::source::{DirectorySource, FileSet, PackageSource};
use crate::validators::{ValidationContext, ValidatorKind};

/// Path of the definition inside a package
pub const DEFINITION_FILE: &str = "components-definition.json";

/// What a run found out before it stopped
#[derive(Debug, Default)]
struct RunSummary {
    version: Option<String>,
    schema: Option<&'static str>,
    validators: Vec<ValidatorKind>,
}

/// Validates one component set package.
///
/// A run lists the package, checks the definition against the schema of its
/// declared version, parses templates and property references, and then runs
/// every validator registered for that version. Hard failures stop the run
/// and are reported once; validator messages are all reported.
///
/// # Example
///
/// ```no_run
/// use compset_core::PackageValidator;
///
/// # async fn example() {
/// let outcome = PackageValidator::from_dir("./my-components")
///     .validate_collect()
///     .await;
/// for error in &outcome.errors {
///     eprintln!("{}", error);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct PackageValidator<S = DirectorySource> {
    source: S,
    resolver: SchemaResolver,
}

impl PackageValidator<DirectorySource> {
    /// Validator for the package stored in directory `root`
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySource::new(root))
    }
}

impl<S: PackageSource> PackageValidator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            resolver: SchemaResolver::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the pipeline, streaming every error through `reporter`.
    ///
    /// Returns whether the package is valid.
    pub async fn validate(&self, reporter: &mut Reporter<'_>) -> bool {
        let mut summary = RunSummary::default();
        self.validate_with(reporter, &mut summary).await
    }

    /// Run the pipeline and collect everything into a [`ValidationOutcome`]
    pub async fn validate_collect(&self) -> ValidationOutcome {
        let mut errors = Vec::new();
        let mut summary = RunSummary::default();
        let valid = {
            let mut reporter = Reporter::collecting(&mut errors);
            self.validate_with(&mut reporter, &mut summary).await
        };
        ValidationOutcome {
            valid,
            version: summary.version,
            schema: summary.schema.map(str::to_string),
            validators: summary.validators,
            errors,
        }
    }

    #[instrument(skip_all)]
    async fn validate_with(&self, reporter: &mut Reporter<'_>, summary: &mut RunSummary) -> bool {
        if let Err(e) = self.run(reporter, summary).await {
            warn!(error = %e, "package validation stopped");
            for message in e.messages() {
                reporter.error(message);
            }
        }
        let errors = reporter.error_count();
        info!(errors, valid = errors == 0, "package validation finished");
        errors == 0
    }

    async fn run(&self, reporter: &mut Reporter<'_>, summary: &mut RunSummary) -> Result<()> {
        let files = FileSet::new(self.source.list_files().await?);
        if !files.contains(DEFINITION_FILE) {
            return Err(PackageError::MissingDefinition);
        }

        let text = self.source.read_to_string(DEFINITION_FILE).await?;
        let raw: Value =
            serde_json::from_str(&text).map_err(|e| PackageError::InvalidJson(e.to_string()))?;

        let declared = match raw.get("version") {
            Some(Value::String(version)) => version.clone(),
            Some(_) => return Err(PackageError::MissingVersion("\"version\" must be a string".into())),
            None => return Err(PackageError::MissingVersion("\"version\" is missing".into())),
        };
        summary.version = Some(declared.clone());
        let version: SchemaVersion = declared
            .parse()
            .map_err(|source| PackageError::InvalidVersion { raw: declared.clone(), source })?;

        let schema = self
            .resolver
            .resolve(&version)?
            .ok_or_else(|| PackageError::NoSchema(declared.clone()))?;
        summary.schema = Some(schema.family());
        debug!(%version, family = schema.family(), files = files.len(), "resolved schema");

        let violations = schema.validate(&raw);
        if !violations.is_empty() {
            return Err(PackageError::SchemaViolations {
                family: schema.family(),
                violations,
            });
        }

        let definition: ComponentsDefinition =
            serde_json::from_value(raw).map_err(|e| PackageError::Deserialize(e.to_string()))?;
        let parsed = DefinitionParser::new(&self.source, &files)
            .parse(&definition)
            .await?;

        let validators = registry::validators_for(&version)
            .ok_or_else(|| PackageError::NoSchema(declared.clone()))?;
        let ctx = ValidationContext {
            definition: &definition,
            parsed: &parsed,
            files: &files,
            source: &self.source,
        };
        for validator in &validators {
            let before = reporter.error_count();
            validator.validate(&ctx, reporter).await;
            summary.validators.push(validator.kind());
            debug!(
                validator = %validator.kind(),
                errors = reporter.error_count() - before,
                "validator finished"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;

    fn package(definition: Value) -> MemorySource {
        MemorySource::new()
            .with_file(DEFINITION_FILE, definition.to_string())
            .with_file("styles/_common.scss", "")
            .with_file("styles/design.scss", "")
            .with_file("styles/design.css", "")
    }

    fn minimal(version: &str) -> Value {
        json!({
            "name": "minimal",
            "version": version,
            "components": [],
            "componentProperties": []
        })
    }

    #[tokio::test]
    async fn test_minimal_package_is_valid() {
        let outcome = PackageValidator::new(package(minimal("1.2.0"))).validate_collect().await;
        assert!(outcome.valid, "{:?}", outcome.errors);
        assert_eq!(outcome.version.as_deref(), Some("1.2.0"));
        assert_eq!(outcome.schema.as_deref(), Some("1.2"));
        assert_eq!(outcome.validators, registry::kinds_for(&SchemaVersion::new(1, 2, 0)).unwrap());
    }

    #[tokio::test]
    async fn test_missing_version() {
        let mut definition = minimal("1.0.0");
        definition["version"] = json!(1);
        let outcome = PackageValidator::new(package(definition)).validate_collect().await;
        assert_eq!(
            outcome.errors,
            ["components-definition.json has no usable version: \"version\" must be a string"]
        );
    }

    #[tokio::test]
    async fn test_invalid_and_unknown_versions() {
        let outcome = PackageValidator::new(package(minimal("1.x"))).validate_collect().await;
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("invalid version \"1.x\""));

        let outcome = PackageValidator::new(package(minimal("2.0.0"))).validate_collect().await;
        assert_eq!(outcome.errors, ["no schema for version 2.0.0"]);
        assert!(outcome.schema.is_none());
    }

    #[tokio::test]
    async fn test_schema_violations_are_reported_individually() {
        let mut definition = minimal("1.0.0");
        definition["unexpected"] = json!(true);
        definition["components"] = json!([{ "label": "No name" }]);
        let outcome = PackageValidator::new(package(definition)).validate_collect().await;

        assert!(!outcome.valid);
        assert!(outcome.errors.len() >= 2, "{:?}", outcome.errors);
        assert!(outcome
            .errors
            .iter()
            .all(|e| e.starts_with("components-definition.json (schema 1.0): ")));
        assert!(outcome.validators.is_empty());
    }

    #[tokio::test]
    async fn test_streaming_reporter() {
        let source = package(minimal("1.0.0")).with_file("styles/customStyles/x.css", "");
        let mut seen = Vec::new();
        let valid = {
            let mut reporter = Reporter::new(|m| seen.push(m.to_string()));
            PackageValidator::new(source).validate(&mut reporter).await
        };
        assert!(!valid);
        assert_eq!(seen, ["directory \"styles/customStyles/\" is reserved and must not be shipped"]);
    }
}
