//! Schemas command handler

use crate::cli::SchemasArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use compset_core::{kinds_for, ValidatorKind};
use compset_schemas::{families, family_for, SchemaFamily, SchemaVersion, VersionRange};
use serde::Serialize;
use tracing::debug;

/// One row of the schema listing
#[derive(Debug, Serialize)]
struct FamilyInfo {
    family: &'static str,
    versions: String,
    validators: usize,
}

/// Family and validators governing a single version
#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    family: &'static str,
    versions: String,
    validators: Vec<ValidatorKind>,
}

/// Handle the schemas command
pub async fn handle_schemas(args: SchemasArgs, output: &mut OutputWriter) -> Result<()> {
    match args.for_version {
        Some(raw) => show_version(&raw, output),
        None => list_families(output),
    }
}

fn list_families(output: &mut OutputWriter) -> Result<()> {
    let rows: Vec<FamilyInfo> = families()
        .iter()
        .map(|family| FamilyInfo {
            family: family.name(),
            versions: family.range().to_string(),
            validators: validator_count(family),
        })
        .collect();
    debug!(families = rows.len(), "listing schema families");

    if output.is_human() {
        output.table(
            &["Family", "Versions", "Validators"],
            rows.into_iter()
                .map(|row| vec![row.family.to_string(), row.versions, row.validators.to_string()])
                .collect(),
        )
    } else {
        output.data(&rows)
    }
}

fn show_version(raw: &str, output: &mut OutputWriter) -> Result<()> {
    let version = SchemaVersion::parse(raw)?;
    let (_, family) = family_for(&version)
        .ok_or_else(|| Error::other(format!("no schema family governs version {}", version)))?;

    let info = VersionInfo {
        version: version.to_string(),
        family: family.name(),
        versions: family.range().to_string(),
        validators: kinds_for(&version).unwrap_or_default(),
    };

    if output.is_human() {
        output.writeln(&format!("Version:    {}", info.version))?;
        output.writeln(&format!("Family:     {} ({})", info.family, info.versions))?;
        output.writeln(&format!("Validators: {}", info.validators.len()))?;
        for kind in &info.validators {
            output.writeln(&format!("  • {}", kind))?;
        }
        Ok(())
    } else {
        output.data(&info)
    }
}

/// Validators registered for the lowest version a family serves
fn validator_count(family: &SchemaFamily) -> usize {
    lowest(family.range())
        .and_then(|version| kinds_for(&version))
        .map_or(0, |kinds| kinds.len())
}

fn lowest(range: &VersionRange) -> Option<SchemaVersion> {
    match range {
        VersionRange::Exact(v)
        | VersionRange::Caret(v)
        | VersionRange::Tilde(v)
        | VersionRange::GreaterOrEqual(v) => Some(v.clone()),
        VersionRange::All(parts) => parts.iter().find_map(lowest),
        VersionRange::LessThan(_) | VersionRange::Any => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn run(version: Option<&str>) -> (Result<()>, String) {
        let buffer = SharedBuffer::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(buffer.clone()));
        let result = handle_schemas(
            SchemasArgs {
                for_version: version.map(str::to_string),
            },
            &mut output,
        )
        .await;
        let contents = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (result, contents)
    }

    #[tokio::test]
    async fn test_lists_every_family() {
        let (result, contents) = run(None).await;
        result.unwrap();

        let rows: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0]["family"], "1.0");
        assert_eq!(rows[0]["validators"], 27);
        assert_eq!(rows[7]["family"], "next");
        assert_eq!(rows[7]["validators"], 31);
    }

    #[tokio::test]
    async fn test_single_version() {
        let (result, contents) = run(Some("1.4.2")).await;
        result.unwrap();

        let info: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(info["family"], "1.4");
        assert_eq!(info["versions"], "~1.4.0");
        assert!(!info["validators"]
            .as_array()
            .unwrap()
            .iter()
            .any(|kind| kind == "disable-fullscreen-checkbox"));
    }

    #[tokio::test]
    async fn test_unknown_versions() {
        let (result, _) = run(Some("not-a-version")).await;
        assert!(matches!(result, Err(Error::Version(_))));

        let (result, _) = run(Some("2.0.0")).await;
        assert!(matches!(result, Err(Error::Other { .. })));
    }
}
