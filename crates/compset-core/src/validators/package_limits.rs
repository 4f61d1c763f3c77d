//! Package-wide file count and size limits

use async_trait::async_trait;
use tracing::debug;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::report::Reporter;

const MIB: u64 = 1024 * 1024;

/// Directory of free-form assets with its own, tighter limits
pub const CUSTOM_DIR: &str = "custom";

/// File count and byte limits for a package and its `custom/` directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageLimits {
    pub max_files: usize,
    pub max_bytes: u64,
    pub custom_max_files: usize,
    pub custom_max_bytes: u64,
}

impl Default for PackageLimits {
    fn default() -> Self {
        Self {
            max_files: 5000,
            max_bytes: 100 * MIB,
            custom_max_files: 1000,
            custom_max_bytes: 20 * MIB,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageLimitsValidator {
    limits: PackageLimits,
}

impl PackageLimitsValidator {
    pub fn new(limits: PackageLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PackageLimits {
        &self.limits
    }
}

#[derive(Debug, Default)]
struct Usage {
    files: usize,
    bytes: u64,
}

impl Usage {
    fn add(&mut self, size: Option<u64>) {
        self.files += 1;
        self.bytes += size.unwrap_or(0);
    }
}

fn in_custom_dir(path: &str) -> bool {
    path.strip_prefix(CUSTOM_DIR)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn check(scope: &str, usage: &Usage, max_files: usize, max_bytes: u64, reporter: &mut Reporter<'_>) {
    if usage.files > max_files {
        reporter.error(format!(
            "{} contains {} files, at most {} are allowed",
            scope, usage.files, max_files
        ));
    }
    if usage.bytes > max_bytes {
        reporter.error(format!(
            "{} is {} bytes, at most {} bytes are allowed",
            scope, usage.bytes, max_bytes
        ));
    }
}

#[async_trait]
impl Validator for PackageLimitsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Package
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let mut total = Usage::default();
        let mut custom = Usage::default();
        for path in ctx.files.iter() {
            let size = match ctx.source.size(path).await {
                Ok(size) => Some(size),
                Err(e) => {
                    reporter.error(format!("file \"{}\": {}", path, e));
                    None
                }
            };
            total.add(size);
            if in_custom_dir(path) {
                custom.add(size);
            }
        }
        debug!(
            files = total.files,
            bytes = total.bytes,
            custom_files = custom.files,
            custom_bytes = custom.bytes,
            "package usage"
        );

        let limits = &self.limits;
        check("package", &total, limits.max_files, limits.max_bytes, reporter);
        check(
            "directory \"custom/\"",
            &custom,
            limits.custom_max_files,
            limits.custom_max_bytes,
            reporter,
        );
    }
}
