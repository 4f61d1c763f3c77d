//! Validate command handler

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use compset_core::PackageValidator;
use tracing::{debug, info, instrument, warn, Instrument};

/// Handle the validate command
#[instrument(skip(output), fields(package = %args.package_dir.display()))]
pub async fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details(
        "validate_command",
        &format!("package: {}", args.package_dir.display()),
    );

    if !args.package_dir.is_dir() {
        warn!("package path is not a directory");
        return Err(Error::NotADirectory {
            path: args.package_dir,
        });
    }

    output.info(&format!("Validating package: {}", args.package_dir.display()))?;

    let spinner = output.spinner("Validating package...");
    let validator = PackageValidator::from_dir(&args.package_dir);
    let outcome = validator
        .validate_collect()
        .instrument(timer.span().clone())
        .await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    info!(
        valid = outcome.valid,
        errors = outcome.error_count(),
        validators = outcome.validators.len(),
        "validation finished"
    );
    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "validate command timing");

    output.outcome(&outcome, args.list_validators)?;

    if outcome.valid {
        Ok(())
    } else {
        Err(Error::InvalidPackage {
            errors: outcome.error_count(),
        })
    }
}
