//! Command handlers for CLI subcommands
//!
//! Each handler writes its report through the shared [`OutputWriter`] and
//! returns an error whose exit code the caller uses.
//!
//! [`OutputWriter`]: crate::output::OutputWriter

mod completions;
mod config;
mod schemas;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use schemas::handle_schemas;
pub use validate::handle_validate;
