//! Error reporting for validation runs

use serde::Serialize;

use crate::validators::ValidatorKind;

/// Receives every error message of a validation run.
///
/// The reporter counts what it forwards so callers can decide validity
/// without inspecting the sink.
pub struct Reporter<'a> {
    sink: Box<dyn FnMut(&str) + Send + 'a>,
    errors: usize,
}

impl<'a> Reporter<'a> {
    /// Forward every message to `sink`
    pub fn new(sink: impl FnMut(&str) + Send + 'a) -> Self {
        Self {
            sink: Box::new(sink),
            errors: 0,
        }
    }

    /// Append every message to `buffer`
    pub fn collecting(buffer: &'a mut Vec<String>) -> Self {
        Self::new(move |message| buffer.push(message.to_string()))
    }

    /// Report one error
    pub fn error(&mut self, message: impl AsRef<str>) {
        self.errors += 1;
        (self.sink)(message.as_ref());
    }

    /// Number of errors reported so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl std::fmt::Debug for Reporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Serializable result of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    /// Declared definition version, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Schema family the version resolved to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Validators that ran, in order
    pub validators: Vec<ValidatorKind>,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
