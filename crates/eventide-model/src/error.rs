use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Hard failures of the model layer.
///
/// Bad *content* (unknown names, unresolvable folder entries, half-configured
/// dependencies) is never reported here: lookups return `None` and loading
/// logs a warning and carries on. Only input that cannot be read at all ends
/// up as a `ModelError`.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    /// The text is not valid JSON, or does not have the shape of a project.
    #[error("Invalid project data: {0}")]
    #[diagnostic(
        code(eventide_model::invalid_json),
        help("Check that the file is a project saved by Eventide")
    )]
    Json(#[from] serde_json::Error),

    /// Reading or writing a project file failed.
    #[error("Failed to access {}", path.display())]
    #[diagnostic(code(eventide_model::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for model operations that touch serialized input.
pub type ModelResult<T> = Result<T, ModelError>;
