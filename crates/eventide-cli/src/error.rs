use std::path::PathBuf;

use eventide_model::ModelError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors reported by the command-line tools.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(eventide::cli::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}", path.display())]
    #[diagnostic(code(eventide::cli::config_error), help("See `[project]` and `[export]` in eventide.toml"))]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error("No project file given")]
    #[diagnostic(
        code(eventide::cli::no_project),
        help("Pass the project file, or set `file` under `[project]` in eventide.toml")
    )]
    NoProject,

    #[error("Extension `{name}` is not declared in the project")]
    #[diagnostic(code(eventide::cli::extension_not_found))]
    ExtensionNotFound { name: String },

    #[error("{kind} `{name}` does not exist in extension `{extension}`")]
    #[diagnostic(code(eventide::cli::entity_not_found))]
    EntityNotFound {
        kind: &'static str,
        name: String,
        extension: String,
    },

    #[error("Saving {} does not give back the same project", path.display())]
    #[diagnostic(
        code(eventide::cli::unstable_round_trip),
        help("Run with -v to see which entries were dropped while loading")
    )]
    UnstableRoundTrip { path: PathBuf },
}

/// Convert IO errors with context
pub fn convert_io_error(error: std::io::Error, path: PathBuf) -> CliError {
    CliError::Io { path, source: error }
}
