use std::path::{Path, PathBuf};

use eventide_model::Project;

use crate::error::{convert_io_error, CliError};

pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| convert_io_error(e, path.to_path_buf()))
}

/// Loads a project, logging what was read.
pub fn load_project(path: &Path) -> Result<Project, CliError> {
    log::info!("Loading project {}", path.display());
    Ok(Project::load(path)?)
}

/// The working directory, used as the start of the configuration lookup.
pub fn current_dir() -> Result<PathBuf, CliError> {
    std::env::current_dir().map_err(|e| convert_io_error(e, PathBuf::from(".")))
}
