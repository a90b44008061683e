//! `eventide.toml`: defaults for the command-line tools.
//!
//! ```toml
//! [project]
//! file = "game.json"
//!
//! [export]
//! kind = "npm"
//! used_extensions = ["Physics"]
//! ```
//!
//! Every key is optional and command-line arguments win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::io::read_file;

pub const CONFIG_FILE_NAME: &str = "eventide.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventideConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Project file, relative to the directory holding the configuration.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Default export kind for `eventide deps`.
    pub kind: Option<String>,
    /// Extensions considered used. Empty means every declared extension.
    #[serde(default)]
    pub used_extensions: Vec<String>,
}

/// A configuration together with the directory it was found in.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub root: PathBuf,
    pub config: EventideConfig,
}

impl LoadedConfig {
    pub fn project_file(&self) -> Option<PathBuf> {
        self.config.project.file.as_ref().map(|file| self.root.join(file))
    }
}

/// Searches `start` and its ancestors for `eventide.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent().map_or_else(|| start.to_path_buf(), |p| p.to_path_buf())
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn parse_config(text: &str, path: &Path) -> Result<EventideConfig, CliError> {
    toml::from_str(text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the nearest configuration above `start`, if there is one.
pub fn load_config(start: &Path) -> Result<Option<LoadedConfig>, CliError> {
    let Some(path) = find_config_file(start) else {
        log::debug!("No {} found above {}", CONFIG_FILE_NAME, start.display());
        return Ok(None);
    };
    log::debug!("Using configuration {}", path.display());
    let config = parse_config(&read_file(&path)?, &path)?;
    let root = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok(Some(LoadedConfig { root, config }))
}

/// The project file to work on: the one given on the command line, else
/// the one named by the configuration.
pub fn project_path(argument: Option<PathBuf>, config: Option<&LoadedConfig>) -> Result<PathBuf, CliError> {
    argument
        .or_else(|| config.and_then(LoadedConfig::project_file))
        .ok_or(CliError::NoProject)
}
