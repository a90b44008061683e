use std::collections::BTreeSet;
use std::path::PathBuf;

use eventide_model::{resolve_exported_dependencies, DependencyKind, Project};

use crate::config::{project_path, LoadedConfig};
use crate::error::CliError;
use crate::io::load_project;

/// Export kind used when neither the command line nor the configuration
/// names one.
pub const DEFAULT_EXPORT_KIND: &str = "npm";

pub fn handle_deps(
    project: Option<PathBuf>,
    kind: Option<String>,
    used: Vec<String>,
    config: Option<&LoadedConfig>,
) -> Result<(), CliError> {
    let path = project_path(project, config)?;
    let project = load_project(&path)?;

    let kind = kind
        .or_else(|| config.and_then(|loaded| loaded.config.export.kind.clone()))
        .unwrap_or_else(|| DEFAULT_EXPORT_KIND.to_string());
    let used = used_extensions(&project, used, config);

    for line in dependency_lines(&project, &used, &DependencyKind::from(kind)) {
        println!("{}", line);
    }
    Ok(())
}

/// Extensions named on the command line, else in the configuration, else
/// every extension of the project.
fn used_extensions(project: &Project, used: Vec<String>, config: Option<&LoadedConfig>) -> BTreeSet<String> {
    if !used.is_empty() {
        return used.into_iter().collect();
    }
    match config {
        Some(loaded) if !loaded.config.export.used_extensions.is_empty() => {
            loaded.config.export.used_extensions.iter().cloned().collect()
        }
        _ => project.extension_names(),
    }
}

/// One tab-separated line per exported dependency: extension, name,
/// version, export name.
fn dependency_lines(project: &Project, used: &BTreeSet<String>, kind: &DependencyKind) -> Vec<String> {
    resolve_exported_dependencies(project, used, kind)
        .into_iter()
        .map(|exported| {
            let dependency = exported.dependency;
            format!(
                "{}\t{}\t{}\t{}",
                exported.extension.name, dependency.name, dependency.version, dependency.export_name
            )
        })
        .collect()
}
