use std::path::{Path, PathBuf};

use eventide_model::{EventsFunctionsEntity, Project};

use crate::config::{project_path, LoadedConfig};
use crate::error::CliError;
use crate::io::load_project;

pub fn handle_check(project: Option<PathBuf>, config: Option<&LoadedConfig>) -> Result<(), CliError> {
    let path = project_path(project, config)?;
    let project = load_project(&path)?;

    for line in summary(&project) {
        println!("{}", line);
    }
    check_round_trip(&project, &path)?;
    println!("{} loads and saves back unchanged.", path.display());
    Ok(())
}

/// Saves the project to text, reloads that text and saves it again. Both
/// texts must match.
fn check_round_trip(project: &Project, path: &Path) -> Result<(), CliError> {
    let saved = project.to_json_string()?;
    let resaved = Project::from_json_str(&saved)?.to_json_string()?;
    if saved != resaved {
        return Err(CliError::UnstableRoundTrip {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn summary(project: &Project) -> Vec<String> {
    let mut lines = vec![format!(
        "Project `{}`: {} scenes, {} global variables, {} extensions",
        project.name,
        project.scenes.len(),
        project.variables.len(),
        project.extensions.len()
    )];
    for extension in project.extensions.iter() {
        let properties: usize = extension
            .behaviors
            .iter()
            .map(|behavior| behavior.properties().len() + behavior.shared_properties().len())
            .chain(extension.objects.iter().map(|object| object.properties().len()))
            .sum();
        lines.push(format!(
            "  {} {}: {} functions, {} behaviors, {} objects, {} properties, {} dependencies",
            extension.name,
            extension.version,
            extension.functions.len(),
            extension.behaviors.len(),
            extension.objects.len(),
            properties,
            extension.dependencies.len()
        ));
    }
    lines
}
