use std::path::PathBuf;

use eventide_model::{
    behavior_function_scope, free_function_scope, object_function_scope, Declaration, DeclarationKind,
    EventsFunctionsEntity, EventsFunctionsExtension, PropertiesScopeChain, Project,
};

use crate::config::{project_path, LoadedConfig};
use crate::error::CliError;
use crate::io::load_project;

/// The function whose scope a name is resolved in.
#[derive(Debug, Clone)]
pub struct FunctionTarget {
    pub extension: String,
    pub behavior: Option<String>,
    pub object: Option<String>,
    pub function: String,
}

pub fn handle_resolve(
    project: Option<PathBuf>,
    target: FunctionTarget,
    name: String,
    config: Option<&LoadedConfig>,
) -> Result<(), CliError> {
    let path = project_path(project, config)?;
    let project = load_project(&path)?;
    println!("{}", describe_resolution(&project, &target, &name)?);
    Ok(())
}

const FREE_FUNCTION_LAYERS: &[&str] = &["extension global variables", "extension scene variables", "parameters"];
const BEHAVIOR_FUNCTION_LAYERS: &[&str] = &[
    "extension global variables",
    "extension scene variables",
    "shared properties",
    "properties",
    "parameters",
];
const OBJECT_FUNCTION_LAYERS: &[&str] = &[
    "extension global variables",
    "extension scene variables",
    "properties",
    "parameters",
];

/// Builds the scope of the target function and tells where `name` comes from.
pub fn describe_resolution(project: &Project, target: &FunctionTarget, name: &str) -> Result<String, CliError> {
    let extension = project
        .extension(&target.extension)
        .ok_or_else(|| CliError::ExtensionNotFound {
            name: target.extension.clone(),
        })?;
    let (chain, layer_names) = scope_of(extension, target)?;

    let (Some(declaration), Some(position)) = (chain.get(name), chain.position_of_layer_containing(name)) else {
        return Ok(format!("{}: not declared", name));
    };
    Ok(format!(
        "{}: {} of type `{}` from {} (layer {} of {})",
        name,
        kind_label(declaration.declaration_kind()),
        declaration.declared_type(),
        layer_names.get(position).copied().unwrap_or("local variables"),
        position,
        chain.len()
    ))
}

fn scope_of<'a>(
    extension: &'a EventsFunctionsExtension,
    target: &FunctionTarget,
) -> Result<(PropertiesScopeChain<'a>, &'static [&'static str]), CliError> {
    let not_found = |kind: &'static str, name: &str| CliError::EntityNotFound {
        kind,
        name: name.to_string(),
        extension: extension.name.clone(),
    };

    match (&target.behavior, &target.object) {
        (Some(behavior_name), _) => {
            let behavior = extension
                .behavior(behavior_name)
                .ok_or_else(|| not_found("Behavior", behavior_name))?;
            let function = behavior
                .functions()
                .get(&target.function)
                .ok_or_else(|| not_found("Function", &target.function))?;
            Ok((behavior_function_scope(extension, behavior, function), BEHAVIOR_FUNCTION_LAYERS))
        }
        (None, Some(object_name)) => {
            let object = extension
                .object(object_name)
                .ok_or_else(|| not_found("Object", object_name))?;
            let function = object
                .functions()
                .get(&target.function)
                .ok_or_else(|| not_found("Function", &target.function))?;
            Ok((object_function_scope(extension, object, function), OBJECT_FUNCTION_LAYERS))
        }
        (None, None) => {
            let function = extension
                .functions
                .get(&target.function)
                .ok_or_else(|| not_found("Function", &target.function))?;
            Ok((free_function_scope(extension, function), FREE_FUNCTION_LAYERS))
        }
    }
}

fn kind_label(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Variable => "variable",
        DeclarationKind::Property => "property",
        DeclarationKind::Parameter => "parameter",
    }
}
