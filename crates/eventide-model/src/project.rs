//! Projects: scenes, global variables and the extensions they use.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use eventide_collections::{Named, NamedElementList};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::extension::EventsFunctionsExtension;
use crate::objects::ObjectsContainer;
use crate::scope::VariablesScopeChain;
use crate::variables::VariablesContainer;

/// A scene: its variables and the objects placed in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub variables: VariablesContainer,
    #[serde(flatten)]
    pub objects: ObjectsContainer,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Named for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Values given by the project to the properties of its extensions,
/// indexed by extension name then property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionPropertiesStore {
    values: IndexMap<String, IndexMap<String, String>>,
}

impl ExtensionPropertiesStore {
    pub fn get_value(&self, extension: &str, property: &str) -> Option<&str> {
        self.values
            .get(extension)
            .and_then(|properties| properties.get(property))
            .map(String::as_str)
    }

    pub fn set_value(&mut self, extension: &str, property: &str, value: &str) {
        self.values
            .entry(extension.to_string())
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    pub fn has_value(&self, extension: &str, property: &str) -> bool {
        self.get_value(extension, property).is_some()
    }

    /// Removes every value of `extension`.
    pub fn remove_extension(&mut self, extension: &str) {
        self.values.shift_remove(extension);
    }
}

/// A game project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    /// Global variables, shared by every scene.
    #[serde(default)]
    pub variables: VariablesContainer,
    #[serde(default)]
    pub scenes: NamedElementList<Scene>,
    #[serde(default, rename = "eventsFunctionsExtensions")]
    pub extensions: NamedElementList<EventsFunctionsExtension>,
    #[serde(default)]
    pub extension_properties: ExtensionPropertiesStore,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Parses a project. Folder trees are rebuilt from the loaded lists:
    /// entries that do not resolve are dropped with a warning, and elements
    /// without a placement are put at the root.
    pub fn from_json_str(text: &str) -> ModelResult<Self> {
        let project: Project = serde_json::from_str(text)?;
        debug!(
            "Loaded project {} ({} scenes, {} extensions)",
            project.name,
            project.scenes.len(),
            project.extensions.len()
        );
        Ok(project)
    }

    pub fn to_json_string(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> ModelResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: &Path) -> ModelResult<()> {
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn extension(&self, name: &str) -> Option<&EventsFunctionsExtension> {
        self.extensions.get(name)
    }

    pub fn extension_mut(&mut self, name: &str) -> Option<&mut EventsFunctionsExtension> {
        self.extensions.get_mut(name)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Names of every declared extension.
    pub fn extension_names(&self) -> BTreeSet<String> {
        self.extensions.names().map(str::to_string).collect()
    }

    /// Variables visible outside of any scene.
    pub fn variables_scope(&self) -> VariablesScopeChain<'_> {
        VariablesScopeChain::project_only(&self.variables)
    }

    /// Variables visible in the events of a scene.
    pub fn scene_scope(&self, scene: &str) -> Option<VariablesScopeChain<'_>> {
        let scene = self.scenes.get(scene)?;
        Some(VariablesScopeChain::project_and_scene(&self.variables, &scene.variables))
    }
}
