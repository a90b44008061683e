//! Extensions: the unit in which functions, behaviors and objects are shared.

use eventide_collections::{Named, NamedElementList};
use serde::{Deserialize, Serialize};

use crate::dependencies::DependencyDescriptor;
use crate::entity::{EventsBasedBehavior, EventsBasedObject};
use crate::function::{EventsFunction, EventsFunctionsContainer, FunctionsOwner};
use crate::variables::VariablesContainer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionData {
    name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    dependencies: Vec<DependencyDescriptor>,
    #[serde(default)]
    events_functions: NamedElementList<EventsFunction>,
    #[serde(default)]
    events_based_behaviors: NamedElementList<EventsBasedBehavior>,
    #[serde(default)]
    events_based_objects: NamedElementList<EventsBasedObject>,
    #[serde(default)]
    global_variables: VariablesContainer,
    #[serde(default)]
    scene_variables: VariablesContainer,
}

/// A set of free functions, behaviors and objects distributed together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ExtensionData", into = "ExtensionData")]
pub struct EventsFunctionsExtension {
    pub name: String,
    pub full_name: String,
    pub version: String,
    pub description: String,
    /// Third-party packages to ship with a game using this extension.
    pub dependencies: Vec<DependencyDescriptor>,
    pub functions: EventsFunctionsContainer,
    pub behaviors: NamedElementList<EventsBasedBehavior>,
    pub objects: NamedElementList<EventsBasedObject>,
    /// Variables shared by every scene of a game using this extension.
    pub global_variables: VariablesContainer,
    /// Variables instantiated once per scene.
    pub scene_variables: VariablesContainer,
}

impl EventsFunctionsExtension {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            functions: EventsFunctionsContainer::new(FunctionsOwner::Extension),
            ..Self::default()
        }
    }

    pub fn behavior(&self, name: &str) -> Option<&EventsBasedBehavior> {
        self.behaviors.get(name)
    }

    pub fn behavior_mut(&mut self, name: &str) -> Option<&mut EventsBasedBehavior> {
        self.behaviors.get_mut(name)
    }

    pub fn object(&self, name: &str) -> Option<&EventsBasedObject> {
        self.objects.get(name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut EventsBasedObject> {
        self.objects.get_mut(name)
    }

    pub fn dependency(&self, name: &str) -> Option<&DependencyDescriptor> {
        self.dependencies.iter().find(|dependency| dependency.name == name)
    }

    pub fn add_dependency(&mut self, dependency: DependencyDescriptor) -> &mut DependencyDescriptor {
        self.dependencies.push(dependency);
        let last = self.dependencies.len() - 1;
        &mut self.dependencies[last]
    }
}

impl Named for EventsFunctionsExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl From<ExtensionData> for EventsFunctionsExtension {
    fn from(data: ExtensionData) -> Self {
        Self {
            name: data.name,
            full_name: data.full_name,
            version: data.version,
            description: data.description,
            dependencies: data.dependencies,
            functions: EventsFunctionsContainer::from_list(FunctionsOwner::Extension, data.events_functions),
            behaviors: data.events_based_behaviors,
            objects: data.events_based_objects,
            global_variables: data.global_variables,
            scene_variables: data.scene_variables,
        }
    }
}

impl From<EventsFunctionsExtension> for ExtensionData {
    fn from(extension: EventsFunctionsExtension) -> Self {
        Self {
            events_functions: extension.functions.as_list().clone(),
            name: extension.name,
            full_name: extension.full_name,
            version: extension.version,
            description: extension.description,
            dependencies: extension.dependencies,
            events_based_behaviors: extension.behaviors,
            events_based_objects: extension.objects,
            global_variables: extension.global_variables,
            scene_variables: extension.scene_variables,
        }
    }
}
