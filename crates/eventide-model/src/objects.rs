//! Object declarations organized in folders.

use eventide_collections::{ElementId, FolderTree, Named, NamedElementList, NodeId, SerializedFolderNode};
use serde::{Deserialize, Serialize};

use crate::variables::VariablesContainer;

/// A behavior attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorReference {
    pub name: String,
    /// Full behavior type, `Extension::Behavior`.
    #[serde(rename = "type")]
    pub behavior_type: String,
}

/// An object declared in a scene or inside a custom object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDeclaration {
    pub name: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub variables: VariablesContainer,
    #[serde(default)]
    pub behaviors: Vec<BehaviorReference>,
    /// Type-specific configuration, kept verbatim.
    #[serde(flatten)]
    pub content: serde_json::Map<String, serde_json::Value>,
}

impl ObjectDeclaration {
    pub fn new(name: &str, object_type: &str) -> Self {
        Self {
            name: name.to_string(),
            object_type: object_type.to_string(),
            ..Self::default()
        }
    }

    pub fn behavior(&self, name: &str) -> Option<&BehaviorReference> {
        self.behaviors.iter().find(|behavior| behavior.name == name)
    }
}

impl Named for ObjectDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectsContainerData {
    #[serde(default)]
    objects: NamedElementList<ObjectDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    objects_folder_structure: Option<SerializedFolderNode>,
}

/// Objects of a scene or a custom object, with their folder organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ObjectsContainerData", into = "ObjectsContainerData")]
pub struct ObjectsContainer {
    objects: NamedElementList<ObjectDeclaration>,
    folders: FolderTree<ObjectDeclaration>,
}

impl From<ObjectsContainerData> for ObjectsContainer {
    fn from(data: ObjectsContainerData) -> Self {
        let folders = FolderTree::load(data.objects_folder_structure.as_ref(), &data.objects);
        Self {
            objects: data.objects,
            folders,
        }
    }
}

impl From<ObjectsContainer> for ObjectsContainerData {
    fn from(container: ObjectsContainer) -> Self {
        let objects_folder_structure = Some(container.folders.serialize(&container.objects));
        Self {
            objects: container.objects,
            objects_folder_structure,
        }
    }
}

impl ObjectsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &NamedElementList<ObjectDeclaration> {
        &self.objects
    }

    pub fn folders(&self) -> &FolderTree<ObjectDeclaration> {
        &self.folders
    }

    /// Structural access to the folder tree (creating, moving and removing
    /// folders). Leaves are managed by the container itself.
    pub fn folders_mut(&mut self) -> &mut FolderTree<ObjectDeclaration> {
        &mut self.folders
    }

    /// Inserts an object at `position` and appends its leaf to the root
    /// folder. Names are not checked for uniqueness.
    pub fn insert(&mut self, object: ObjectDeclaration, position: usize) -> ElementId {
        let id = self.objects.insert(object, position);
        let root = self.folders.root();
        self.folders.insert_item(root, id, usize::MAX);
        id
    }

    /// Inserts an object and places its leaf in `folder` instead of the root.
    pub fn insert_in_folder(&mut self, object: ObjectDeclaration, folder: NodeId, position: usize) -> Option<ElementId> {
        if !self.folders.is_folder(folder) {
            return None;
        }
        let id = self.objects.push(object);
        self.folders.insert_item(folder, id, position);
        Some(id)
    }

    pub fn has(&self, name: &str) -> bool {
        self.objects.has(name)
    }

    pub fn get(&self, name: &str) -> Option<&ObjectDeclaration> {
        self.objects.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ObjectDeclaration> {
        self.objects.get_mut(name)
    }

    pub fn node_of(&self, name: &str) -> Option<NodeId> {
        self.folders.find_item_named(self.folders.root(), &self.objects, name)
    }

    /// Removes the first object named `name` together with its own leaf.
    pub fn remove(&mut self, name: &str) -> Option<ObjectDeclaration> {
        let id = self.objects.id_of(name)?;
        self.folders.remove_recursively_item(id);
        self.objects.remove_by_id(id)
    }

    /// Renames an object, refusing names already in use.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name != new_name && self.objects.has(new_name) {
            return false;
        }
        self.objects.rename(old_name, new_name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectDeclaration> + '_ {
        self.objects.iter()
    }
}
