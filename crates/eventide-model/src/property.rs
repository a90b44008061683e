//! Named properties and the property bags of behaviors and objects.

use eventide_collections::{
    ElementId, FolderTree, Named, NamedElementList, NodeId, SerializedFolderNode, Visibility,
};
use serde::{Deserialize, Serialize};

use crate::value_types::TypeClassifier;

/// A named, typed and described value declared by a behavior or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedProperty {
    pub name: String,
    /// Property type token: `Number`, `String`, `Boolean`, `Choice`, `Color`,
    /// `Resource`, `Behavior`, ...
    #[serde(rename = "type", default = "default_property_type")]
    pub property_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Name of the top-level folder holding this property. Kept in sync by
    /// [`PropertyBag`]; do not set it directly on a property that lives in one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_information: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub advanced: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub quick_customization_visibility: Visibility,
}

fn default_property_type() -> String {
    "String".to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Default for NamedProperty {
    fn default() -> Self {
        Self {
            name: String::new(),
            property_type: default_property_type(),
            value: String::new(),
            label: String::new(),
            description: String::new(),
            group: String::new(),
            extra_information: Vec::new(),
            hidden: false,
            advanced: false,
            deprecated: false,
            measurement_unit: None,
            quick_customization_visibility: Visibility::Default,
        }
    }
}

impl NamedProperty {
    pub fn new(name: &str, property_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            property_type: property_type.to_string(),
            value: value.to_string(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    pub fn with_extra_information(mut self, extra: &[&str]) -> Self {
        self.extra_information = extra.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Label shown to users, falling back to the name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Value type token this property is exposed as in expressions.
    pub fn value_type(&self) -> &'static str {
        TypeClassifier::value_type_of_property_type(&self.property_type)
    }
}

impl Named for NamedProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A list of properties with its own folder organization.
///
/// Every property has exactly one leaf in the folder tree, and its `group`
/// names the top-level folder holding that leaf (empty at the root). The
/// group is re-derived whenever a top-level folder is renamed or a node is
/// moved between folders.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    properties: NamedElementList<NamedProperty>,
    folders: FolderTree<NamedProperty>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a bag from its persisted parts.
    ///
    /// Folder entries that cannot be resolved are dropped (with a warning),
    /// properties missing from the folder structure are placed by
    /// [`add_missing_properties_in_root_folder`](Self::add_missing_properties_in_root_folder),
    /// then every group is re-derived from the resulting tree.
    ///
    /// The tree wins over stored groups: a property whose leaf sits directly
    /// under the root gets an empty group even if one was saved with it. The
    /// saved group only matters for properties missing from the tree.
    pub fn from_parts(
        properties: NamedElementList<NamedProperty>,
        folder_structure: Option<&SerializedFolderNode>,
    ) -> Self {
        let folders = match folder_structure {
            Some(structure) => FolderTree::unserialize_from(structure, &properties),
            None => FolderTree::new(),
        };
        let mut bag = Self { properties, folders };
        bag.add_missing_properties_in_root_folder();
        bag.sync_groups();
        bag
    }

    pub fn properties(&self) -> &NamedElementList<NamedProperty> {
        &self.properties
    }

    pub fn folders(&self) -> &FolderTree<NamedProperty> {
        &self.folders
    }

    /// Persisted shape of the folder tree.
    pub fn folder_structure(&self) -> SerializedFolderNode {
        self.folders.serialize(&self.properties)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedProperty> + '_ {
        self.properties.iter()
    }

    pub fn has(&self, name: &str) -> bool {
        self.properties.has(name)
    }

    pub fn get(&self, name: &str) -> Option<&NamedProperty> {
        self.properties.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NamedProperty> {
        self.properties.get_mut(name)
    }

    pub fn get_at(&self, index: usize) -> Option<&NamedProperty> {
        self.properties.get_at(index)
    }

    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.properties.position_of_name(name)
    }

    /// Inserts `property` in the list at `position` and appends its leaf to
    /// the root folder. Names are not checked for uniqueness.
    pub fn insert(&mut self, property: NamedProperty, position: usize) -> ElementId {
        let id = self.properties.insert(property, position);
        let root = self.folders.root();
        self.folders.insert_item(root, id, usize::MAX);
        id
    }

    pub fn insert_new(&mut self, name: &str, position: usize) -> ElementId {
        self.insert(
            NamedProperty {
                name: name.to_string(),
                ..NamedProperty::default()
            },
            position,
        )
    }

    /// Removes a property together with its leaf.
    pub fn remove(&mut self, name: &str) -> Option<NamedProperty> {
        let id = self.properties.id_of(name)?;
        self.folders.remove_recursively_item(id);
        self.properties.remove_by_id(id)
    }

    /// Renames a property, refusing names already in use.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name != new_name && self.properties.has(new_name) {
            return false;
        }
        self.properties.rename(old_name, new_name)
    }

    pub fn move_property(&mut self, old_index: usize, new_index: usize) -> bool {
        self.properties.move_element(old_index, new_index)
    }

    pub fn root_folder(&self) -> NodeId {
        self.folders.root()
    }

    /// Leaf of the property named `name`.
    pub fn node_of(&self, name: &str) -> Option<NodeId> {
        let id = self.properties.id_of(name)?;
        self.folders.node_of_item(id)
    }

    /// The property a leaf refers to.
    pub fn property_of(&self, node: NodeId) -> Option<&NamedProperty> {
        self.folders
            .item_of(node)
            .and_then(|id| self.properties.get_by_id(id))
    }

    pub fn insert_new_folder(&mut self, parent: NodeId, name: &str, position: usize) -> Option<NodeId> {
        self.folders.insert_new_folder(parent, name, position)
    }

    pub fn get_or_create_child_folder(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.folders.get_or_create_child_folder(parent, name)
    }

    pub fn remove_folder_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.folders.remove_folder_child(parent, child)
    }

    pub fn move_child(&mut self, folder: NodeId, old_index: usize, new_index: usize) -> bool {
        self.folders.move_child(folder, old_index, new_index)
    }

    /// Renames a folder. When the folder is a top-level one, every property
    /// below it, at any depth, gets the new name as its group.
    pub fn set_folder_name(&mut self, folder: NodeId, name: &str) -> bool {
        if !self.folders.set_folder_name(folder, name) {
            return false;
        }
        if self.folders.parent(folder) == Some(self.folders.root()) {
            for id in self.folders.items_below(folder) {
                if let Some(property) = self.properties.get_by_id_mut(id) {
                    property.group = name.to_string();
                }
            }
        }
        true
    }

    /// Moves a leaf or a folder, then re-derives the group of every property
    /// that moved.
    pub fn move_node_to_another_folder(&mut self, node: NodeId, new_parent: NodeId, position: usize) -> bool {
        if !self.folders.move_node_to_another_folder(node, new_parent, position) {
            return false;
        }
        for id in self.folders.items_below(node) {
            self.sync_group_of(id);
        }
        true
    }

    /// Group a node would give to a property: the name of its top-level
    /// folder, or an empty string at the root.
    pub fn group_of(&self, node: NodeId) -> String {
        self.folders
            .top_level_folder_of(node)
            .and_then(|folder| self.folders.folder_name(folder))
            .unwrap_or_default()
            .to_string()
    }

    fn sync_group_of(&mut self, id: ElementId) {
        let Some(leaf) = self.folders.node_of_item(id) else {
            return;
        };
        let group = self.group_of(leaf);
        if let Some(property) = self.properties.get_by_id_mut(id) {
            property.group = group;
        }
    }

    fn sync_groups(&mut self) {
        let ids: Vec<ElementId> = self.properties.ids().collect();
        for id in ids {
            self.sync_group_of(id);
        }
    }

    /// Gives every property without a leaf a place in the tree: in a top-level
    /// folder named after its group when it has one (created if needed),
    /// otherwise at the end of the root folder.
    pub fn add_missing_properties_in_root_folder(&mut self) -> usize {
        let root = self.folders.root();
        let missing: Vec<(ElementId, String)> = self
            .properties
            .iter_with_ids()
            .filter(|(id, _)| self.folders.node_of_item(*id).is_none())
            .map(|(id, property)| (id, property.group.clone()))
            .collect();
        for (id, group) in &missing {
            let folder = if group.is_empty() {
                root
            } else {
                self.folders.get_or_create_child_folder(root, group).unwrap_or(root)
            };
            self.folders.insert_item(folder, *id, usize::MAX);
        }
        missing.len()
    }
}
