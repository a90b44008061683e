//! Persisted shape of a folder tree.

use serde::{Deserialize, Serialize};

use crate::folder_tree::Visibility;

/// One node of a persisted folder tree: either
/// `{ "folderName": ..., "children": [...] }` or `{ "itemName": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFolderNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedFolderNode>>,
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub quick_customization_visibility: Visibility,
    #[serde(default, rename = "objectName", skip_serializing)]
    legacy_object_name: Option<String>,
    #[serde(default, rename = "propertyName", skip_serializing)]
    legacy_property_name: Option<String>,
}

impl SerializedFolderNode {
    pub fn folder(name: &str, children: Vec<SerializedFolderNode>) -> Self {
        Self {
            folder_name: Some(name.to_string()),
            children: Some(children),
            ..Self::default()
        }
    }

    pub fn item(name: &str) -> Self {
        Self {
            item_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn is_folder(&self) -> bool {
        self.folder_name.is_some()
    }

    /// Name of the element a leaf refers to.
    pub fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref().or_else(|| self.legacy_item_name())
    }

    /// Compatibility with project files written before leaves were stored
    /// under `itemName`. Delete together with the two legacy fields.
    fn legacy_item_name(&self) -> Option<&str> {
        self.legacy_object_name
            .as_deref()
            .or(self.legacy_property_name.as_deref())
    }
}
