//! Behaviors and custom objects declared with events.
//!
//! Both are assembled from the same parts: identity fields, a container of
//! events functions and a bag of instance properties. A behavior adds a bag
//! of properties shared by all its instances in a scene; an object adds the
//! child objects it is made of.

use eventide_collections::{Named, NamedElementList, SerializedFolderNode};
use serde::{Deserialize, Serialize};

use crate::function::{EventsFunction, EventsFunctionsContainer, FunctionsOwner};
use crate::objects::ObjectsContainer;
use crate::property::{NamedProperty, PropertyBag};

/// Fields common to behaviors and custom objects.
#[derive(Debug, Clone, Default)]
pub struct EventsBasedEntity {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub private: bool,
    pub functions: EventsFunctionsContainer,
    pub properties: PropertyBag,
}

impl EventsBasedEntity {
    fn new(name: &str, owner: FunctionsOwner) -> Self {
        Self {
            name: name.to_string(),
            functions: EventsFunctionsContainer::new(owner),
            ..Self::default()
        }
    }
}

/// Which kind of entity an [`EventsFunctionsEntity`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Behavior,
    Object,
}

/// Shared access to behaviors and custom objects.
pub trait EventsFunctionsEntity {
    fn entity(&self) -> &EventsBasedEntity;

    fn entity_mut(&mut self) -> &mut EventsBasedEntity;

    fn kind(&self) -> EntityKind;

    fn functions(&self) -> &EventsFunctionsContainer {
        &self.entity().functions
    }

    fn properties(&self) -> &PropertyBag {
        &self.entity().properties
    }

    /// Fully qualified type, `Extension::Entity`.
    fn full_type(&self, extension_name: &str) -> String {
        format!("{}::{}", extension_name, self.entity().name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsBasedBehaviorData {
    name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    object_type: String,
    #[serde(default)]
    events_functions: NamedElementList<EventsFunction>,
    #[serde(default)]
    property_descriptors: NamedElementList<NamedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties_folder_structure: Option<SerializedFolderNode>,
    #[serde(default)]
    shared_property_descriptors: NamedElementList<NamedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shared_properties_folder_structure: Option<SerializedFolderNode>,
}

/// A behavior declared with events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "EventsBasedBehaviorData", into = "EventsBasedBehaviorData")]
pub struct EventsBasedBehavior {
    pub entity: EventsBasedEntity,
    /// Type of the objects this behavior can be attached to; empty for any.
    pub object_type: String,
    pub shared_properties: PropertyBag,
}

impl EventsBasedBehavior {
    pub fn new(name: &str) -> Self {
        Self {
            entity: EventsBasedEntity::new(name, FunctionsOwner::Behavior),
            object_type: String::new(),
            shared_properties: PropertyBag::new(),
        }
    }

    pub fn shared_properties(&self) -> &PropertyBag {
        &self.shared_properties
    }
}

impl EventsFunctionsEntity for EventsBasedBehavior {
    fn entity(&self) -> &EventsBasedEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut EventsBasedEntity {
        &mut self.entity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Behavior
    }
}

impl Named for EventsBasedBehavior {
    fn name(&self) -> &str {
        &self.entity.name
    }

    fn set_name(&mut self, name: String) {
        self.entity.name = name;
    }
}

impl From<EventsBasedBehaviorData> for EventsBasedBehavior {
    fn from(data: EventsBasedBehaviorData) -> Self {
        Self {
            entity: EventsBasedEntity {
                name: data.name,
                full_name: data.full_name,
                description: data.description,
                private: data.private,
                functions: EventsFunctionsContainer::from_list(FunctionsOwner::Behavior, data.events_functions),
                properties: PropertyBag::from_parts(
                    data.property_descriptors,
                    data.properties_folder_structure.as_ref(),
                ),
            },
            object_type: data.object_type,
            shared_properties: PropertyBag::from_parts(
                data.shared_property_descriptors,
                data.shared_properties_folder_structure.as_ref(),
            ),
        }
    }
}

impl From<EventsBasedBehavior> for EventsBasedBehaviorData {
    fn from(behavior: EventsBasedBehavior) -> Self {
        let entity = behavior.entity;
        Self {
            properties_folder_structure: Some(entity.properties.folder_structure()),
            shared_properties_folder_structure: Some(behavior.shared_properties.folder_structure()),
            name: entity.name,
            full_name: entity.full_name,
            description: entity.description,
            private: entity.private,
            object_type: behavior.object_type,
            events_functions: entity.functions.as_list().clone(),
            property_descriptors: entity.properties.properties().clone(),
            shared_property_descriptors: behavior.shared_properties.properties().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsBasedObjectData {
    name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    default_name: String,
    #[serde(default, rename = "isRenderedIn3D")]
    is_rendered_in_3d: bool,
    #[serde(default)]
    events_functions: NamedElementList<EventsFunction>,
    #[serde(default)]
    property_descriptors: NamedElementList<NamedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties_folder_structure: Option<SerializedFolderNode>,
    #[serde(flatten)]
    objects: ObjectsContainer,
}

/// A custom object declared with events and made of child objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "EventsBasedObjectData", into = "EventsBasedObjectData")]
pub struct EventsBasedObject {
    pub entity: EventsBasedEntity,
    /// Name suggested for new instances of this object.
    pub default_name: String,
    pub is_rendered_in_3d: bool,
    pub objects: ObjectsContainer,
}

impl EventsBasedObject {
    pub fn new(name: &str) -> Self {
        Self {
            entity: EventsBasedEntity::new(name, FunctionsOwner::Object),
            default_name: String::new(),
            is_rendered_in_3d: false,
            objects: ObjectsContainer::new(),
        }
    }
}

impl EventsFunctionsEntity for EventsBasedObject {
    fn entity(&self) -> &EventsBasedEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut EventsBasedEntity {
        &mut self.entity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Object
    }
}

impl Named for EventsBasedObject {
    fn name(&self) -> &str {
        &self.entity.name
    }

    fn set_name(&mut self, name: String) {
        self.entity.name = name;
    }
}

impl From<EventsBasedObjectData> for EventsBasedObject {
    fn from(data: EventsBasedObjectData) -> Self {
        Self {
            entity: EventsBasedEntity {
                name: data.name,
                full_name: data.full_name,
                description: data.description,
                private: data.private,
                functions: EventsFunctionsContainer::from_list(FunctionsOwner::Object, data.events_functions),
                properties: PropertyBag::from_parts(
                    data.property_descriptors,
                    data.properties_folder_structure.as_ref(),
                ),
            },
            default_name: data.default_name,
            is_rendered_in_3d: data.is_rendered_in_3d,
            objects: data.objects,
        }
    }
}

impl From<EventsBasedObject> for EventsBasedObjectData {
    fn from(object: EventsBasedObject) -> Self {
        let entity = object.entity;
        Self {
            properties_folder_structure: Some(entity.properties.folder_structure()),
            name: entity.name,
            full_name: entity.full_name,
            description: entity.description,
            private: entity.private,
            default_name: object.default_name,
            is_rendered_in_3d: object.is_rendered_in_3d,
            events_functions: entity.functions.as_list().clone(),
            property_descriptors: entity.properties.properties().clone(),
            objects: object.objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionType;

    #[test]
    fn behavior_round_trip_keeps_folders_and_groups() {
        let mut behavior = EventsBasedBehavior::new("Platformer");
        behavior.object_type = "Sprite".to_string();
        behavior
            .entity
            .functions
            .push(EventsFunction::new("doStepPreEvents", FunctionType::Action));
        let properties = &mut behavior.entity.properties;
        properties.insert(NamedProperty::new("Speed", "Number", "200"), usize::MAX);
        let root = properties.root_folder();
        let movement = properties.insert_new_folder(root, "Movement", 0).unwrap();
        let speed = properties.node_of("Speed").unwrap();
        properties.move_node_to_another_folder(speed, movement, 0);
        behavior
            .shared_properties
            .insert(NamedProperty::new("Gravity", "Number", "1000"), 0);

        let json = serde_json::to_string(&behavior).unwrap();
        let back: EventsBasedBehavior = serde_json::from_str(&json).unwrap();

        assert_eq!(back.object_type, "Sprite");
        assert_eq!(back.kind(), EntityKind::Behavior);
        assert!(back.functions().has("doStepPreEvents"));
        assert_eq!(back.functions().owner(), FunctionsOwner::Behavior);
        assert_eq!(back.properties().get("Speed").unwrap().group, "Movement");
        let speed = back.properties().node_of("Speed").unwrap();
        assert_eq!(back.properties().group_of(speed), "Movement");
        assert!(back.shared_properties().has("Gravity"));
        assert_eq!(back.full_type("Ext"), "Ext::Platformer");
    }

    #[test]
    fn object_reads_flattened_children() {
        let json = r#"{
            "name": "Button",
            "defaultName": "Button",
            "isRenderedIn3D": false,
            "objects": [{"name": "Label", "type": "TextObject::Text"}],
            "propertyDescriptors": [{"name": "Text", "type": "String", "value": "OK"}]
        }"#;
        let object: EventsBasedObject = serde_json::from_str(json).unwrap();
        assert!(object.objects.has("Label"));
        assert_eq!(object.properties().get("Text").unwrap().value, "OK");
        assert_eq!(object.functions().owner(), FunctionsOwner::Object);

        let written = serde_json::to_value(&object).unwrap();
        assert_eq!(written["objects"][0]["name"], "Label");
        assert_eq!(written["propertiesFolderStructure"]["children"][0]["itemName"], "Text");
    }
}
