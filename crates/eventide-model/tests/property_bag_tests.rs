use eventide_collections::{NamedElementList, SerializedFolderNode};
use eventide_model::{EventsBasedBehavior, NamedProperty, PropertyBag};

/// Root
/// ├── Move/
/// │   ├── Speed
/// │   └── Advanced/
/// │       └── Acceleration
/// ├── Look/
/// │   └── Tint
/// └── Name
fn bag() -> PropertyBag {
    let mut bag = PropertyBag::new();
    for (name, property_type) in [
        ("Speed", "Number"),
        ("Acceleration", "Number"),
        ("Tint", "Color"),
        ("Name", "String"),
    ] {
        bag.insert(NamedProperty::new(name, property_type, ""), usize::MAX);
    }
    let root = bag.root_folder();
    let movement = bag.insert_new_folder(root, "Move", 0).unwrap();
    let advanced = bag.insert_new_folder(movement, "Advanced", usize::MAX).unwrap();
    let look = bag.insert_new_folder(root, "Look", 1).unwrap();
    for (property, folder) in [("Speed", movement), ("Acceleration", advanced), ("Tint", look)] {
        let node = bag.node_of(property).unwrap();
        assert!(bag.move_node_to_another_folder(node, folder, 0));
    }
    bag
}

fn groups(bag: &PropertyBag) -> Vec<(String, String)> {
    bag.iter()
        .map(|property| (property.name.clone(), property.group.clone()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(name, group)| (name.to_string(), group.to_string()))
        .collect()
}

#[test]
fn renaming_a_top_level_folder_regroups_its_properties() {
    let mut bag = bag();
    assert_eq!(
        groups(&bag),
        pairs(&[("Speed", "Move"), ("Acceleration", "Move"), ("Tint", "Look"), ("Name", "")])
    );

    let movement = bag.folders().child_at(bag.root_folder(), 0).unwrap();
    assert!(bag.set_folder_name(movement, "Physics"));
    assert_eq!(
        groups(&bag),
        pairs(&[("Speed", "Physics"), ("Acceleration", "Physics"), ("Tint", "Look"), ("Name", "")])
    );
}

#[test]
fn renaming_a_nested_folder_keeps_groups() {
    let mut bag = bag();
    let acceleration = bag.node_of("Acceleration").unwrap();
    let advanced = bag.folders().parent(acceleration).unwrap();
    assert!(bag.set_folder_name(advanced, "Tuning"));
    assert_eq!(bag.get("Acceleration").unwrap().group, "Move");
}

#[test]
fn moving_a_folder_regroups_everything_below_it() {
    let mut bag = bag();
    let acceleration = bag.node_of("Acceleration").unwrap();
    let advanced = bag.folders().parent(acceleration).unwrap();
    let look = bag.folders().child_at(bag.root_folder(), 1).unwrap();

    assert!(bag.move_node_to_another_folder(advanced, look, 0));
    assert_eq!(bag.get("Acceleration").unwrap().group, "Look");
    assert_eq!(bag.get("Speed").unwrap().group, "Move");

    let name = bag.node_of("Name").unwrap();
    assert!(bag.move_node_to_another_folder(name, advanced, 0));
    assert_eq!(bag.get("Name").unwrap().group, "Look");
}

#[test]
fn loading_places_unplaced_properties_by_group() {
    let properties: NamedElementList<NamedProperty> = vec![
        NamedProperty::new("Speed", "Number", "").with_group("Move"),
        NamedProperty::new("Jump", "Number", "").with_group("Move"),
        NamedProperty::new("Label", "String", ""),
    ]
    .into();
    let structure = SerializedFolderNode::folder(
        "__ROOT",
        vec![
            SerializedFolderNode::item("Label"),
            SerializedFolderNode::item("Ghost"),
            SerializedFolderNode::folder("Move", vec![SerializedFolderNode::item("Speed")]),
        ],
    );

    let bag = PropertyBag::from_parts(properties, Some(&structure));
    let movement = bag.folders().child_at(bag.root_folder(), 1).unwrap();
    assert_eq!(bag.folders().folder_name(movement), Some("Move"));
    assert_eq!(bag.folders().children_count(movement), 2);
    assert_eq!(bag.folders().parent(bag.node_of("Jump").unwrap()), Some(movement));
    assert_eq!(bag.folders().children_count(bag.root_folder()), 2);
}

#[test]
fn stale_groups_are_rederived_from_the_tree() {
    let json = r#"{
        "name": "Mover",
        "propertyDescriptors": [{"name": "Speed", "type": "Number", "value": "1", "group": "Old"}],
        "propertiesFolderStructure": {
            "folderName": "__ROOT",
            "children": [{"folderName": "New", "children": [{"itemName": "Speed"}]}]
        }
    }"#;
    let behavior: EventsBasedBehavior = serde_json::from_str(json).unwrap();
    assert_eq!(behavior.entity.properties.get("Speed").unwrap().group, "New");
}

#[test]
fn removing_and_renaming_properties() {
    let mut bag = bag();
    assert!(!bag.rename("Speed", "Tint"));
    assert!(bag.rename("Speed", "MaxSpeed"));
    assert!(bag.node_of("MaxSpeed").is_some());

    assert!(bag.remove("MaxSpeed").is_some());
    assert!(bag.node_of("MaxSpeed").is_none());
    let movement = bag.folders().child_at(bag.root_folder(), 0).unwrap();
    assert_eq!(bag.folders().children_count(movement), 1);
    assert!(bag.remove("MaxSpeed").is_none());
}
