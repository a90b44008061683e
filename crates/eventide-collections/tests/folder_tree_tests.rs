use eventide_collections::{
    ElementId, FolderTree, Named, NamedElementList, SerializedFolderNode, Visibility,
};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct Object {
    name: String,
}

impl Named for Object {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

fn objects(names: &[&str]) -> NamedElementList<Object> {
    names
        .iter()
        .map(|name| Object { name: name.to_string() })
        .collect()
}

fn id(list: &NamedElementList<Object>, name: &str) -> ElementId {
    list.id_of(name).unwrap()
}

/// Root
/// ├── Enemies/
/// │   ├── Bat
/// │   └── Bosses/
/// │       └── Dragon
/// ├── Player
/// └── Empty/
fn sample() -> (NamedElementList<Object>, FolderTree<Object>) {
    let list = objects(&["Player", "Bat", "Dragon"]);
    let mut tree = FolderTree::new();
    let root = tree.root();
    let enemies = tree.insert_new_folder(root, "Enemies", usize::MAX).unwrap();
    tree.insert_item(enemies, id(&list, "Bat"), usize::MAX).unwrap();
    let bosses = tree.insert_new_folder(enemies, "Bosses", usize::MAX).unwrap();
    tree.insert_item(bosses, id(&list, "Dragon"), usize::MAX).unwrap();
    tree.insert_item(root, id(&list, "Player"), usize::MAX).unwrap();
    tree.insert_new_folder(root, "Empty", usize::MAX).unwrap();
    (list, tree)
}

#[test]
fn finds_items_depth_first() {
    let (list, tree) = sample();
    let root = tree.root();
    assert!(tree.has_item_named(root, &list, "Dragon"));
    assert!(!tree.has_item_named(root, &list, "Ghost"));

    let dragon = tree.find_item_named(root, &list, "Dragon").unwrap();
    let bosses = tree.parent(dragon).unwrap();
    assert_eq!(tree.folder_name(bosses), Some("Bosses"));
    assert_eq!(tree.item_of(dragon), Some(id(&list, "Dragon")));

    let enemies = tree.child_at(root, 0).unwrap();
    assert!(!tree.has_item_named(enemies, &list, "Player"));
}

#[test]
fn remove_folder_child_only_removes_empty_folders() {
    let (list, mut tree) = sample();
    let root = tree.root();
    let enemies = tree.child_at(root, 0).unwrap();
    let empty = tree.child_at(root, 2).unwrap();
    let before = tree.serialize(&list);

    assert!(tree.children_count(enemies) > 0);
    assert!(!tree.remove_folder_child(root, enemies));
    assert_eq!(tree.serialize(&list), before);

    assert_eq!(tree.children_count(empty), 0);
    assert!(tree.remove_folder_child(root, empty));
    assert!(!tree.contains_node(empty));
    assert_eq!(tree.children_count(root), 2);
}

#[test]
fn remove_folder_child_ignores_leaves_and_non_children() {
    let (list, mut tree) = sample();
    let root = tree.root();
    let player = tree.find_item_named(root, &list, "Player").unwrap();
    let enemies = tree.child_at(root, 0).unwrap();
    let bosses = tree.child_at(enemies, 1).unwrap();

    assert!(!tree.remove_folder_child(root, player));
    assert!(!tree.remove_folder_child(root, bosses));
    assert!(tree.contains_node(player));
}

#[test]
fn moving_a_folder_into_its_descendant_is_rejected() {
    let (list, mut tree) = sample();
    let root = tree.root();
    let enemies = tree.child_at(root, 0).unwrap();
    let bosses = tree.child_at(enemies, 1).unwrap();
    let before = tree.serialize(&list);

    assert!(tree.is_descendant_of(bosses, enemies));
    assert!(!tree.is_descendant_of(enemies, bosses));
    assert!(!tree.is_descendant_of(enemies, enemies));

    assert!(!tree.move_node_to_another_folder(enemies, bosses, 0));
    assert!(!tree.move_node_to_another_folder(enemies, enemies, 0));
    assert!(!tree.move_node_to_another_folder(root, enemies, 0));
    assert_eq!(tree.serialize(&list), before);
}

#[test]
fn moving_nodes_between_folders() {
    let (list, mut tree) = sample();
    let root = tree.root();
    let enemies = tree.child_at(root, 0).unwrap();
    let bosses = tree.child_at(enemies, 1).unwrap();
    let player = tree.find_item_named(root, &list, "Player").unwrap();

    assert!(tree.move_node_to_another_folder(player, bosses, 0));
    assert_eq!(tree.parent(player), Some(bosses));
    assert_eq!(tree.position_in_parent(player), Some(0));

    assert!(tree.move_node_to_another_folder(bosses, root, 0));
    assert_eq!(tree.child_at(root, 0), Some(bosses));
    assert_eq!(tree.children_count(enemies), 1);
    assert!(tree.is_descendant_of(player, bosses));
}

#[test]
fn move_child_reorders_direct_children() {
    let (list, mut tree) = sample();
    let root = tree.root();
    assert!(tree.move_child(root, 0, 2));
    let names: Vec<_> = tree
        .children(root)
        .iter()
        .map(|child| {
            tree.folder_name(*child)
                .map(str::to_string)
                .or_else(|| tree.item_of(*child).and_then(|e| list.name_of_id(e)).map(str::to_string))
                .unwrap()
        })
        .collect();
    assert_eq!(names, vec!["Player", "Empty", "Enemies"]);
    assert!(!tree.move_child(root, 0, 3));
}

#[test]
fn get_or_create_child_folder_only_looks_at_direct_children() {
    let (_list, mut tree) = sample();
    let root = tree.root();
    let enemies = tree.child_at(root, 0).unwrap();

    assert_eq!(tree.get_or_create_child_folder(root, "Enemies"), Some(enemies));
    let bosses_at_root = tree.get_or_create_child_folder(root, "Bosses").unwrap();
    assert_eq!(tree.parent(bosses_at_root), Some(root));
    assert_eq!(tree.children_count(root), 4);
}

#[test]
fn remove_recursively_item_named_prunes_nested_leaf() {
    let (list, mut tree) = sample();
    assert!(tree.remove_recursively_item_named(&list, "Dragon"));
    assert!(!tree.has_item_named(tree.root(), &list, "Dragon"));
    assert!(!tree.remove_recursively_item_named(&list, "Dragon"));
    // The folder that held it stays.
    let enemies = tree.child_at(tree.root(), 0).unwrap();
    assert_eq!(tree.children_count(enemies), 2);
}

#[test]
fn serialization_round_trip_is_isomorphic() {
    let (list, mut tree) = sample();
    let player = tree.find_item_named(tree.root(), &list, "Player").unwrap();
    tree.set_visibility(player, Visibility::Hidden);
    let enemies = tree.child_at(tree.root(), 0).unwrap();
    tree.set_visibility(enemies, Visibility::Visible);

    let serialized = tree.serialize(&list);
    let json = serde_json::to_string(&serialized).unwrap();
    let reparsed: SerializedFolderNode = serde_json::from_str(&json).unwrap();
    let reloaded = FolderTree::load(Some(&reparsed), &list);

    assert_eq!(reloaded.serialize(&list), serialized);
    assert_eq!(reloaded.all_items_in_order(), tree.all_items_in_order());
    let player = reloaded.find_item_named(reloaded.root(), &list, "Player").unwrap();
    assert_eq!(reloaded.visibility(player), Visibility::Hidden);
}

#[test]
fn persisted_shape() {
    let (list, tree) = sample();
    expect_test::expect![[r#"{"folderName":"__ROOT","children":[{"folderName":"Enemies","children":[{"itemName":"Bat"},{"folderName":"Bosses","children":[{"itemName":"Dragon"}]}]},{"itemName":"Player"},{"folderName":"Empty","children":[]}]}"#]]
        .assert_eq(&serde_json::to_string(&tree.serialize(&list)).unwrap());
}

#[test]
fn unresolved_leaves_are_dropped_and_missing_items_land_in_root() {
    let (mut list, tree) = sample();
    let serialized = tree.serialize(&list);
    list.remove("Bat");
    list.push(Object { name: "Coin".to_string() });

    let reloaded = FolderTree::load(Some(&serialized), &list);
    let root = reloaded.root();
    assert!(!reloaded.has_item_named(root, &list, "Bat"));
    assert!(reloaded.has_item_named(root, &list, "Dragon"));

    let last = reloaded.child_at(root, reloaded.children_count(root) - 1).unwrap();
    assert_eq!(reloaded.item_of(last), Some(id(&list, "Coin")));
    assert_eq!(reloaded.all_items_in_order().len(), list.len());
}

#[test]
fn duplicate_leaves_keep_the_first_entry() {
    let list = objects(&["A"]);
    let json = r#"{"folderName":"__ROOT","children":[{"itemName":"A"},{"folderName":"F","children":[{"itemName":"A"}]}]}"#;
    let serialized: SerializedFolderNode = serde_json::from_str(json).unwrap();
    let tree = FolderTree::load(Some(&serialized), &list);
    let root = tree.root();
    let a = tree.find_item_named(root, &list, "A").unwrap();
    assert_eq!(tree.parent(a), Some(root));
    let folder = tree.child_at(root, 1).unwrap();
    assert_eq!(tree.children_count(folder), 0);
}

#[test]
fn legacy_leaf_key_is_accepted_on_load() {
    let list = objects(&["Hero"]);
    let json = r#"{"folderName":"__ROOT","children":[{"folderName":"Chars","children":[{"objectName":"Hero"}]}]}"#;
    let serialized: SerializedFolderNode = serde_json::from_str(json).unwrap();
    let tree = FolderTree::load(Some(&serialized), &list);
    let hero = tree.find_item_named(tree.root(), &list, "Hero").unwrap();
    assert_eq!(tree.folder_name(tree.parent(hero).unwrap()), Some("Chars"));
}

#[test]
fn clear_leaves_an_empty_root() {
    let (list, mut tree) = sample();
    tree.clear();
    assert_eq!(tree.children_count(tree.root()), 0);
    assert!(!tree.has_item_named(tree.root(), &list, "Player"));
}
