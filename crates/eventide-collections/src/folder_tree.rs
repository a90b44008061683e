//! Folder trees overlaying a [`NamedElementList`].
//!
//! The tree is an arena of nodes addressed by [`NodeId`] handles. Parent links
//! are handles too, and leaves hold [`ElementId`]s into the list they organize,
//! so nothing in the tree borrows from the list. Operations that need element
//! names take the list as an argument and resolve handles on demand.

use std::fmt;
use std::marker::PhantomData;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::named_list::{ElementId, Named, NamedElementList};
use crate::serialized::SerializedFolderNode;

/// Name given to the root folder of every tree.
pub const ROOT_FOLDER_NAME: &str = "__ROOT";

/// Handle to a node of a [`FolderTree`].
///
/// Handles carry a generation, so a handle to a node that has since been
/// removed never resolves to a node that later reused the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Visibility of a node in the quick customization panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Default,
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_default(&self) -> bool {
        *self == Visibility::Default
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Folder { name: String, children: Vec<NodeId> },
    Item(ElementId),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
    visibility: Visibility,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A recursive folder structure over the elements of a `NamedElementList<T>`.
///
/// Every element appears at most once in the tree. Folders never contain
/// themselves: [`move_node_to_another_folder`](Self::move_node_to_another_folder)
/// rejects moves that would create a cycle.
///
/// Illegal mutations (inserting into a leaf, moving a folder into its own
/// descendant, removing a non-empty folder) are rejected as no-ops and
/// reported through the `bool` / `Option` return value.
pub struct FolderTree<T> {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    _element: PhantomData<fn() -> T>,
}

impl<T> Clone for FolderTree<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free: self.free.clone(),
            root: self.root,
            _element: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FolderTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node<T>(
            tree: &FolderTree<T>,
            id: NodeId,
            depth: usize,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match tree.node(id).map(|node| &node.kind) {
                Some(NodeKind::Folder { name, children }) => {
                    writeln!(f, "{indent}{name}/")?;
                    for child in children {
                        write_node(tree, *child, depth + 1, f)?;
                    }
                    Ok(())
                }
                Some(NodeKind::Item(element)) => writeln!(f, "{indent}{element}"),
                None => Ok(()),
            }
        }
        write_node(self, self.root, 0, f)
    }
}

impl<T> Default for FolderTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FolderTree<T> {
    /// Creates a tree holding only an empty root folder.
    pub fn new() -> Self {
        let root_node = Node {
            parent: None,
            kind: NodeKind::Folder {
                name: ROOT_FOLDER_NAME.to_string(),
                children: Vec::new(),
            },
            visibility: Visibility::Default,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root_node),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            _element: PhantomData,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    /// Releases `id` and everything below it. The node must already be
    /// detached from its parent's children.
    fn release(&mut self, id: NodeId) {
        let children = match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Folder { children, .. }) => children.clone(),
            Some(NodeKind::Item(_)) => Vec::new(),
            None => return,
        };
        for child in children {
            self.release(child);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    fn children_mut(&mut self, folder: NodeId) -> Option<&mut Vec<NodeId>> {
        match self.node_mut(folder).map(|node| &mut node.kind) {
            Some(NodeKind::Folder { children, .. }) => Some(children),
            _ => None,
        }
    }

    /// Removes `id` from its parent's children without releasing it.
    fn detach(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let children = self.children_mut(parent)?;
        let position = children.iter().position(|child| *child == id)?;
        children.remove(position);
        Some(position)
    }

    fn attach(&mut self, id: NodeId, folder: NodeId, position: usize) {
        if let Some(children) = self.children_mut(folder) {
            if position < children.len() {
                children.insert(position, id);
            } else {
                children.push(id);
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = Some(folder);
        }
    }

    /// Whether `id` still resolves to a node of this tree.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn is_folder(&self, id: NodeId) -> bool {
        matches!(
            self.node(id).map(|node| &node.kind),
            Some(NodeKind::Folder { .. })
        )
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn folder_name(&self, id: NodeId) -> Option<&str> {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Folder { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Renames a folder. Returns `false` for leaves and stale handles.
    pub fn set_folder_name(&mut self, id: NodeId, new_name: &str) -> bool {
        match self.node_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Folder { name, .. }) => {
                *name = new_name.to_string();
                true
            }
            _ => false,
        }
    }

    /// The element a leaf refers to. `None` for folders.
    pub fn item_of(&self, id: NodeId) -> Option<ElementId> {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Item(element)) => Some(*element),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Direct children of a folder; empty for leaves and stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Folder { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn children_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    pub fn visibility(&self, id: NodeId) -> Visibility {
        self.node(id).map(|node| node.visibility).unwrap_or_default()
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) {
        if let Some(node) = self.node_mut(id) {
            node.visibility = visibility;
        }
    }

    /// Appends a leaf for `element` to `folder` (this folder only, not
    /// recursive), at `position` or at the end when past the last child.
    ///
    /// Returns `None` if `folder` is a leaf or a stale handle. The caller is
    /// responsible for not placing the same element twice.
    pub fn insert_item(&mut self, folder: NodeId, element: ElementId, position: usize) -> Option<NodeId> {
        if !self.is_folder(folder) {
            return None;
        }
        let id = self.allocate(Node {
            parent: Some(folder),
            kind: NodeKind::Item(element),
            visibility: Visibility::Default,
        });
        self.attach(id, folder, position);
        Some(id)
    }

    /// Creates an empty folder named `name` inside `folder`.
    pub fn insert_new_folder(&mut self, folder: NodeId, name: &str, position: usize) -> Option<NodeId> {
        if !self.is_folder(folder) {
            return None;
        }
        let id = self.allocate(Node {
            parent: Some(folder),
            kind: NodeKind::Folder {
                name: name.to_string(),
                children: Vec::new(),
            },
            visibility: Visibility::Default,
        });
        self.attach(id, folder, position);
        Some(id)
    }

    /// Returns the direct child folder of `folder` named `name`, creating it at
    /// the end of `folder` if there is none. Only direct children are searched.
    pub fn get_or_create_child_folder(&mut self, folder: NodeId, name: &str) -> Option<NodeId> {
        let existing = self
            .children(folder)
            .iter()
            .copied()
            .find(|child| self.folder_name(*child) == Some(name));
        match existing {
            Some(child) => Some(child),
            None => self.insert_new_folder(folder, name, usize::MAX),
        }
    }

    /// Reorders the direct children of `folder`.
    pub fn move_child(&mut self, folder: NodeId, old_index: usize, new_index: usize) -> bool {
        let Some(children) = self.children_mut(folder) else {
            return false;
        };
        if old_index >= children.len() || new_index >= children.len() {
            return false;
        }
        let child = children.remove(old_index);
        children.insert(new_index, child);
        true
    }

    /// Removes `child`, a direct sub-folder of `folder`.
    ///
    /// Only empty folders are removed: a non-empty folder, a leaf, or a node
    /// that is not a direct child of `folder` leaves the tree untouched.
    pub fn remove_folder_child(&mut self, folder: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(folder) || !self.is_folder(child) {
            return false;
        }
        if self.children_count(child) > 0 {
            return false;
        }
        self.detach(child);
        self.release(child);
        true
    }

    /// Whether `id` sits strictly below `ancestor`. A node is not its own
    /// descendant.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Moves `id` (leaf or folder, with its content) into `new_parent` at
    /// `position`.
    ///
    /// Rejected as a no-op when `id` is the root, `new_parent` is not a folder,
    /// or `new_parent` is `id` itself or one of its descendants.
    pub fn move_node_to_another_folder(&mut self, id: NodeId, new_parent: NodeId, position: usize) -> bool {
        if self.is_root(id) || !self.contains_node(id) || !self.is_folder(new_parent) {
            return false;
        }
        if new_parent == id || self.is_descendant_of(new_parent, id) {
            return false;
        }
        self.detach(id);
        self.attach(id, new_parent, position);
        true
    }

    /// Removes the leaf referring to `element`, wherever it is.
    pub fn remove_recursively_item(&mut self, element: ElementId) -> bool {
        match self.node_of_item(element) {
            Some(leaf) => {
                self.detach(leaf);
                self.release(leaf);
                true
            }
            None => false,
        }
    }

    /// Finds the leaf referring to `element` anywhere in the tree.
    pub fn node_of_item(&self, element: ElementId) -> Option<NodeId> {
        self.find_node(self.root, &|tree, id| tree.item_of(id) == Some(element))
    }

    fn find_node(&self, folder: NodeId, matches: &dyn Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        for child in self.children(folder) {
            if self.is_folder(*child) {
                if let Some(found) = self.find_node(*child, matches) {
                    return Some(found);
                }
            } else if matches(self, *child) {
                return Some(*child);
            }
        }
        None
    }

    /// The top-level folder (a direct child of the root) containing `id`, or
    /// `id` itself when it is a top-level folder. `None` for nodes placed
    /// directly under the root and for the root itself.
    pub fn top_level_folder_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let parent = self.parent(current)?;
            if parent == self.root {
                return self.is_folder(current).then_some(current);
            }
            current = parent;
        }
    }

    /// Elements referenced below `id`, depth-first in child order.
    pub fn items_below(&self, id: NodeId) -> Vec<ElementId> {
        let mut items = Vec::new();
        self.collect_items(id, &mut items);
        items
    }

    fn collect_items(&self, id: NodeId, items: &mut Vec<ElementId>) {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Item(element)) => items.push(*element),
            Some(NodeKind::Folder { children, .. }) => {
                for child in children {
                    self.collect_items(*child, items);
                }
            }
            None => {}
        }
    }

    /// Every element placed in the tree, depth-first in child order.
    pub fn all_items_in_order(&self) -> Vec<ElementId> {
        self.items_below(self.root)
    }

    /// Every folder except the root, depth-first.
    pub fn all_folders(&self) -> Vec<NodeId> {
        let mut folders = Vec::new();
        let mut stack = vec![self.root];
        while let Some(folder) = stack.pop() {
            if folder != self.root {
                folders.push(folder);
            }
            for child in self.children(folder).iter().rev() {
                if self.is_folder(*child) {
                    stack.push(*child);
                }
            }
        }
        folders
    }

    /// Drops every node, leaving an empty root. Handles to the dropped nodes
    /// stop resolving.
    pub fn clear(&mut self) {
        self.set_visibility(self.root, Visibility::Default);
        let children = match self.children_mut(self.root) {
            Some(children) => std::mem::take(children),
            None => return,
        };
        for child in children {
            self.release(child);
        }
    }

    /// Places every element of `list` that has no leaf yet at the end of the
    /// root folder. Returns how many were added.
    pub fn add_missing_items_in_root(&mut self, list: &NamedElementList<T>) -> usize {
        let placed: FxHashSet<ElementId> = self.all_items_in_order().into_iter().collect();
        let missing: Vec<ElementId> = list.ids().filter(|id| !placed.contains(id)).collect();
        for element in &missing {
            self.insert_item(self.root, *element, usize::MAX);
        }
        missing.len()
    }

    /// Drops leaves whose element is no longer stored in `list`.
    pub fn remove_items_missing_from(&mut self, list: &NamedElementList<T>) -> usize {
        let stale: Vec<ElementId> = self
            .all_items_in_order()
            .into_iter()
            .filter(|element| !list.contains_id(*element))
            .collect();
        for element in &stale {
            self.remove_recursively_item(*element);
        }
        stale.len()
    }
}

impl<T: Named> FolderTree<T> {
    /// Whether a leaf for an element named `name` exists below `folder`.
    pub fn has_item_named(&self, folder: NodeId, list: &NamedElementList<T>, name: &str) -> bool {
        self.find_item_named(folder, list, name).is_some()
    }

    /// First leaf below `folder`, depth-first in child order, whose element is
    /// named `name`.
    pub fn find_item_named(&self, folder: NodeId, list: &NamedElementList<T>, name: &str) -> Option<NodeId> {
        self.find_node(folder, &|tree, id| {
            tree.item_of(id)
                .and_then(|element| list.name_of_id(element))
                .is_some_and(|item_name| item_name == name)
        })
    }

    /// Removes the first leaf, anywhere in the tree, whose element is named
    /// `name`.
    pub fn remove_recursively_item_named(&mut self, list: &NamedElementList<T>, name: &str) -> bool {
        match self.find_item_named(self.root, list, name) {
            Some(leaf) => {
                self.detach(leaf);
                self.release(leaf);
                true
            }
            None => false,
        }
    }

    /// Serialized shape of the whole tree, leaves written by element name.
    pub fn serialize(&self, list: &NamedElementList<T>) -> SerializedFolderNode {
        self.serialize_node(self.root, list)
            .unwrap_or_else(|| SerializedFolderNode::folder(ROOT_FOLDER_NAME, Vec::new()))
    }

    fn serialize_node(&self, id: NodeId, list: &NamedElementList<T>) -> Option<SerializedFolderNode> {
        let node = self.node(id)?;
        let mut serialized = match &node.kind {
            NodeKind::Folder { name, children } => {
                let children = children
                    .iter()
                    .filter_map(|child| self.serialize_node(*child, list))
                    .collect();
                SerializedFolderNode::folder(name, children)
            }
            NodeKind::Item(element) => SerializedFolderNode::item(list.name_of_id(*element)?),
        };
        serialized.quick_customization_visibility = node.visibility;
        Some(serialized)
    }

    /// Rebuilds a tree from its serialized shape, resolving leaves against
    /// `list`.
    ///
    /// Leaves whose element cannot be found, and leaves for an element that was
    /// already placed, are dropped with a warning. Elements absent from the
    /// serialized tree are *not* placed; see [`load`](Self::load).
    pub fn unserialize_from(serialized: &SerializedFolderNode, list: &NamedElementList<T>) -> Self {
        let mut tree = Self::new();
        let root = tree.root;
        tree.set_visibility(root, serialized.quick_customization_visibility);
        let mut placed = FxHashSet::default();
        match &serialized.children {
            Some(children) if serialized.is_folder() => {
                tree.unserialize_children(root, children, list, &mut placed);
            }
            _ => log::warn!("Folder structure root is not a folder; ignoring it."),
        }
        tree
    }

    fn unserialize_children(
        &mut self,
        folder: NodeId,
        children: &[SerializedFolderNode],
        list: &NamedElementList<T>,
        placed: &mut FxHashSet<ElementId>,
    ) {
        for child in children {
            let inserted = if let Some(folder_name) = &child.folder_name {
                let Some(sub_folder) = self.insert_new_folder(folder, folder_name, usize::MAX) else {
                    continue;
                };
                if let Some(grand_children) = &child.children {
                    self.unserialize_children(sub_folder, grand_children, list, placed);
                }
                sub_folder
            } else {
                let Some(item_name) = child.item_name() else {
                    log::warn!("Folder entry has neither a folder name nor an item name; dropping it.");
                    continue;
                };
                let Some(element) = list.id_of(item_name) else {
                    log::warn!("Folder entry refers to \"{item_name}\", which does not exist; dropping it.");
                    continue;
                };
                if !placed.insert(element) {
                    log::warn!("\"{item_name}\" appears more than once in the folder structure; keeping the first entry.");
                    continue;
                }
                match self.insert_item(folder, element, usize::MAX) {
                    Some(leaf) => leaf,
                    None => continue,
                }
            };
            self.set_visibility(inserted, child.quick_customization_visibility);
        }
    }

    /// [`unserialize_from`](Self::unserialize_from), then places every
    /// element missing from the loaded tree at the end of the root folder.
    pub fn load(serialized: Option<&SerializedFolderNode>, list: &NamedElementList<T>) -> Self {
        let mut tree = match serialized {
            Some(serialized) => Self::unserialize_from(serialized, list),
            None => Self::new(),
        };
        tree.add_missing_items_in_root(list);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Item(String);

    impl Named for Item {
        fn name(&self) -> &str {
            &self.0
        }

        fn set_name(&mut self, name: String) {
            self.0 = name;
        }
    }

    fn list_of(names: &[&str]) -> NamedElementList<Item> {
        names.iter().map(|name| Item(name.to_string())).collect()
    }

    #[test]
    fn stale_handles_do_not_resolve() {
        let mut tree: FolderTree<Item> = FolderTree::new();
        let root = tree.root();
        let folder = tree.insert_new_folder(root, "A", 0).unwrap();
        assert!(tree.remove_folder_child(root, folder));
        let reused = tree.insert_new_folder(root, "B", 0).unwrap();
        assert!(!tree.contains_node(folder));
        assert_eq!(tree.folder_name(folder), None);
        assert_eq!(tree.folder_name(reused), Some("B"));
    }

    #[test]
    fn handles_taken_before_clear_do_not_resolve() {
        let mut tree: FolderTree<Item> = FolderTree::new();
        let root = tree.root();
        let old = tree.insert_new_folder(root, "Old", 0).unwrap();
        tree.clear();
        let new = tree.insert_new_folder(root, "New", 0).unwrap();

        assert!(!tree.contains_node(old));
        assert_eq!(tree.folder_name(old), None);
        assert_eq!(tree.folder_name(new), Some("New"));
        assert!(tree.contains_node(root));
    }

    #[test]
    fn insert_into_leaf_is_rejected() {
        let list = list_of(&["a"]);
        let mut tree = FolderTree::load(None, &list);
        let leaf = tree.child_at(tree.root(), 0).unwrap();
        let element = list.id_of("a").unwrap();
        assert_eq!(tree.insert_item(leaf, element, 0), None);
        assert_eq!(tree.insert_new_folder(leaf, "nope", 0), None);
    }

    #[test]
    fn top_level_folder_lookup() {
        let list = list_of(&["a", "b"]);
        let mut tree: FolderTree<Item> = FolderTree::new();
        let root = tree.root();
        let top = tree.insert_new_folder(root, "Top", 0).unwrap();
        let inner = tree.insert_new_folder(top, "Inner", 0).unwrap();
        let a = tree.insert_item(inner, list.id_of("a").unwrap(), 0).unwrap();
        let b = tree.insert_item(root, list.id_of("b").unwrap(), 1).unwrap();

        assert_eq!(tree.top_level_folder_of(a), Some(top));
        assert_eq!(tree.top_level_folder_of(inner), Some(top));
        assert_eq!(tree.top_level_folder_of(top), Some(top));
        assert_eq!(tree.top_level_folder_of(b), None);
        assert_eq!(tree.top_level_folder_of(root), None);
    }

    #[test]
    fn all_folders_is_depth_first() {
        let mut tree: FolderTree<Item> = FolderTree::new();
        let root = tree.root();
        let a = tree.insert_new_folder(root, "A", usize::MAX).unwrap();
        let b = tree.insert_new_folder(root, "B", usize::MAX).unwrap();
        let a1 = tree.insert_new_folder(a, "A1", usize::MAX).unwrap();
        assert_eq!(tree.all_folders(), vec![a, a1, b]);
    }

    #[test]
    fn remove_items_missing_from_list() {
        let mut list = list_of(&["a", "b"]);
        let mut tree = FolderTree::load(None, &list);
        list.remove("a");
        assert_eq!(tree.remove_items_missing_from(&list), 1);
        assert_eq!(tree.all_items_in_order(), vec![list.id_of("b").unwrap()]);
    }
}
