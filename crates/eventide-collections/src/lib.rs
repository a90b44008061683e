//! Generic containers for the Eventide project model.
//!
//! - [`NamedElementList`]: an ordered list of owned, named elements with
//!   stable [`ElementId`] handles.
//! - [`FolderTree`]: a folder/leaf tree overlaid on a `NamedElementList`,
//!   stored as an arena addressed by [`NodeId`] handles.
//! - [`SerializedFolderNode`]: the persisted shape of a folder tree.
//!
//! Nothing here fails loudly on bad data. Lookups return `Option`, illegal
//! tree mutations are rejected as no-ops, and unresolvable persisted entries
//! are dropped with a `log` warning.

mod folder_tree;
mod named_list;
mod serialized;
mod unique_name;

pub use folder_tree::{FolderTree, NodeId, Visibility, ROOT_FOLDER_NAME};
pub use named_list::{ElementId, Named, NamedElementList};
pub use serialized::SerializedFolderNode;
pub use unique_name::unique_name;
