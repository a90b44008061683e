//! Name resolution across nested declaration containers.
//!
//! A [`ScopeChain`] borrows an ordered list of layers, from the most global
//! (project or extension variables) to the most local (function parameters
//! and anything pushed afterwards). Lookups scan from the most local layer
//! outwards, so inner declarations shadow outer ones.
//!
//! Chains never own their layers: the borrow checker keeps every layer alive
//! for as long as the chain. Extending a chain produces a new chain and
//! leaves the original untouched.

mod layer;

pub use layer::{Declaration, DeclarationKind, ScopeLayer};

use crate::entity::{EventsBasedBehavior, EventsBasedObject};
use crate::extension::EventsFunctionsExtension;
use crate::function::EventsFunction;
use crate::variables::Variable;

/// An ordered, borrowed list of layers searched innermost-first.
pub struct ScopeChain<'a, T: ?Sized> {
    layers: Vec<&'a dyn ScopeLayer<T>>,
    first_local_index: usize,
}

/// Chain over variable containers only.
pub type VariablesScopeChain<'a> = ScopeChain<'a, Variable>;

/// Chain mixing variables, properties and parameters.
pub type PropertiesScopeChain<'a> = ScopeChain<'a, dyn Declaration>;

impl<'a, T: ?Sized> Clone for ScopeChain<'a, T> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            first_local_index: self.first_local_index,
        }
    }
}

impl<'a, T: ?Sized> std::fmt::Debug for ScopeChain<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeChain")
            .field("layers", &self.layers.len())
            .field("first_local_index", &self.first_local_index)
            .finish()
    }
}

fn layer_address<T: ?Sized>(layer: &dyn ScopeLayer<T>) -> *const () {
    layer as *const _ as *const ()
}

impl<'a, T: ?Sized> ScopeChain<'a, T> {
    /// Builds a chain from layers listed global first. Layers pushed later
    /// with [`ScopeChain::with_layer`] count as local.
    fn from_recipe(layers: Vec<&'a dyn ScopeLayer<T>>) -> Self {
        let first_local_index = layers.len();
        Self {
            layers,
            first_local_index,
        }
    }

    /// `[project]`
    pub fn project_only(project: &'a dyn ScopeLayer<T>) -> Self {
        Self::from_recipe(vec![project])
    }

    /// `[project, scene]`
    pub fn project_and_scene(project: &'a dyn ScopeLayer<T>, scene: &'a dyn ScopeLayer<T>) -> Self {
        Self::from_recipe(vec![project, scene])
    }

    /// `[globals, scene, parameters]`
    pub fn for_free_function(
        globals: &'a dyn ScopeLayer<T>,
        scene: &'a dyn ScopeLayer<T>,
        parameters: &'a dyn ScopeLayer<T>,
    ) -> Self {
        Self::from_recipe(vec![globals, scene, parameters])
    }

    /// `[globals, scene, shared properties, instance properties, parameters]`
    pub fn for_behavior_function(
        globals: &'a dyn ScopeLayer<T>,
        scene: &'a dyn ScopeLayer<T>,
        shared_properties: &'a dyn ScopeLayer<T>,
        properties: &'a dyn ScopeLayer<T>,
        parameters: &'a dyn ScopeLayer<T>,
    ) -> Self {
        Self::from_recipe(vec![globals, scene, shared_properties, properties, parameters])
    }

    /// `[globals, scene, instance properties, parameters]`
    pub fn for_object_function(
        globals: &'a dyn ScopeLayer<T>,
        scene: &'a dyn ScopeLayer<T>,
        properties: &'a dyn ScopeLayer<T>,
        parameters: &'a dyn ScopeLayer<T>,
    ) -> Self {
        Self::from_recipe(vec![globals, scene, properties, parameters])
    }

    /// A new chain with `layer` pushed on top of this one.
    pub fn with_layer(&self, layer: &'a dyn ScopeLayer<T>) -> Self {
        let mut layers = self.layers.clone();
        layers.push(layer);
        Self {
            layers,
            first_local_index: self.first_local_index,
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.layers.iter().rev().any(|layer| layer.declares(name))
    }

    /// The innermost declaration of `name`.
    pub fn get(&self, name: &str) -> Option<&'a T> {
        self.layers.iter().rev().find_map(|&layer| layer.lookup(name))
    }

    /// The innermost layer declaring `name`.
    pub fn layer_containing(&self, name: &str) -> Option<&'a dyn ScopeLayer<T>> {
        self.layers
            .iter()
            .rev()
            .copied()
            .find(|layer| layer.declares(name))
    }

    /// Position, counted from the most global layer, of the innermost layer
    /// declaring `name`.
    pub fn position_of_layer_containing(&self, name: &str) -> Option<usize> {
        self.layers.iter().rposition(|layer| layer.declares(name))
    }

    pub fn layer_at(&self, index: usize) -> Option<&'a dyn ScopeLayer<T>> {
        self.layers.get(index).copied()
    }

    /// The most local layer.
    pub fn bottom_layer(&self) -> Option<&'a dyn ScopeLayer<T>> {
        self.layers.last().copied()
    }

    /// Whether this very layer instance is part of the chain. Two distinct
    /// containers with equal contents are different layers.
    pub fn contains_layer(&self, layer: &dyn ScopeLayer<T>) -> bool {
        let address = layer_address(layer);
        self.layers
            .iter()
            .any(|&candidate| std::ptr::eq(layer_address(candidate), address))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the first layer pushed on top of the construction recipe.
    pub fn first_local_index(&self) -> usize {
        self.first_local_index
    }

    pub fn local_layers(&self) -> &[&'a dyn ScopeLayer<T>] {
        &self.layers[self.first_local_index..]
    }
}

/// Declarations visible inside a free function of `extension`.
pub fn free_function_scope<'a>(
    extension: &'a EventsFunctionsExtension,
    function: &'a EventsFunction,
) -> PropertiesScopeChain<'a> {
    PropertiesScopeChain::for_free_function(
        &extension.global_variables,
        &extension.scene_variables,
        &function.parameters,
    )
}

/// Declarations visible inside a function of `behavior`.
pub fn behavior_function_scope<'a>(
    extension: &'a EventsFunctionsExtension,
    behavior: &'a EventsBasedBehavior,
    function: &'a EventsFunction,
) -> PropertiesScopeChain<'a> {
    PropertiesScopeChain::for_behavior_function(
        &extension.global_variables,
        &extension.scene_variables,
        &behavior.shared_properties,
        &behavior.entity.properties,
        &function.parameters,
    )
}

/// Declarations visible inside a function of `object`.
pub fn object_function_scope<'a>(
    extension: &'a EventsFunctionsExtension,
    object: &'a EventsBasedObject,
    function: &'a EventsFunction,
) -> PropertiesScopeChain<'a> {
    PropertiesScopeChain::for_object_function(
        &extension.global_variables,
        &extension.scene_variables,
        &object.entity.properties,
        &function.parameters,
    )
}
