//! The declarative model of an Eventide project.
//!
//! A project holds scenes and extensions. Extensions declare free functions,
//! behaviors and custom objects; behaviors and objects carry properties
//! organized in folders, and every function has parameters. This crate
//! provides those declarations together with the queries code generators
//! and refactoring tools run over them:
//!
//! - [`TypeClassifier`] maps type tokens to value categories.
//! - [`ScopeChain`] resolves a name through nested declaration containers.
//! - [`PropertyFunctionGenerator`] derives accessor functions for properties.
//! - [`resolve_exported_dependencies`] selects the third-party packages a
//!   build must ship.

pub mod dependencies;
pub mod entity;
pub mod error;
pub mod extension;
pub mod function;
pub mod objects;
pub mod parameters;
pub mod project;
pub mod property;
pub mod property_functions;
pub mod scope;
pub mod value_types;
pub mod variables;

pub use dependencies::{
    resolve_exported_dependencies, DependencyDescriptor, DependencyKind, ExportedDependency, ExtraSetting,
};
pub use entity::{EntityKind, EventsBasedBehavior, EventsBasedEntity, EventsBasedObject, EventsFunctionsEntity};
pub use error::{ModelError, ModelResult};
pub use extension::EventsFunctionsExtension;
pub use function::{EventsFunction, EventsFunctionsContainer, ExpressionType, FunctionType, FunctionsOwner};
pub use objects::{BehaviorReference, ObjectDeclaration, ObjectsContainer};
pub use parameters::{ParameterDescriptor, ParametersContainer};
pub use project::{ExtensionPropertiesStore, Project, Scene};
pub use property::{NamedProperty, PropertyBag};
pub use property_functions::PropertyFunctionGenerator;
pub use scope::{
    behavior_function_scope, free_function_scope, object_function_scope, Declaration, DeclarationKind,
    PropertiesScopeChain, ScopeChain, ScopeLayer, VariablesScopeChain,
};
pub use value_types::{ExpressionBaseType, ExpressionKind, TypeClassifier, ValueCategory};
pub use variables::{Variable, VariableValue, VariablesContainer};
