//! Containers that can take part in a [`ScopeChain`](super::ScopeChain).

use crate::parameters::{ParameterDescriptor, ParametersContainer};
use crate::property::{NamedProperty, PropertyBag};
use crate::variables::{Variable, VariablesContainer};

/// What declared a name found through a scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Property,
    Parameter,
}

/// A named declaration of any kind: variable, property or parameter.
pub trait Declaration {
    fn declared_name(&self) -> &str;

    /// Type token of the declaration, as written by its container.
    fn declared_type(&self) -> &str;

    fn declaration_kind(&self) -> DeclarationKind;
}

impl Declaration for Variable {
    fn declared_name(&self) -> &str {
        &self.name
    }

    fn declared_type(&self) -> &str {
        self.value.type_token()
    }

    fn declaration_kind(&self) -> DeclarationKind {
        DeclarationKind::Variable
    }
}

impl Declaration for NamedProperty {
    fn declared_name(&self) -> &str {
        &self.name
    }

    fn declared_type(&self) -> &str {
        &self.property_type
    }

    fn declaration_kind(&self) -> DeclarationKind {
        DeclarationKind::Property
    }
}

impl Declaration for ParameterDescriptor {
    fn declared_name(&self) -> &str {
        &self.name
    }

    fn declared_type(&self) -> &str {
        &self.parameter_type
    }

    fn declaration_kind(&self) -> DeclarationKind {
        DeclarationKind::Parameter
    }
}

/// One container searched by a scope chain, yielding values of type `T`.
pub trait ScopeLayer<T: ?Sized> {
    fn lookup(&self, name: &str) -> Option<&T>;

    fn declares(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl ScopeLayer<Variable> for VariablesContainer {
    fn lookup(&self, name: &str) -> Option<&Variable> {
        self.get(name)
    }
}

impl ScopeLayer<dyn Declaration> for VariablesContainer {
    fn lookup(&self, name: &str) -> Option<&(dyn Declaration + 'static)> {
        self.get(name).map(|variable| variable as &(dyn Declaration + 'static))
    }
}

impl ScopeLayer<NamedProperty> for PropertyBag {
    fn lookup(&self, name: &str) -> Option<&NamedProperty> {
        self.get(name)
    }
}

impl ScopeLayer<dyn Declaration> for PropertyBag {
    fn lookup(&self, name: &str) -> Option<&(dyn Declaration + 'static)> {
        self.get(name).map(|property| property as &(dyn Declaration + 'static))
    }
}

impl ScopeLayer<ParameterDescriptor> for ParametersContainer {
    fn lookup(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.get(name)
    }
}

impl ScopeLayer<dyn Declaration> for ParametersContainer {
    fn lookup(&self, name: &str) -> Option<&(dyn Declaration + 'static)> {
        self.get(name).map(|parameter| parameter as &(dyn Declaration + 'static))
    }
}
