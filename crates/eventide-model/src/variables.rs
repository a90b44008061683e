//! Variables and the containers holding them (project, scene, extension and
//! function-parameter scopes).

use eventide_collections::{ElementId, Named, NamedElementList};
use serde::{Deserialize, Serialize};

/// The value held by a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Structure(NamedElementList<Variable>),
    Array(Vec<VariableValue>),
}

impl Default for VariableValue {
    fn default() -> Self {
        VariableValue::Number(0.0)
    }
}

impl VariableValue {
    /// Value type token of this value.
    pub fn type_token(&self) -> &'static str {
        match self {
            VariableValue::Number(_) => "number",
            VariableValue::String(_) => "string",
            VariableValue::Boolean(_) => "boolean",
            VariableValue::Structure(_) => "structure",
            VariableValue::Array(_) => "array",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: VariableValue,
}

impl Variable {
    pub fn new(name: &str, value: VariableValue) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    pub fn number(name: &str, value: f64) -> Self {
        Self::new(name, VariableValue::Number(value))
    }

    pub fn string(name: &str, value: &str) -> Self {
        Self::new(name, VariableValue::String(value.to_string()))
    }

    pub fn boolean(name: &str, value: bool) -> Self {
        Self::new(name, VariableValue::Boolean(value))
    }

    /// Child of a structure variable. `None` for any other kind of value.
    pub fn child(&self, name: &str) -> Option<&Variable> {
        match &self.value {
            VariableValue::Structure(children) => children.get(name),
            _ => None,
        }
    }
}

impl Named for Variable {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// An ordered set of variables forming one scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariablesContainer {
    variables: NamedElementList<Variable>,
}

impl VariablesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: Variable, position: usize) -> ElementId {
        self.variables.insert(variable, position)
    }

    pub fn push(&mut self, variable: Variable) -> ElementId {
        self.variables.push(variable)
    }

    pub fn insert_new(&mut self, name: &str, position: usize) -> ElementId {
        self.variables.insert_new(name, position)
    }

    pub fn has(&self, name: &str) -> bool {
        self.variables.has(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    pub fn get_at(&self, index: usize) -> Option<&Variable> {
        self.variables.get_at(index)
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    /// Renames a variable, refusing to take a name that is already used.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name != new_name && self.variables.has(new_name) {
            return false;
        }
        self.variables.rename(old_name, new_name)
    }

    pub fn move_variable(&mut self, old_index: usize, new_index: usize) -> bool {
        self.variables.move_element(old_index, new_index)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.iter()
    }

    pub fn as_list(&self) -> &NamedElementList<Variable> {
        &self.variables
    }
}

impl FromIterator<Variable> for VariablesContainer {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().collect(),
        }
    }
}
