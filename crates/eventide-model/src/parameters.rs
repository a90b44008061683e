//! Function parameter declarations.

use eventide_collections::{ElementId, Named, NamedElementList};
use serde::{Deserialize, Serialize};

use crate::value_types::{ExpressionBaseType, TypeClassifier};
use crate::variables::{Variable, VariablesContainer};

/// Declaration of one parameter of an events function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    /// Value type token (`number`, `objectList`, `layer`, ...).
    #[serde(rename = "type", default)]
    pub parameter_type: String,
    /// Extra type information, such as the object type of an object
    /// parameter or the choices of a `stringWithSelector`.
    #[serde(rename = "supplementaryInformation", default, skip_serializing_if = "String::is_empty")]
    pub extra_info: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    #[serde(default)]
    pub code_only: bool,
}

impl ParameterDescriptor {
    pub fn new(name: &str, parameter_type: &str) -> Self {
        Self {
            name: name.to_string(),
            parameter_type: parameter_type.to_string(),
            ..Self::default()
        }
    }

    pub fn with_extra_info(mut self, extra_info: &str) -> Self {
        self.extra_info = extra_info.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_default_value(mut self, default_value: &str) -> Self {
        self.optional = true;
        self.default_value = default_value.to_string();
        self
    }
}

impl Named for ParameterDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// The ordered parameters of a function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParametersContainer {
    parameters: NamedElementList<ParameterDescriptor>,
}

impl ParametersContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, parameter: ParameterDescriptor) -> ElementId {
        self.parameters.push(parameter)
    }

    pub fn insert(&mut self, parameter: ParameterDescriptor, position: usize) -> ElementId {
        self.parameters.insert(parameter, position)
    }

    pub fn insert_new(&mut self, name: &str, position: usize) -> ElementId {
        self.parameters.insert_new(name, position)
    }

    pub fn has(&self, name: &str) -> bool {
        self.parameters.has(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParameterDescriptor> {
        self.parameters.get_mut(name)
    }

    pub fn get_at(&self, index: usize) -> Option<&ParameterDescriptor> {
        self.parameters.get_at(index)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParameterDescriptor> {
        self.parameters.remove(name)
    }

    pub fn move_parameter(&mut self, old_index: usize, new_index: usize) -> bool {
        self.parameters.move_element(old_index, new_index)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> + '_ {
        self.parameters.iter()
    }

    /// Parameters visible as variables inside the function body.
    ///
    /// Number-like and string-like parameters become number and string
    /// variables initialized from their default value; `yesorno`/`trueorfalse`
    /// parameters become booleans. Objects, behaviors and variable references
    /// are not values and are left out.
    pub fn to_variables(&self) -> VariablesContainer {
        self.parameters
            .iter()
            .filter_map(|parameter| {
                let name = parameter.name.as_str();
                let default = parameter.default_value.as_str();
                match TypeClassifier::canonicalize(&parameter.parameter_type) {
                    Some(ExpressionBaseType::Number) => {
                        Some(Variable::number(name, default.trim().parse().unwrap_or(0.0)))
                    }
                    Some(ExpressionBaseType::String) => Some(Variable::string(name, default)),
                    None if TypeClassifier::is_boolean(&parameter.parameter_type) => {
                        Some(Variable::boolean(name, matches!(default, "yes" | "true")))
                    }
                    None => None,
                }
            })
            .collect()
    }
}

impl FromIterator<ParameterDescriptor> for ParametersContainer {
    fn from_iter<I: IntoIterator<Item = ParameterDescriptor>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}
