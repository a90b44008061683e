//! Events functions and the containers grouping them.

use eventide_collections::{ElementId, Named, NamedElementList};
use serde::{Deserialize, Serialize};

use crate::parameters::ParametersContainer;

/// How an events function is exposed to the events sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FunctionType {
    #[default]
    Action,
    Condition,
    Expression,
    StringExpression,
    ExpressionAndCondition,
    /// An action whose operator and value parameters mirror a getter function.
    ActionWithOperator,
}

impl FunctionType {
    pub fn is_action(&self) -> bool {
        matches!(self, FunctionType::Action | FunctionType::ActionWithOperator)
    }

    pub fn is_condition(&self) -> bool {
        matches!(self, FunctionType::Condition | FunctionType::ExpressionAndCondition)
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            FunctionType::Expression | FunctionType::StringExpression | FunctionType::ExpressionAndCondition
        )
    }
}

/// Return type of an expression function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionType {
    #[serde(rename = "type", default)]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub supplementary_information: String,
}

impl ExpressionType {
    pub fn new(value_type: &str) -> Self {
        Self {
            value_type: value_type.to_string(),
            supplementary_information: String::new(),
        }
    }
}

/// A user-declared function made of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsFunction {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub function_type: FunctionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_type: Option<ExpressionType>,
    /// For `ActionWithOperator`: the function whose value this action sets.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub getter_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default)]
    pub parameters: ParametersContainer,
    /// Event tree, kept verbatim: this model does not interpret events.
    #[serde(default = "empty_events")]
    pub events: serde_json::Value,
}

fn empty_events() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

impl Default for EventsFunction {
    fn default() -> Self {
        Self {
            name: String::new(),
            full_name: String::new(),
            description: String::new(),
            sentence: String::new(),
            group: String::new(),
            function_type: FunctionType::default(),
            expression_type: None,
            getter_name: String::new(),
            private: false,
            is_async: false,
            parameters: ParametersContainer::new(),
            events: empty_events(),
        }
    }
}

impl EventsFunction {
    pub fn new(name: &str, function_type: FunctionType) -> Self {
        Self {
            name: name.to_string(),
            function_type,
            ..Self::default()
        }
    }
}

impl Named for EventsFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// What kind of entity owns a functions container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionsOwner {
    #[default]
    Extension,
    Behavior,
    Object,
}

/// The functions of an extension, a behavior or an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsFunctionsContainer {
    owner: FunctionsOwner,
    functions: NamedElementList<EventsFunction>,
}

impl EventsFunctionsContainer {
    pub fn new(owner: FunctionsOwner) -> Self {
        Self {
            owner,
            functions: NamedElementList::new(),
        }
    }

    pub fn from_list(owner: FunctionsOwner, functions: NamedElementList<EventsFunction>) -> Self {
        Self { owner, functions }
    }

    pub fn owner(&self) -> FunctionsOwner {
        self.owner
    }

    pub fn as_list(&self) -> &NamedElementList<EventsFunction> {
        &self.functions
    }

    pub fn insert(&mut self, function: EventsFunction, position: usize) -> ElementId {
        self.functions.insert(function, position)
    }

    pub fn push(&mut self, function: EventsFunction) -> ElementId {
        self.functions.push(function)
    }

    pub fn insert_new(&mut self, name: &str, position: usize) -> ElementId {
        self.functions.insert_new(name, position)
    }

    pub fn has(&self, name: &str) -> bool {
        self.functions.has(name)
    }

    pub fn get(&self, name: &str) -> Option<&EventsFunction> {
        self.functions.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EventsFunction> {
        self.functions.get_mut(name)
    }

    pub fn get_at(&self, index: usize) -> Option<&EventsFunction> {
        self.functions.get_at(index)
    }

    pub fn remove(&mut self, name: &str) -> Option<EventsFunction> {
        self.functions.remove(name)
    }

    /// Renames a function, refusing names already in use. Setters bound to the
    /// renamed function follow it.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name != new_name && self.functions.has(new_name) {
            return false;
        }
        if !self.functions.rename(old_name, new_name) {
            return false;
        }
        for function in self.functions.iter_mut() {
            if function.function_type == FunctionType::ActionWithOperator && function.getter_name == old_name {
                function.getter_name = new_name.to_string();
            }
        }
        true
    }

    pub fn move_function(&mut self, old_index: usize, new_index: usize) -> bool {
        self.functions.move_element(old_index, new_index)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventsFunction> + '_ {
        self.functions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renaming_a_getter_updates_bound_setters() {
        let mut container = EventsFunctionsContainer::new(FunctionsOwner::Behavior);
        container.push(EventsFunction::new("Speed", FunctionType::ExpressionAndCondition));
        let mut setter = EventsFunction::new("SetSpeed", FunctionType::ActionWithOperator);
        setter.getter_name = "Speed".to_string();
        container.push(setter);

        assert!(!container.rename("Speed", "SetSpeed"));
        assert!(container.rename("Speed", "MaxSpeed"));
        assert_eq!(container.get("SetSpeed").unwrap().getter_name, "MaxSpeed");
    }

    #[test]
    fn function_type_predicates() {
        assert!(FunctionType::ExpressionAndCondition.is_condition());
        assert!(FunctionType::ExpressionAndCondition.is_expression());
        assert!(FunctionType::ActionWithOperator.is_action());
        assert!(!FunctionType::StringExpression.is_condition());
    }

    #[test]
    fn events_are_kept_verbatim() {
        let json = r#"{"name":"Tick","functionType":"Action","events":[{"type":"Comment","text":"hi"}]}"#;
        let function: EventsFunction = serde_json::from_str(json).unwrap();
        assert_eq!(function.events[0]["text"], "hi");
        assert!(function.parameters.is_empty());
    }
}
