//! Generation of getter and setter functions for the properties of
//! behaviors and custom objects.

use log::debug;

use crate::entity::{EventsBasedBehavior, EventsBasedEntity, EventsBasedObject, EventsFunctionsEntity};
use crate::function::{EventsFunction, EventsFunctionsContainer, ExpressionType, FunctionType};
use crate::parameters::ParameterDescriptor;
use crate::property::NamedProperty;

/// Property types that can get generated accessors.
const SUPPORTED_PROPERTY_TYPES: &[&str] = &["Number", "String", "Boolean", "Choice", "Color"];

/// Generates accessor functions for entity properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyFunctionGenerator;

impl PropertyFunctionGenerator {
    /// `Speed` -> `Speed`, `speed` -> `Speed`.
    pub fn getter_name(property_name: &str) -> String {
        let mut chars = property_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn setter_name(property_name: &str) -> String {
        format!("Set{}", Self::getter_name(property_name))
    }

    /// Whether accessors can be generated: the property has a supported type
    /// and neither accessor name is taken.
    pub fn can_generate_getter_and_setter(functions: &EventsFunctionsContainer, property: &NamedProperty) -> bool {
        SUPPORTED_PROPERTY_TYPES.contains(&property.property_type.as_str())
            && !functions.has(&Self::getter_name(&property.name))
            && !functions.has(&Self::setter_name(&property.name))
    }

    /// Adds a getter and a setter for a property of `behavior`.
    ///
    /// Preconditions: none; unknown properties and properties that cannot get
    /// accessors are left alone.
    /// Postconditions: on `true`, the getter and the setter are appended to
    /// the behavior's functions, both taking `Object` and `Behavior` first.
    pub fn generate_behavior_getter_and_setter(
        extension_name: &str,
        behavior: &mut EventsBasedBehavior,
        property_name: &str,
    ) -> bool {
        let property = behavior.entity.properties.get(property_name).cloned();
        Self::generate_for_behavior(extension_name, behavior, property)
    }

    /// Same as [`generate_behavior_getter_and_setter`](Self::generate_behavior_getter_and_setter)
    /// for a property of the behavior's shared property bag.
    pub fn generate_behavior_shared_getter_and_setter(
        extension_name: &str,
        behavior: &mut EventsBasedBehavior,
        property_name: &str,
    ) -> bool {
        let property = behavior.shared_properties.get(property_name).cloned();
        Self::generate_for_behavior(extension_name, behavior, property)
    }

    fn generate_for_behavior(
        extension_name: &str,
        behavior: &mut EventsBasedBehavior,
        property: Option<NamedProperty>,
    ) -> bool {
        let implicit = vec![
            ParameterDescriptor::new("Object", "object").with_extra_info(&behavior.object_type),
            ParameterDescriptor::new("Behavior", "behavior").with_extra_info(&behavior.full_type(extension_name)),
        ];
        Self::generate(behavior.entity_mut(), property, implicit)
    }

    /// Adds a getter and a setter for a property of `object`, both taking
    /// `Object` first.
    pub fn generate_object_getter_and_setter(
        extension_name: &str,
        object: &mut EventsBasedObject,
        property_name: &str,
    ) -> bool {
        let property = object.entity.properties.get(property_name).cloned();
        let implicit = vec![ParameterDescriptor::new("Object", "object").with_extra_info(&object.full_type(extension_name))];
        Self::generate(object.entity_mut(), property, implicit)
    }

    fn generate(
        entity: &mut EventsBasedEntity,
        property: Option<NamedProperty>,
        implicit: Vec<ParameterDescriptor>,
    ) -> bool {
        let Some(property) = property else {
            return false;
        };
        if !Self::can_generate_getter_and_setter(&entity.functions, &property) {
            debug!("Not generating accessors for property {}", property.name);
            return false;
        }

        let base = if entity.full_name.is_empty() {
            entity.name.clone()
        } else {
            entity.full_name.clone()
        };
        let group = if property.group.is_empty() {
            format!("{} configuration", base)
        } else {
            format!("{} {} configuration", base, property.group.to_lowercase())
        };
        let label = property.display_label().to_string();
        let value_index = implicit.len();

        let getter_name = Self::getter_name(&property.name);
        let mut getter = EventsFunction::new(&getter_name, FunctionType::ExpressionAndCondition);
        getter.full_name = label.clone();
        getter.group = group.clone();
        getter.parameters = implicit.iter().cloned().collect();

        let mut setter = EventsFunction::new(&Self::setter_name(&property.name), FunctionType::ActionWithOperator);
        setter.full_name = label.clone();
        setter.group = group;
        setter.parameters = implicit.into_iter().collect();

        if property.property_type == "Boolean" {
            getter.function_type = FunctionType::Condition;
            getter.description = format!("Check if {}.", label.to_lowercase());
            getter.sentence = format!("_PARAM0_ {}", label.to_lowercase());

            setter.function_type = FunctionType::Action;
            setter.description = format!("Change if {}.", label.to_lowercase());
            setter.sentence = format!("_PARAM0_ {}: _PARAM{}_", label.to_lowercase(), value_index);
            setter
                .parameters
                .push(ParameterDescriptor::new("Value", "yesorno").with_default_value("yes"));
        } else {
            let mut expression_type = ExpressionType::new(expression_type_of(&property));
            if property.property_type == "Choice" {
                expression_type.supplementary_information = choices_of(&property);
            }
            getter.expression_type = Some(expression_type);
            getter.description = format!("Return {}.", label.to_lowercase());
            getter.sentence = format!("the {}", label.to_lowercase());

            setter.description = format!("Change {}.", label.to_lowercase());
            setter.sentence = format!("the {}", label.to_lowercase());
            setter.getter_name = getter_name;
        }

        entity.functions.push(getter);
        entity.functions.push(setter);
        true
    }
}

fn expression_type_of(property: &NamedProperty) -> &'static str {
    match property.property_type.as_str() {
        "Number" => "expression",
        "Choice" => "stringWithSelector",
        "Color" => "color",
        _ => "string",
    }
}

/// Choices of a `Choice` property as a JSON array of strings.
fn choices_of(property: &NamedProperty) -> String {
    let choices = property
        .extra_information
        .iter()
        .map(|choice| serde_json::Value::String(choice.clone()))
        .collect();
    serde_json::Value::Array(choices).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behavior_with(property: NamedProperty) -> EventsBasedBehavior {
        let mut behavior = EventsBasedBehavior::new("Platformer");
        behavior.object_type = "Sprite".to_string();
        behavior.entity.properties.insert(property, usize::MAX);
        behavior
    }

    #[test]
    fn accessor_names() {
        assert_eq!(PropertyFunctionGenerator::getter_name("speed"), "Speed");
        assert_eq!(PropertyFunctionGenerator::setter_name("jumpHeight"), "SetJumpHeight");
        assert_eq!(PropertyFunctionGenerator::getter_name(""), "");
    }

    #[test]
    fn number_property_gets_expression_and_operator_setter() {
        let mut behavior = behavior_with(NamedProperty::new("Speed", "Number", "200").with_label("Max speed"));
        assert!(PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Speed"
        ));

        let getter = behavior.functions().get("Speed").unwrap();
        assert_eq!(getter.function_type, FunctionType::ExpressionAndCondition);
        assert_eq!(getter.expression_type.as_ref().unwrap().value_type, "expression");
        assert_eq!(getter.parameters.get_at(0).unwrap().extra_info, "Sprite");
        assert_eq!(getter.parameters.get_at(1).unwrap().extra_info, "Ext::Platformer");

        let setter = behavior.functions().get("SetSpeed").unwrap();
        assert_eq!(setter.function_type, FunctionType::ActionWithOperator);
        assert_eq!(setter.getter_name, "Speed");
        assert_eq!(setter.parameters.len(), 2);

        assert!(!PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Speed"
        ));
    }

    #[test]
    fn boolean_property_gets_condition_and_yesorno_action() {
        let mut object = EventsBasedObject::new("Button");
        object
            .entity
            .properties
            .insert(NamedProperty::new("Enabled", "Boolean", "true"), 0);
        assert!(PropertyFunctionGenerator::generate_object_getter_and_setter(
            "Ui",
            &mut object,
            "Enabled"
        ));

        let getter = object.functions().get("Enabled").unwrap();
        assert_eq!(getter.function_type, FunctionType::Condition);
        assert!(getter.expression_type.is_none());
        let setter = object.functions().get("SetEnabled").unwrap();
        assert_eq!(setter.function_type, FunctionType::Action);
        assert_eq!(setter.parameters.get_at(0).unwrap().extra_info, "Ui::Button");
        assert_eq!(setter.parameters.get_at(1).unwrap().parameter_type, "yesorno");
        assert_eq!(setter.sentence, "_PARAM0_ enabled: _PARAM1_");
    }

    #[test]
    fn unsupported_types_and_unknown_properties_are_skipped() {
        let mut behavior = behavior_with(NamedProperty::new("Image", "Resource", ""));
        assert!(!PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Image"
        ));
        assert!(!PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Missing"
        ));
        assert!(behavior.functions().is_empty());
    }

    #[test]
    fn shared_properties_get_accessors_too() {
        let mut behavior = EventsBasedBehavior::new("Platformer");
        behavior
            .shared_properties
            .insert(NamedProperty::new("Gravity", "Number", "1000"), 0);

        assert!(!PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Gravity"
        ));
        assert!(PropertyFunctionGenerator::generate_behavior_shared_getter_and_setter(
            "Ext",
            &mut behavior,
            "Gravity"
        ));

        let getter = behavior.functions().get("Gravity").unwrap();
        assert_eq!(getter.function_type, FunctionType::ExpressionAndCondition);
        assert_eq!(getter.parameters.get_at(1).unwrap().extra_info, "Ext::Platformer");
        assert_eq!(behavior.functions().get("SetGravity").unwrap().getter_name, "Gravity");
        assert!(!PropertyFunctionGenerator::generate_behavior_shared_getter_and_setter(
            "Ext",
            &mut behavior,
            "Gravity"
        ));
    }

    #[test]
    fn choice_property_lists_its_choices() {
        let mut behavior =
            behavior_with(NamedProperty::new("Mode", "Choice", "Walk").with_extra_information(&["Walk", "Run"]));
        assert!(PropertyFunctionGenerator::generate_behavior_getter_and_setter(
            "Ext",
            &mut behavior,
            "Mode"
        ));
        let expression_type = behavior.functions().get("Mode").unwrap().expression_type.clone().unwrap();
        assert_eq!(expression_type.value_type, "stringWithSelector");
        assert_eq!(expression_type.supplementary_information, r#"["Walk","Run"]"#);
    }
}
