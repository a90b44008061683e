//! Classification of parameter/value type tokens.
//!
//! Every parameter, expression and property of the event language carries a
//! type token such as `"objectList"`, `"layer"` or `"scenevar"`. Code
//! generators only care about the broad category of a token, and about which
//! of the two expression base types (`number`, `string`) it lowers to.

use fxhash::FxHashSet;
use lazy_static::lazy_static;

/// Tokens naming an object, a list of picked objects, or a pointer to one.
pub const OBJECT_TYPES: &[&str] = &[
    "object",
    "objectPtr",
    "objectList",
    "objectListOrEmptyIfJustDeclared",
    "objectListOrEmptyWithoutPicking",
];

pub const BEHAVIOR_TYPES: &[&str] = &["behavior"];

pub const NUMBER_TYPES: &[&str] = &["number", "expression", "camera", "forceMultiplier"];

/// Tokens generated as strings even though editors show them differently.
pub const STRING_TYPES: &[&str] = &[
    "string",
    "layer",
    "color",
    "file",
    "joyaxis",
    "stringWithSelector",
    "sceneName",
    "layerEffectName",
    "layerEffectParameterName",
    "objectEffectName",
    "objectEffectParameterName",
    "objectPointName",
    "objectAnimationName",
    "functionParameterName",
    "externalLayoutName",
    "leaderboardId",
    "identifier",
    "key",
    "mouse",
    "password",
    "musicfile",
    "soundfile",
    "police",
    "audioResource",
    "bitmapFontResource",
    "fontResource",
    "imageResource",
    "jsonResource",
    "tilemapResource",
    "tilesetResource",
    "videoResource",
    "model3DResource",
    "atlasResource",
    "spineResource",
];

pub const VARIABLE_TYPES: &[&str] = &[
    "objectvar",
    "globalvar",
    "scenevar",
    "variable",
    "variableOrProperty",
    "variableOrPropertyOrParameter",
];

/// Value tokens that are not expressions: editors show a toggle for them.
pub const BOOLEAN_TYPES: &[&str] = &["yesorno", "trueorfalse"];

lazy_static! {
    static ref OBJECT_SET: FxHashSet<&'static str> = OBJECT_TYPES.iter().copied().collect();
    static ref BEHAVIOR_SET: FxHashSet<&'static str> = BEHAVIOR_TYPES.iter().copied().collect();
    static ref NUMBER_SET: FxHashSet<&'static str> = NUMBER_TYPES.iter().copied().collect();
    static ref STRING_SET: FxHashSet<&'static str> = STRING_TYPES.iter().copied().collect();
    static ref VARIABLE_SET: FxHashSet<&'static str> = VARIABLE_TYPES.iter().copied().collect();
    static ref BOOLEAN_SET: FxHashSet<&'static str> = BOOLEAN_TYPES.iter().copied().collect();
}

/// The three families of expression-like tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Number,
    String,
    Variable,
}

/// The two types an expression is finally generated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionBaseType {
    Number,
    String,
}

impl ExpressionBaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionBaseType::Number => "number",
            ExpressionBaseType::String => "string",
        }
    }
}

/// Semantic category of a type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    Object,
    Behavior,
    Expression(ExpressionKind),
    Boolean,
    /// Not in any table ("undefined" for code generation).
    Other,
}

/// Stateless, table-driven classification of type tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier;

impl TypeClassifier {
    pub fn is_object(token: &str) -> bool {
        OBJECT_SET.contains(token)
    }

    pub fn is_behavior(token: &str) -> bool {
        BEHAVIOR_SET.contains(token)
    }

    pub fn is_boolean(token: &str) -> bool {
        BOOLEAN_SET.contains(token)
    }

    /// Tokens passed as plain values rather than expressions.
    pub fn is_type_value(token: &str) -> bool {
        Self::is_boolean(token)
    }

    /// Whether `token` belongs to the expression family `kind`.
    pub fn is_expression(kind: ExpressionKind, token: &str) -> bool {
        match kind {
            ExpressionKind::Number => NUMBER_SET.contains(token),
            ExpressionKind::String => STRING_SET.contains(token),
            ExpressionKind::Variable => VARIABLE_SET.contains(token),
        }
    }

    pub fn expression_kind_of(token: &str) -> Option<ExpressionKind> {
        [ExpressionKind::Number, ExpressionKind::String, ExpressionKind::Variable]
            .into_iter()
            .find(|kind| Self::is_expression(*kind, token))
    }

    pub fn classify(token: &str) -> ValueCategory {
        if Self::is_object(token) {
            ValueCategory::Object
        } else if Self::is_behavior(token) {
            ValueCategory::Behavior
        } else if let Some(kind) = Self::expression_kind_of(token) {
            ValueCategory::Expression(kind)
        } else if Self::is_boolean(token) {
            ValueCategory::Boolean
        } else {
            ValueCategory::Other
        }
    }

    /// Maps a number-like or string-like token to its base type.
    ///
    /// Variable tokens and every other token have no expression base type.
    pub fn canonicalize(token: &str) -> Option<ExpressionBaseType> {
        match Self::expression_kind_of(token)? {
            ExpressionKind::Number => Some(ExpressionBaseType::Number),
            ExpressionKind::String => Some(ExpressionBaseType::String),
            ExpressionKind::Variable => None,
        }
    }

    /// Value token matching a property type (`"Number"` → `"number"`, ...).
    ///
    /// Unknown property types are treated as strings, which is how their
    /// values are stored.
    pub fn value_type_of_property_type(property_type: &str) -> &'static str {
        match property_type {
            "Number" => "number",
            "Boolean" => "boolean",
            "Behavior" => "behavior",
            "Color" => "color",
            "Choice" => "stringWithSelector",
            _ => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_mutually_exclusive() {
        let tables = [
            OBJECT_TYPES,
            BEHAVIOR_TYPES,
            NUMBER_TYPES,
            STRING_TYPES,
            VARIABLE_TYPES,
            BOOLEAN_TYPES,
        ];
        for (index, table) in tables.iter().enumerate() {
            for token in table.iter() {
                let owners = tables.iter().filter(|other| other.contains(token)).count();
                assert_eq!(owners, 1, "`{token}` (table {index}) appears in {owners} tables");
            }
        }
    }

    #[test]
    fn classification() {
        assert_eq!(TypeClassifier::classify("objectList"), ValueCategory::Object);
        assert_eq!(TypeClassifier::classify("behavior"), ValueCategory::Behavior);
        assert_eq!(
            TypeClassifier::classify("camera"),
            ValueCategory::Expression(ExpressionKind::Number)
        );
        assert_eq!(
            TypeClassifier::classify("layer"),
            ValueCategory::Expression(ExpressionKind::String)
        );
        assert_eq!(
            TypeClassifier::classify("scenevar"),
            ValueCategory::Expression(ExpressionKind::Variable)
        );
        assert_eq!(TypeClassifier::classify("yesorno"), ValueCategory::Boolean);
        assert_eq!(TypeClassifier::classify("somethingElse"), ValueCategory::Other);
    }

    #[test]
    fn canonicalize_maps_to_two_base_types() {
        assert_eq!(TypeClassifier::canonicalize("forceMultiplier"), Some(ExpressionBaseType::Number));
        assert_eq!(TypeClassifier::canonicalize("color"), Some(ExpressionBaseType::String));
        assert_eq!(TypeClassifier::canonicalize("imageResource"), Some(ExpressionBaseType::String));
        assert_eq!(TypeClassifier::canonicalize("globalvar"), None);
        assert_eq!(TypeClassifier::canonicalize("object"), None);
        assert_eq!(ExpressionBaseType::String.as_str(), "string");
    }

    #[test]
    fn property_types() {
        assert_eq!(TypeClassifier::value_type_of_property_type("Number"), "number");
        assert_eq!(TypeClassifier::value_type_of_property_type("Resource"), "string");
        assert_eq!(TypeClassifier::value_type_of_property_type("Choice"), "stringWithSelector");
    }
}
