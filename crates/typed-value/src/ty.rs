//! Type tags carried by every [`Value`](crate::Value).
//!
//! The JSON form of a type follows a compact array notation:
//!
//! | type | JSON |
//! |---|---|
//! | primitive | `"bool"`, `"number"`, `"string"` |
//! | any | `"dynamic"` |
//! | collection | `["list", T]`, `["set", T]`, `["map", T]` |
//! | structural | `["object", {"name": T}]`, `["tuple", [T, ...]]` |
//!
//! Capsule types have no JSON form.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// An opaque extension type, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapsuleType {
    name: String,
}

impl CapsuleType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The type of a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Number,
    String,
    /// The unconstrained pseudo-type: "any type, decided later".
    Dynamic,
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>),
    Object(BTreeMap<String, Type>),
    Tuple(Vec<Type>),
    Capsule(CapsuleType),
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn set(element: Type) -> Self {
        Type::Set(Box::new(element))
    }

    pub fn map(element: Type) -> Self {
        Type::Map(Box::new(element))
    }

    pub fn object<K: Into<String>>(attrs: impl IntoIterator<Item = (K, Type)>) -> Self {
        Type::Object(attrs.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }

    pub fn empty_object() -> Self {
        Type::Object(BTreeMap::new())
    }

    pub fn tuple(elements: Vec<Type>) -> Self {
        Type::Tuple(elements)
    }

    pub fn empty_tuple() -> Self {
        Type::Tuple(Vec::new())
    }

    pub fn capsule(name: impl Into<String>) -> Self {
        Type::Capsule(CapsuleType::new(name))
    }

    pub fn is_primitive_type(&self) -> bool {
        matches!(self, Type::Bool | Type::Number | Type::String)
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    pub fn is_list_type(&self) -> bool {
        matches!(self, Type::List(_))
    }

    pub fn is_set_type(&self) -> bool {
        matches!(self, Type::Set(_))
    }

    pub fn is_map_type(&self) -> bool {
        matches!(self, Type::Map(_))
    }

    pub fn is_object_type(&self) -> bool {
        matches!(self, Type::Object(_))
    }

    pub fn is_tuple_type(&self) -> bool {
        matches!(self, Type::Tuple(_))
    }

    pub fn is_capsule_type(&self) -> bool {
        matches!(self, Type::Capsule(_))
    }

    /// Element type of a list, set or map.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::List(t) | Type::Set(t) | Type::Map(t) => Some(t),
            _ => None,
        }
    }

    /// Attribute type of an object type.
    pub fn attribute_type(&self, name: &str) -> Option<&Type> {
        match self {
            Type::Object(attrs) => attrs.get(name),
            _ => None,
        }
    }

    pub fn attribute_types(&self) -> Option<&BTreeMap<String, Type>> {
        match self {
            Type::Object(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn tuple_element_types(&self) -> Option<&[Type]> {
        match self {
            Type::Tuple(elems) => Some(elems),
            _ => None,
        }
    }

    /// Whether a capsule type appears anywhere inside this type.
    pub fn contains_capsule(&self) -> bool {
        match self {
            Type::Capsule(_) => true,
            Type::List(t) | Type::Set(t) | Type::Map(t) => t.contains_capsule(),
            Type::Object(attrs) => attrs.values().any(Type::contains_capsule),
            Type::Tuple(elems) => elems.iter().any(Type::contains_capsule),
            Type::Bool | Type::Number | Type::String | Type::Dynamic => false,
        }
    }

    /// Human-readable name used in error messages.
    pub fn friendly_name(&self) -> String {
        match self {
            Type::Bool => "bool".to_owned(),
            Type::Number => "number".to_owned(),
            Type::String => "string".to_owned(),
            Type::Dynamic => "dynamic".to_owned(),
            Type::List(t) => format!("list of {}", t.friendly_name()),
            Type::Set(t) => format!("set of {}", t.friendly_name()),
            Type::Map(t) => format!("map of {}", t.friendly_name()),
            Type::Object(_) => "object".to_owned(),
            Type::Tuple(_) => "tuple".to_owned(),
            Type::Capsule(c) => c.name.clone(),
        }
    }

    /// Builds a type from its JSON form.
    pub fn from_json_value(json: &JsonValue) -> Result<Type, String> {
        match json {
            JsonValue::String(s) => match s.as_str() {
                "bool" => Ok(Type::Bool),
                "number" => Ok(Type::Number),
                "string" => Ok(Type::String),
                "dynamic" => Ok(Type::Dynamic),
                other => Err(format!("invalid primitive type name {other:?}")),
            },
            JsonValue::Array(parts) => {
                let [kind, arg] = parts.as_slice() else {
                    return Err("type constructor must have exactly two elements".to_owned());
                };
                let kind = kind
                    .as_str()
                    .ok_or_else(|| "type constructor kind must be a string".to_owned())?;
                match kind {
                    "list" => Ok(Type::list(Type::from_json_value(arg)?)),
                    "set" => Ok(Type::set(Type::from_json_value(arg)?)),
                    "map" => Ok(Type::map(Type::from_json_value(arg)?)),
                    "object" => {
                        let attrs = arg
                            .as_object()
                            .ok_or_else(|| "object type requires an attribute map".to_owned())?;
                        let mut out = BTreeMap::new();
                        for (name, ty) in attrs {
                            out.insert(name.clone(), Type::from_json_value(ty)?);
                        }
                        Ok(Type::Object(out))
                    }
                    "tuple" => {
                        let elems = arg
                            .as_array()
                            .ok_or_else(|| "tuple type requires an element array".to_owned())?;
                        elems
                            .iter()
                            .map(Type::from_json_value)
                            .collect::<Result<Vec<_>, _>>()
                            .map(Type::Tuple)
                    }
                    other => Err(format!("invalid type constructor {other:?}")),
                }
            }
            _ => Err("type must be a string or an array".to_owned()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match self {
            Type::Bool => return serializer.serialize_str("bool"),
            Type::Number => return serializer.serialize_str("number"),
            Type::String => return serializer.serialize_str("string"),
            Type::Dynamic => return serializer.serialize_str("dynamic"),
            Type::Capsule(c) => {
                return Err(S::Error::custom(format!(
                    "capsule type {} has no JSON representation",
                    c.name
                )))
            }
            Type::List(_) => "list",
            Type::Set(_) => "set",
            Type::Map(_) => "map",
            Type::Object(_) => "object",
            Type::Tuple(_) => "tuple",
        };
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(kind)?;
        match self {
            Type::List(t) | Type::Set(t) | Type::Map(t) => seq.serialize_element(t)?,
            Type::Object(attrs) => seq.serialize_element(attrs)?,
            Type::Tuple(elems) => seq.serialize_element(elems)?,
            _ => {}
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Type::from_json_value(&json).map_err(D::Error::custom)
    }
}
