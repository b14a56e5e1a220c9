//! Type inference from the shape of a JSON document.

use serde_json::Value as JsonValue;

use super::text::parse_document;
use super::JsonError;
use crate::Type;

/// Infers the type a JSON document would decode to when no target type is
/// known: `null` is dynamic, arrays are tuples and objects are objects.
pub fn implied_type(src: &str) -> Result<Type, JsonError> {
    let json = parse_document(src)?;
    Ok(implied_type_of(&json))
}

/// Like [`implied_type`] for an already-parsed document.
pub fn implied_type_of(json: &JsonValue) -> Type {
    match json {
        JsonValue::Null => Type::Dynamic,
        JsonValue::Bool(_) => Type::Bool,
        JsonValue::Number(_) => Type::Number,
        JsonValue::String(_) => Type::String,
        JsonValue::Array(items) => Type::Tuple(items.iter().map(implied_type_of).collect()),
        JsonValue::Object(attrs) => {
            Type::Object(attrs.iter().map(|(k, v)| (k.clone(), implied_type_of(v))).collect())
        }
    }
}
