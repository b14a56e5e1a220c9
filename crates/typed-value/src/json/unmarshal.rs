//! Decoding JSON documents as values of a given type.

use serde_json::{Map, Value as JsonValue};

use super::error::{Path, PathStep};
use super::text::parse_document;
use super::JsonError;
use crate::{Type, Value, ValueError};

/// Decodes `src` as a value of type `ty`.
///
/// JSON `null` decodes to a null of `ty` at any depth. Object attributes
/// missing from the document become nulls; attributes the type does not
/// declare are rejected. A dynamic type expects the `{"value", "type"}`
/// wrapper that [`marshal`](super::marshal) produces. Escapes of unpaired
/// UTF-16 surrogates decode as U+FFFD.
pub fn unmarshal(src: &str, ty: &Type) -> Result<Value, JsonError> {
    let json = parse_document(src)?;
    from_json_value(&json, ty)
}

/// Like [`unmarshal`] for an already-parsed document.
pub fn from_json_value(json: &JsonValue, ty: &Type) -> Result<Value, JsonError> {
    let mut path = Path::default();
    decode(json, ty, &mut path)
}

fn decode(json: &JsonValue, ty: &Type, path: &mut Path) -> Result<Value, JsonError> {
    if json.is_null() {
        return Ok(Value::null(ty.clone()));
    }
    match ty {
        Type::Bool => match json {
            JsonValue::Bool(b) => Ok(Value::bool(*b)),
            _ => Err(path.type_error("bool is required")),
        },
        Type::Number => match json {
            JsonValue::Number(n) => {
                Value::number_parse(&n.to_string()).map_err(|e| path.type_error(e.to_string()))
            }
            JsonValue::String(s) => {
                Value::number_parse(s).map_err(|_| path.type_error("a number is required"))
            }
            _ => Err(path.type_error("a number is required")),
        },
        Type::String => match json {
            JsonValue::String(s) => Ok(Value::string(s.as_str())),
            JsonValue::Number(n) => Ok(Value::string(n.to_string())),
            JsonValue::Bool(b) => Ok(Value::string(b.to_string())),
            _ => Err(path.type_error("a string is required")),
        },
        Type::List(ety) | Type::Set(ety) => {
            let items = json
                .as_array()
                .ok_or_else(|| path.type_error(format!("{} is required", ty.friendly_name())))?;
            let elems = decode_items(items, |_| &**ety, path)?;
            let built = match (ty.is_set_type(), elems.is_empty()) {
                (false, true) => Ok(Value::list_empty((**ety).clone())),
                (true, true) => Ok(Value::set_empty((**ety).clone())),
                (false, false) => Value::list(elems),
                (true, false) => Value::set(elems),
            };
            built.map_err(|e| inconsistent(path, e))
        }
        Type::Map(ety) => {
            let attrs = json
                .as_object()
                .ok_or_else(|| path.type_error(format!("{} is required", ty.friendly_name())))?;
            if attrs.is_empty() {
                return Ok(Value::map_empty((**ety).clone()));
            }
            let elems = decode_attrs(attrs, |_| Some(&**ety), path)?;
            Value::map(elems).map_err(|e| inconsistent(path, e))
        }
        Type::Object(attr_types) => {
            let attrs = json
                .as_object()
                .ok_or_else(|| path.type_error("object is required"))?;
            let mut elems = decode_attrs(attrs, |name| attr_types.get(name), path)?;
            for (name, aty) in attr_types {
                if !attrs.contains_key(name) {
                    elems.push((name.clone(), Value::null(aty.clone())));
                }
            }
            Ok(Value::object(elems))
        }
        Type::Tuple(etys) => {
            let items = json
                .as_array()
                .ok_or_else(|| path.type_error("tuple is required"))?;
            if items.len() != etys.len() {
                return Err(path.type_error(format!(
                    "tuple of {} elements is required, got {}",
                    etys.len(),
                    items.len()
                )));
            }
            Ok(Value::tuple(decode_items(items, |i| &etys[i], path)?))
        }
        Type::Dynamic => decode_dynamic(json, path),
        Type::Capsule(c) => Err(path.unsupported(format!(
            "capsule type {} cannot be decoded from JSON",
            c.name()
        ))),
    }
}

fn decode_items<'t>(
    items: &[JsonValue],
    element_type: impl Fn(usize) -> &'t Type,
    path: &mut Path,
) -> Result<Vec<Value>, JsonError> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(PathStep::Index(i));
        out.push(decode(item, element_type(i), path)?);
        path.pop();
    }
    Ok(out)
}

fn decode_attrs<'t>(
    attrs: &Map<String, JsonValue>,
    attr_type: impl Fn(&str) -> Option<&'t Type>,
    path: &mut Path,
) -> Result<Vec<(String, Value)>, JsonError> {
    let mut out = Vec::with_capacity(attrs.len());
    for (name, item) in attrs {
        let aty = attr_type(name)
            .ok_or_else(|| path.type_error(format!("unsupported attribute {name:?}")))?;
        path.push(PathStep::Attr(name.clone()));
        out.push((name.clone(), decode(item, aty, path)?));
        path.pop();
    }
    Ok(out)
}

fn decode_dynamic(json: &JsonValue, path: &mut Path) -> Result<Value, JsonError> {
    let wrapper = json
        .as_object()
        .filter(|w| w.len() == 2)
        .ok_or_else(|| path.type_error("dynamic value must be an object with \"value\" and \"type\""))?;
    let (Some(value), Some(ty)) = (wrapper.get("value"), wrapper.get("type")) else {
        return Err(path.type_error("dynamic value must be an object with \"value\" and \"type\""));
    };
    let ty = Type::from_json_value(ty).map_err(JsonError::InvalidType)?;
    decode(value, &ty, path)
}

fn inconsistent(path: &Path, err: ValueError) -> JsonError {
    path.type_error(err.to_string())
}
