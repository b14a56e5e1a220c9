//! Encoding typed values as JSON documents.

use serde_json::{Map, Number, Value as JsonValue};

use super::error::{Path, PathStep};
use super::JsonError;
use crate::number::format_decimal;
use crate::value::Repr;
use crate::{Type, Value};

/// Encodes `value` as compact JSON text, interpreting it as type `ty`.
///
/// Object and map keys come out in ascending order, set elements in
/// canonical order and numbers in plain decimal notation (exponent
/// notation once the exponent would need more than
/// [`MAX_PLAIN_PADDING`](crate::number::MAX_PLAIN_PADDING) zeros). When `ty` is
/// dynamic the value is wrapped as `{"value": ..., "type": ...}` so that
/// [`unmarshal`](super::unmarshal) can recover its concrete type.
pub fn marshal(value: &Value, ty: &Type) -> Result<String, JsonError> {
    let json = to_json_value(value, ty)?;
    Ok(serde_json::to_string(&json)?)
}

/// Like [`marshal`], producing a `serde_json::Value` tree.
pub fn to_json_value(value: &Value, ty: &Type) -> Result<JsonValue, JsonError> {
    let mut path = Path::default();
    encode(value, ty, &mut path)
}

fn encode(value: &Value, ty: &Type, path: &mut Path) -> Result<JsonValue, JsonError> {
    if ty.is_dynamic() && !value.ty().is_dynamic() {
        let mut wrapper = Map::new();
        wrapper.insert("value".to_owned(), encode(value, value.ty(), path)?);
        let ty_json =
            serde_json::to_value(value.ty()).map_err(|e| path.unsupported(e.to_string()))?;
        wrapper.insert("type".to_owned(), ty_json);
        return Ok(JsonValue::Object(wrapper));
    }

    match (&value.repr, ty) {
        (Repr::Null, _) => Ok(JsonValue::Null),
        (Repr::Unknown, _) => Err(path.unsupported("value is not known")),
        (Repr::Capsule(_), _) | (_, Type::Capsule(_)) => Err(path.unsupported(format!(
            "capsule-typed value of {} cannot be encoded as JSON",
            ty.friendly_name()
        ))),
        (Repr::Bool(b), Type::Bool) => Ok(JsonValue::Bool(*b)),
        (Repr::Number(n), Type::Number) => {
            let number: Number = serde_json::from_str(&format_decimal(n))?;
            Ok(JsonValue::Number(number))
        }
        (Repr::String(s), Type::String) => Ok(JsonValue::String(s.clone())),
        (Repr::Seq(elems), Type::List(ety) | Type::Set(ety)) => {
            encode_items(elems, |_| &**ety, path).map(JsonValue::Array)
        }
        (Repr::Seq(elems), Type::Tuple(etys)) if elems.len() == etys.len() => {
            encode_items(elems, |i| &etys[i], path).map(JsonValue::Array)
        }
        (Repr::Attrs(attrs), Type::Map(ety)) => {
            let mut out = Map::new();
            for (name, elem) in attrs {
                path.push(PathStep::Attr(name.clone()));
                out.insert(name.clone(), encode(elem, ety, path)?);
                path.pop();
            }
            Ok(JsonValue::Object(out))
        }
        (Repr::Attrs(attrs), Type::Object(attr_types)) => {
            let mut out = Map::new();
            for (name, aty) in attr_types {
                let attr = attrs
                    .get(name)
                    .ok_or_else(|| path.type_error(format!("missing attribute {name:?}")))?;
                path.push(PathStep::Attr(name.clone()));
                out.insert(name.clone(), encode(attr, aty, path)?);
                path.pop();
            }
            Ok(JsonValue::Object(out))
        }
        _ => Err(path.type_error(format!(
            "value of type {} does not conform to {}",
            value.ty().friendly_name(),
            ty.friendly_name()
        ))),
    }
}

fn encode_items<'t>(
    elems: &[Value],
    element_type: impl Fn(usize) -> &'t Type,
    path: &mut Path,
) -> Result<Vec<JsonValue>, JsonError> {
    let mut out = Vec::with_capacity(elems.len());
    for (i, elem) in elems.iter().enumerate() {
        path.push(PathStep::Index(i));
        out.push(encode(elem, element_type(i), path)?);
        path.pop();
    }
    Ok(out)
}
