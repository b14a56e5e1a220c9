//! Typed value → script value.

use rquickjs::object::Property;
use rquickjs::{Array, Ctx, IntoJs, Object, Value as JsValue};
use tracing::trace;
use typed_value::{Type, Value};

use crate::number::NumberRepr;

/// Converts a typed value into an equivalent JavaScript value owned by
/// `ctx`.
///
/// The result serializes through `JSON.stringify` to the same text that
/// [`typed_value::json::marshal`] produces for the value under its own
/// type: object and map keys ascending, set elements in canonical order,
/// lists and tuples in declared order. Numbers follow [`NumberRepr`], so
/// decimals that are not integers within `i64` range are approximated.
///
/// Object attributes and map elements become enumerable, read-only,
/// non-configurable data properties defined in ascending key order, because
/// property enumeration follows insertion order. Integer-like keys such as
/// `"10"` are an exception: the engine always enumerates those first, in
/// numeric order.
///
/// The returned error only reports engine failures such as running out of
/// memory.
///
/// # Panics
///
/// The value must be wholly known and must not contain capsule values.
/// Passing an unknown value or a capsule-typed value anywhere in the tree
/// is a caller bug and panics.
pub fn to_js<'js>(ctx: &Ctx<'js>, value: &Value) -> rquickjs::Result<JsValue<'js>> {
    let ty = value.ty();
    if !value.is_known() {
        panic!("to_js called with an unknown value of type {ty}");
    }
    if value.is_null() {
        return Ok(JsValue::new_null(ctx.clone()));
    }
    if ty.is_object_type() || ty.is_map_type() {
        return to_js_object(ctx, value).map(|obj| obj.into_value());
    }

    let converted = match ty {
        Type::Bool => value.as_bool().map(|b| Ok(JsValue::new_bool(ctx.clone(), b))),
        Type::String => value
            .as_str()
            .map(|s| rquickjs::String::from_str(ctx.clone(), s).map(|s| s.into_value())),
        Type::Number => value.as_number().map(|n| NumberRepr::of(n).into_js(ctx)),
        Type::List(_) | Type::Set(_) | Type::Tuple(_) => {
            Some(to_js_array(ctx, value).map(|arr| arr.into_value()))
        }
        _ => None,
    };
    converted.unwrap_or_else(|| panic!("to_js doesn't know how to convert {value:?}"))
}

fn to_js_object<'js>(ctx: &Ctx<'js>, value: &Value) -> rquickjs::Result<Object<'js>> {
    trace!(ty = %value.ty(), len = ?value.length(), "building script object");
    let attrs = value
        .attributes()
        .unwrap_or_else(|| panic!("{} value has no attributes", value.ty()));
    let obj = Object::new(ctx.clone())?;
    for (name, elem) in attrs {
        let elem = to_js(ctx, elem)?;
        obj.prop(name, Property::from(elem).enumerable())?;
    }
    Ok(obj)
}

fn to_js_array<'js>(ctx: &Ctx<'js>, value: &Value) -> rquickjs::Result<Array<'js>> {
    trace!(ty = %value.ty(), len = ?value.length(), "building script array");
    let arr = Array::new(ctx.clone())?;
    for (i, (_, elem)) in value.element_iter().enumerate() {
        arr.set(i, to_js(ctx, elem)?)?;
    }
    Ok(arr)
}
