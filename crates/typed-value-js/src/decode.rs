//! Script value → typed value.

use rquickjs::{Ctx, Function, Value as JsValue};
use tracing::trace;
use typed_value::{json, Type, Value};

use crate::error::ConvertError;

/// Converts a JavaScript value into the typed value it denotes.
///
/// The conversion is defined through JSON: the value's object wrapper
/// (`Object(value)`) is serialized with the engine's own `JSON.stringify`,
/// then the text is decoded under its implied type. Everything
/// `JSON.stringify` does therefore carries over: `toJSON` methods are
/// honoured (a `Date` becomes its ISO-8601 string), functions are dropped,
/// `NaN` and `Infinity` become `null`, objects without enumerable properties
/// (a wrapped symbol among them) become empty objects. Lone UTF-16
/// surrogates in strings become U+FFFD.
///
/// `null`, `undefined` and anything that serializes to `undefined` become a
/// null of the dynamic type. Arrays decode as tuples and objects as
/// objects. Serialization errors such as circular structures or BigInts are
/// returned as [`ConvertError::Serialize`].
///
/// User-defined `toJSON` methods run during the conversion and may have
/// side effects.
pub fn from_js<'js>(ctx: &Ctx<'js>, value: JsValue<'js>) -> Result<Value, ConvertError> {
    if value.is_null() || value.is_undefined() {
        return Ok(Value::null(Type::Dynamic));
    }

    let Some(src) = stringify(ctx, to_object(ctx, value)?)? else {
        return Ok(Value::null(Type::Dynamic));
    };
    trace!(json = %src, "script value serialized");

    let ty = json::implied_type(&src).map_err(ConvertError::ImpliedType)?;
    json::unmarshal(&src, &ty).map_err(ConvertError::Decode)
}

/// `Object(value)`: primitives are boxed, objects pass through.
fn to_object<'js>(ctx: &Ctx<'js>, value: JsValue<'js>) -> Result<JsValue<'js>, ConvertError> {
    if value.is_object() || value.is_function() || value.is_array() {
        return Ok(value);
    }
    let object: Function = ctx.globals().get("Object")?;
    match object.call((value,)) {
        Ok(wrapped) => Ok(wrapped),
        Err(rquickjs::Error::Exception) => Err(ConvertError::Serialize(exception_message(ctx))),
        Err(e) => Err(ConvertError::Engine(e)),
    }
}

fn stringify<'js>(ctx: &Ctx<'js>, value: JsValue<'js>) -> Result<Option<String>, ConvertError> {
    match ctx.json_stringify(value) {
        Ok(Some(text)) => Ok(Some(text.to_string()?)),
        Ok(None) => Ok(None),
        Err(rquickjs::Error::Exception) => Err(ConvertError::Serialize(exception_message(ctx))),
        Err(e) => Err(ConvertError::Engine(e)),
    }
}

/// Takes the pending exception off `ctx` and describes it.
pub(crate) fn exception_message(ctx: &Ctx<'_>) -> String {
    let thrown = ctx.catch();
    if let Some(exception) = thrown.as_exception() {
        if let Some(message) = exception.message() {
            return message;
        }
    }
    thrown
        .as_string()
        .and_then(|s| s.to_string().ok())
        .unwrap_or_else(|| format!("uncaught {}", thrown.type_name()))
}
