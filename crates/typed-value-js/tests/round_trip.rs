//! JSON equivalence between the two directions of the conversion.

use proptest::prelude::*;
use rquickjs::{Context, Ctx, Runtime};
use typed_value::json::marshal;
use typed_value::{Type, Value};
use typed_value_js::number::MAX_SAFE_INTEGER;
use typed_value_js::{from_js, to_js};

fn with_ctx<R>(f: impl for<'js> FnOnce(Ctx<'js>) -> R) -> R {
    let rt = Runtime::new().expect("runtime");
    let context = Context::full(&rt).expect("context");
    context.with(f)
}

fn stringify_encoded(value: &Value) -> String {
    with_ctx(|ctx| {
        let js = to_js(&ctx, value).expect("to_js");
        ctx.json_stringify(js)
            .expect("stringify")
            .expect("defined")
            .to_string()
            .expect("utf-8")
    })
}

fn round_trip(value: &Value) -> Value {
    with_ctx(|ctx| {
        let js = to_js(&ctx, value).expect("to_js");
        from_js(&ctx, js).expect("from_js")
    })
}

fn sample() -> Value {
    Value::object([
        ("name", Value::string("Ermintrude")),
        ("enabled", Value::bool(true)),
        ("ratio", Value::number_float(0.25).unwrap()),
        ("tags", Value::set(vec![Value::string("b"), Value::string("a")]).unwrap()),
        (
            "limits",
            Value::map([("memory", Value::number_int(64)), ("cpu", Value::number_int(2))]).unwrap(),
        ),
        ("pair", Value::tuple(vec![Value::null(Type::String), Value::list_empty(Type::Bool)])),
    ])
}

#[test]
fn stringify_matches_marshal() {
    let value = sample();
    let expected = marshal(&value, value.ty()).unwrap();
    assert_eq!(stringify_encoded(&value), expected);
    assert_eq!(
        expected,
        r#"{"enabled":true,"limits":{"cpu":2,"memory":64},"name":"Ermintrude","pair":[null,[]],"ratio":0.25,"tags":["a","b"]}"#
    );
}

#[test]
fn round_trip_preserves_json_text() {
    let value = sample();
    let back = round_trip(&value);
    // Collection types collapse to their JSON shapes; the text does not change.
    assert!(back.ty().attribute_type("tags").is_some_and(Type::is_tuple_type));
    assert_eq!(marshal(&back, back.ty()).unwrap(), marshal(&value, value.ty()).unwrap());
}

#[test]
fn booleans_round_trip() {
    assert_eq!(round_trip(&Value::bool(true)), Value::bool(true));
    assert_eq!(round_trip(&Value::bool(false)), Value::bool(false));
}

#[test]
fn null_round_trips_as_dynamic() {
    assert_eq!(round_trip(&Value::null(Type::String)), Value::null(Type::Dynamic));
}

proptest! {
    #[test]
    fn safe_integers_are_exact(n in -(MAX_SAFE_INTEGER as i64)..=(MAX_SAFE_INTEGER as i64)) {
        let value = Value::number_int(n);
        prop_assert_eq!(round_trip(&value), value.clone());

        let loosely_equal = with_ctx(|ctx| {
            let js = to_js(&ctx, &value).expect("to_js");
            ctx.globals().set("v", js).expect("bind v");
            ctx.eval::<bool, _>(format!("v == {n}")).expect("eval")
        });
        prop_assert!(loosely_equal);
    }

    #[test]
    fn strings_round_trip(s in "\\PC*") {
        let value = Value::string(s.as_str());
        prop_assert_eq!(round_trip(&value), value);
    }
}
