//! Typed value → JavaScript conversions, checked from inside the engine.

use std::sync::Arc;

use rquickjs::{Context, Ctx, Runtime, Value as JsValue};
use typed_value::{CapsuleType, Type, Value};
use typed_value_js::to_js;

fn with_ctx<R>(f: impl for<'js> FnOnce(Ctx<'js>) -> R) -> R {
    let rt = Runtime::new().expect("runtime");
    let context = Context::full(&rt).expect("context");
    context.with(f)
}

/// Binds the converted value to `v` and runs `test`, which throws on failure.
fn check(given: Value, test: &str) {
    with_ctx(|ctx| {
        let got = to_js(&ctx, &given).expect("to_js");
        ctx.globals().set("v", got).expect("bind v");
        if ctx.eval::<JsValue, _>(test).is_err() {
            let thrown = ctx.catch();
            let message = thrown
                .as_exception()
                .and_then(|e| e.message())
                .unwrap_or_else(|| "unknown failure".to_owned());
            let repr = ctx
                .json_stringify(ctx.globals().get::<_, JsValue>("v").expect("v"))
                .ok()
                .flatten()
                .and_then(|s| s.to_string().ok())
                .unwrap_or_default();
            panic!("assertion failed for {given:?}\nGot:   {repr}\n{message}");
        }
    });
}

fn stringified(given: &Value) -> String {
    with_ctx(|ctx| {
        let got = to_js(&ctx, given).expect("to_js");
        ctx.json_stringify(got)
            .expect("stringify")
            .expect("defined")
            .to_string()
            .expect("utf-8")
    })
}

// ── Primitives ────────────────────────────────────────────────────────────

#[test]
fn null_of_any_type() {
    check(
        Value::null(Type::Dynamic),
        "if (v !== null) throw new Error('want null, but got ' + v)",
    );
    check(
        Value::null(Type::list(Type::String)),
        "if (v !== null) throw new Error('want null, but got ' + v)",
    );
}

#[test]
fn strings() {
    check(
        Value::string("hello"),
        "if (v !== 'hello') throw new Error('want \"hello\", but got ' + v)",
    );
}

#[test]
fn booleans() {
    check(Value::bool(true), "if (v !== true) throw new Error('want true, but got ' + v)");
    check(Value::bool(false), "if (v !== false) throw new Error('want false, but got ' + v)");
    assert_eq!(stringified(&Value::bool(true)), "true");
    assert_eq!(stringified(&Value::bool(false)), "false");
}

#[test]
fn integers() {
    check(Value::number_int(0), "if (v !== 0) throw new Error('want 0, but got ' + v)");
    check(Value::number_int(1), "if (v !== 1) throw new Error('want 1, but got ' + v)");
    check(Value::number_int(-5), "if (v !== -5) throw new Error('want -5, but got ' + v)");
    check(
        Value::number_int(9_007_199_254_740_991),
        "if (v != 9007199254740991) throw new Error('want 9007199254740991, but got ' + v)",
    );
}

#[test]
fn floats() {
    check(
        Value::number_float(1.5).unwrap(),
        "if (v !== 1.5) throw new Error('want 1.5, but got ' + v)",
    );
    assert_eq!(stringified(&Value::number_float(1.5).unwrap()), "1.5");
}

#[test]
fn numbers_beyond_i64_are_approximated() {
    let big = Value::number_parse("9223372036854775808").unwrap();
    assert_eq!(stringified(&big), "9223372036854776000");
    let precise = Value::number_parse("0.10000000000000000000001").unwrap();
    assert_eq!(stringified(&precise), "0.1");
}

#[test]
fn huge_exponents_overflow_to_infinity() {
    let huge = Value::number_parse("1e1000000000").unwrap();
    check(huge, "if (v !== Infinity) throw new Error('wrong result: ' + v);");
    let tiny = Value::number_parse("-1e-1000000000").unwrap();
    check(tiny, "if (v !== 0) throw new Error('wrong result: ' + v);");
}

// ── Objects and maps ──────────────────────────────────────────────────────

#[test]
fn object_keys_in_ascending_order() {
    check(
        Value::object([("name", Value::string("Ermintrude")), ("foo", Value::bool(true))]),
        r#"
        if (v.name !== 'Ermintrude') throw new Error('wrong name');
        if (v.foo !== true) throw new Error('wrong foo');
        var keys = [];
        for (var k in v) {
            keys.push(k);
        }
        if (keys.length != 2 || keys[0] != 'foo' || keys[1] != 'name')
            throw new Error('wrong keys: ' + keys);
        "#,
    );
}

#[test]
fn map_behaves_like_object() {
    let map = Value::map([("name", Value::string("Ermintrude"))]).unwrap();
    check(
        map.clone(),
        r#"
        if (v.name !== 'Ermintrude') throw new Error('wrong name');
        var keys = Object.keys(v);
        if (keys.length != 1 || keys[0] != 'name') throw new Error('wrong keys');
        "#,
    );
    let object = Value::object([("name", Value::string("Ermintrude"))]);
    assert_eq!(stringified(&map), stringified(&object));
}

#[test]
fn properties_are_enumerable_and_read_only() {
    check(
        Value::object([("a", Value::number_int(1))]),
        r#"
        var d = Object.getOwnPropertyDescriptor(v, 'a');
        if (!d.enumerable) throw new Error('not enumerable');
        if (d.writable) throw new Error('writable');
        if (d.configurable) throw new Error('configurable');
        "#,
    );
}

#[test]
fn every_attribute_becomes_a_property() {
    check(
        Value::map([
            ("", Value::number_int(1)),
            ("with space", Value::number_int(2)),
            ("\u{e9}", Value::number_int(3)),
        ])
        .unwrap(),
        r#"
        var keys = Object.keys(v);
        if (keys.length != 3) throw new Error('wrong keys: ' + keys);
        if (v[''] !== 1 || v['with space'] !== 2 || v['\u00e9'] !== 3)
            throw new Error('wrong values');
        "#,
    );
}

#[test]
fn empty_object_and_map() {
    check(Value::empty_object(), "if (JSON.stringify(v) != '{}') throw new Error('wrong result');");
    check(
        Value::map_empty(Type::String),
        "if (JSON.stringify(v) != '{}') throw new Error('wrong result');",
    );
}

// ── Sequences ─────────────────────────────────────────────────────────────

#[test]
fn tuple_and_list_keep_order() {
    check(
        Value::tuple(vec![Value::bool(true), Value::bool(false)]),
        "if (JSON.stringify(v) != '[true,false]') throw new Error('wrong result');",
    );
    check(
        Value::list(vec![Value::bool(true), Value::bool(false)]).unwrap(),
        "if (JSON.stringify(v) != '[true,false]') throw new Error('wrong result');",
    );
    check(
        Value::list(vec![Value::bool(true)]).unwrap(),
        "if (!Array.isArray(v)) throw new Error('not an array');",
    );
}

#[test]
fn set_in_canonical_order() {
    check(
        Value::set(vec![Value::string("b"), Value::string("a")]).unwrap(),
        r#"if (JSON.stringify(v) != '["a","b"]') throw new Error('wrong result');"#,
    );
}

#[test]
fn empty_sequences() {
    for given in [
        Value::empty_tuple(),
        Value::list_empty(Type::String),
        Value::set_empty(Type::String),
    ] {
        check(given, "if (JSON.stringify(v) != '[]') throw new Error('wrong result');");
    }
}

#[test]
fn nested_nulls() {
    let given = Value::object([
        ("a", Value::null(Type::String)),
        ("b", Value::tuple(vec![Value::null(Type::Bool)])),
    ]);
    assert_eq!(stringified(&given), r#"{"a":null,"b":[null]}"#);
}

// ── Preconditions ─────────────────────────────────────────────────────────

#[test]
#[should_panic(expected = "unknown value")]
fn unknown_value_panics() {
    with_ctx(|ctx| {
        let _ = to_js(&ctx, &Value::unknown(Type::String));
    });
}

#[test]
#[should_panic(expected = "unknown value")]
fn nested_unknown_value_panics() {
    let given = Value::object([("a", Value::unknown(Type::Bool))]);
    with_ctx(|ctx| {
        let _ = to_js(&ctx, &given);
    });
}

#[test]
#[should_panic(expected = "doesn't know how to convert")]
fn capsule_value_panics() {
    let given = Value::capsule(CapsuleType::new("file"), Arc::new(()));
    with_ctx(|ctx| {
        let _ = to_js(&ctx, &given);
    });
}
