//! `typed-value-js`: converts between [`typed_value`] values and QuickJS
//! values.
//!
//! The contract is JSON equivalence: converting a typed value into
//! JavaScript and running `JSON.stringify` on the result yields the same
//! text as [`typed_value::json::marshal`], and converting a JavaScript value
//! back is defined as decoding its `JSON.stringify` output under the
//! implied type.
//!
//! # Conversion rules
//!
//! | typed value | JavaScript value |
//! |---|---|
//! | unknown | panics |
//! | null of any type | `null` |
//! | object, map | object, properties defined in ascending key order |
//! | bool | boolean |
//! | string | string |
//! | number, integer in `i64` range | number (int when it fits `i32`) |
//! | any other number | nearest double (lossy) |
//! | list, set, tuple | array in iteration order (canonical for sets) |
//! | capsule | panics |
//!
//! | JavaScript value | typed value |
//! |---|---|
//! | `null`, `undefined` | null of dynamic type |
//! | anything else | `unmarshal(s, implied_type(s))` where `s = JSON.stringify(Object(v))` |
//!
//! Both functions take the context explicitly; a context must not be used
//! from two places at once, which `rquickjs` enforces through `Ctx<'js>`.
//!
//! # Example
//!
//! ```
//! use rquickjs::{Context, Runtime};
//! use typed_value::Value;
//! use typed_value_js::{from_js, to_js};
//!
//! let rt = Runtime::new().unwrap();
//! let context = Context::full(&rt).unwrap();
//! context.with(|ctx| {
//!     let input = Value::object([("name", Value::string("Ermintrude"))]);
//!     ctx.globals().set("v", to_js(&ctx, &input).unwrap()).unwrap();
//!
//!     let result = ctx.eval("({greeting: 'hello ' + v.name})").unwrap();
//!     let output = from_js(&ctx, result).unwrap();
//!     assert_eq!(output, Value::object([("greeting", Value::string("hello Ermintrude"))]));
//! });
//! ```

pub mod cli;
pub mod decode;
pub mod encode;
pub mod error;
pub mod number;

pub use decode::from_js;
pub use encode::to_js;
pub use error::ConvertError;
pub use number::NumberRepr;
