//! `typed-value`: a statically-typed value model that is a superset of JSON.
//!
//! Every [`Value`] carries a [`Type`]. On top of JSON's data model the
//! types distinguish lists, sets and tuples, maps and objects, and add two
//! statuses JSON cannot express: *unknown* values (placeholders for results
//! not computed yet) and opaque *capsule* values.
//!
//! # Example
//!
//! ```
//! use typed_value::{json, Type, Value};
//!
//! let v = Value::object([
//!     ("name", Value::string("Ermintrude")),
//!     ("tags", Value::set(vec![Value::string("b"), Value::string("a")]).unwrap()),
//! ]);
//! let text = json::marshal(&v, v.ty()).unwrap();
//! assert_eq!(text, r#"{"name":"Ermintrude","tags":["a","b"]}"#);
//!
//! let ty = json::implied_type(&text).unwrap();
//! assert_eq!(ty, Type::object([
//!     ("name", Type::String),
//!     ("tags", Type::tuple(vec![Type::String, Type::String])),
//! ]));
//! ```

pub mod error;
pub mod iter;
pub mod json;
pub mod number;
pub mod ordering;
pub mod ty;
mod value;

pub use bigdecimal::BigDecimal;
pub use error::ValueError;
pub use iter::ElementIter;
pub use ordering::canonical_cmp;
pub use ty::{CapsuleType, Type};
pub use value::{CapsulePayload, Value};
