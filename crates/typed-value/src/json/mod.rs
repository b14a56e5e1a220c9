//! JSON layer of the typed value model.
//!
//! - [`implied_type`] infers a type from the shape of a document.
//! - [`unmarshal`] decodes a document as a value of a given type.
//! - [`marshal`] encodes a value as a document.
//!
//! Numbers are handled with full decimal precision in both directions.

mod error;
mod implied;
mod marshal;
mod simple;
mod text;
mod unmarshal;

pub use error::{JsonError, Path, PathStep};
pub use implied::{implied_type, implied_type_of};
pub use marshal::{marshal, to_json_value};
pub use simple::SimpleJsonValue;
pub use unmarshal::{from_json_value, unmarshal};
