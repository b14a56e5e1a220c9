use thiserror::Error;
use typed_value::json::JsonError;

/// Failure to turn a script value into a typed value.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// `JSON.stringify` threw, e.g. on a circular structure or a BigInt.
    #[error("JSON serialization failed: {0}")]
    Serialize(String),

    #[error("cannot infer a type for the serialized value: {0}")]
    ImpliedType(#[source] JsonError),

    #[error("cannot decode the serialized value: {0}")]
    Decode(#[source] JsonError),

    #[error("script engine error: {0}")]
    Engine(#[from] rquickjs::Error),
}
