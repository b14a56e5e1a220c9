use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{from_json_value, implied_type_of, to_json_value};
use crate::Value;

/// A [`Value`] that serializes as plain JSON under its own type and
/// deserializes under the document's implied type.
///
/// Useful for embedding typed values in serde-derived structures when no
/// schema is at hand. Type information that JSON cannot express (sets,
/// maps, lists) does not survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleJsonValue(pub Value);

impl Serialize for SimpleJsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json_value(&self.0, self.0.ty())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SimpleJsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        let ty = implied_type_of(&json);
        from_json_value(&json, &ty).map(SimpleJsonValue).map_err(D::Error::custom)
    }
}
