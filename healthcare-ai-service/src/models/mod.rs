pub mod diet;
pub mod patient;
pub mod report;

pub use diet::DietRequest;
pub use patient::{render_field, PatientProfile};
pub use report::{RiskLevel, RiskReport};

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

/// Decode `bytes` as a JSON object into `T`.
///
/// Derived struct visitors also accept arrays, matching elements to fields by
/// position; payloads here are key/value mappings only, so anything other
/// than an object is rejected.
pub fn from_json_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    match serde_json::from_slice::<Value>(bytes)? {
        value @ Value::Object(_) => serde_json::from_value(value),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
