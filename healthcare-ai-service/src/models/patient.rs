//! Patient attributes submitted to `POST /get-report`.

use serde::Deserialize;
use serde_json::Value;

/// Risk assessment input. Every attribute is optional and accepted as any
/// JSON scalar; nothing is validated or coerced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientProfile {
    #[serde(rename = "Age", default)]
    pub age: Option<Value>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<Value>,
    #[serde(rename = "BMI", default)]
    pub bmi: Option<Value>,
    #[serde(rename = "Blood Pressure Status", default)]
    pub blood_pressure_status: Option<Value>,
    #[serde(rename = "Smoking Status", default)]
    pub smoking_status: Option<Value>,
    #[serde(rename = "Physical Activity", default)]
    pub physical_activity: Option<Value>,
    #[serde(rename = "Family History of NCDs", default)]
    pub family_history: Option<Value>,
}

impl PatientProfile {
    /// Prompt labels paired with rendered values, in report order.
    pub fn fields(&self) -> [(&'static str, String); 7] {
        [
            ("Age", render_field(self.age.as_ref())),
            ("Gender", render_field(self.gender.as_ref())),
            ("BMI", render_field(self.bmi.as_ref())),
            ("BP Status", render_field(self.blood_pressure_status.as_ref())),
            ("Smoking", render_field(self.smoking_status.as_ref())),
            ("Activity", render_field(self.physical_activity.as_ref())),
            ("Family History", render_field(self.family_history.as_ref())),
        ]
    }
}

/// Render a loosely typed request value for inclusion in a prompt.
///
/// Absent and `null` values render as an empty string; strings are inserted
/// without quotes.
pub fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
