use serde::Deserialize;
use serde_json::Value;

use super::render_field;

pub const DEFAULT_TARGET_CALORIES: u32 = 2000;
pub const DEFAULT_DIETARY_GOAL: &str = "Maintain Weight";

/// Meal plan input for `POST /generate-diet`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietRequest {
    #[serde(default)]
    pub target_calories: Option<Value>,
    #[serde(default)]
    pub dietary_goal: Option<Value>,
}

impl DietRequest {
    pub fn target_calories(&self) -> String {
        match &self.target_calories {
            None | Some(Value::Null) => DEFAULT_TARGET_CALORIES.to_string(),
            Some(value) => render_field(Some(value)),
        }
    }

    pub fn dietary_goal(&self) -> String {
        match &self.dietary_goal {
            None | Some(Value::Null) => DEFAULT_DIETARY_GOAL.to_string(),
            Some(value) => render_field(Some(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_uses_defaults() {
        let request: DietRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.target_calories(), "2000");
        assert_eq!(request.dietary_goal(), "Maintain Weight");
    }

    #[test]
    fn null_values_use_defaults() {
        let request: DietRequest =
            serde_json::from_value(json!({"targetCalories": null, "dietaryGoal": null})).unwrap();
        assert_eq!(request.target_calories(), "2000");
        assert_eq!(request.dietary_goal(), "Maintain Weight");
    }

    #[test]
    fn supplied_values_are_used_verbatim() {
        let request: DietRequest =
            serde_json::from_value(json!({"targetCalories": 1500, "dietaryGoal": "Lose Weight"}))
                .unwrap();
        assert_eq!(request.target_calories(), "1500");
        assert_eq!(request.dietary_goal(), "Lose Weight");
    }

    #[test]
    fn string_calories_are_not_coerced() {
        let request: DietRequest =
            serde_json::from_value(json!({"targetCalories": "1750"})).unwrap();
        assert_eq!(request.target_calories(), "1750");
    }
}
