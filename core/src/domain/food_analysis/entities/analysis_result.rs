use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// The record exchanged between the capture and render stages.
///
/// Either a nutritional analysis (`food_item` and/or nutrient fields) or a
/// declined variant carrying `error` and `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub food_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub calories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub carbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub fiber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub sugar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub sodium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub health_compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_nutrients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_benefits: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_risks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diseases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResult {
    pub fn is_declined(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_analysis(&self) -> bool {
        !self.is_declined() && (self.food_item.is_some() || self.has_nutrients())
    }

    pub fn has_nutrients(&self) -> bool {
        [
            &self.calories,
            &self.protein,
            &self.carbs,
            &self.fat,
            &self.fiber,
            &self.sugar,
            &self.sodium,
        ]
        .iter()
        .any(|field| field.is_some())
    }

    pub fn with_profile(mut self, diseases: &str, allergies: &str) -> Self {
        self.diseases = Some(diseases.to_string());
        self.allergies = Some(allergies.to_string());
        self
    }
}

/// Accepts strings as-is and stringifies bare numbers and booleans.
///
/// Models occasionally answer `"calories": 95` instead of `"95 kcal"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_payload() {
        let record: AnalysisResult = serde_json::from_str(
            r#"{"foodItem":"Apple","calories":"95 kcal","keyNutrients":["Fiber"],"confidence":0.9}"#,
        )
        .unwrap();

        assert_eq!(record.food_item.as_deref(), Some("Apple"));
        assert_eq!(record.calories.as_deref(), Some("95 kcal"));
        assert_eq!(record.key_nutrients, Some(vec!["Fiber".to_string()]));
        assert_eq!(record.confidence, Some(0.9));
        assert!(record.is_analysis());
    }

    #[test]
    fn test_bare_numbers_are_kept_as_strings() {
        let record: AnalysisResult =
            serde_json::from_str(r#"{"foodItem":"Rice","calories":206,"protein":4.3}"#).unwrap();
        assert_eq!(record.calories.as_deref(), Some("206"));
        assert_eq!(record.protein.as_deref(), Some("4.3"));
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let record = AnalysisResult {
            food_item: Some("Toast".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"foodItem":"Toast"}"#);
    }

    #[test]
    fn test_error_variant_is_not_an_analysis() {
        let record: AnalysisResult =
            serde_json::from_str(r#"{"error":"non_food_image","message":"nope"}"#).unwrap();
        assert!(record.is_declined());
        assert!(!record.is_analysis());
    }

    #[test]
    fn test_object_in_text_field_is_rejected() {
        let parsed = serde_json::from_str::<AnalysisResult>(r#"{"foodItem":{"name":"x"}}"#);
        assert!(parsed.is_err());
    }
}
