use serde::Serialize;

use crate::domain::food_analysis::{
    entities::{FoodImage, HealthProfile},
    value_objects::GenerationSettings,
};

pub const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

/// Builds the body for a multimodal `generateContent` call.
pub fn build_analysis_request(
    image: &FoodImage,
    profile: &HealthProfile,
    settings: &GenerationSettings,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: build_instruction(profile),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().to_string(),
                        data: image.payload().to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        },
    }
}

pub fn health_info_text(profile: &HealthProfile) -> String {
    if profile.is_empty() {
        return "The user has no specific health conditions.".to_string();
    }

    let mut text = String::from("The user has the following health conditions:\n");
    if !profile.diseases.is_empty() {
        text.push_str(&format!("- Diseases: {}\n", profile.diseases));
    }
    if !profile.allergies.is_empty() {
        text.push_str(&format!("- Allergies: {}\n", profile.allergies));
    }
    text
}

pub fn build_instruction(profile: &HealthProfile) -> String {
    format!(
        r#"You are an expert nutritionist and food safety analyst. Your task is to analyze food images and provide detailed nutritional information and health recommendations.

INSTRUCTIONS:
1. First, determine if the image actually contains food. If it doesn't, respond with a JSON object containing ONLY: {{"error": "non_food_image", "message": "The uploaded image does not appear to contain food. Please upload a clear image of food."}}
2. If the image contains food, analyze it and respond ONLY with a JSON object containing the following keys:

RESPONSE FORMAT:
{{
  "foodItem": "Name of the food item",
  "summary": "A brief 1-2 sentence summary of the analysis",
  "calories": "Calories content (e.g., '250 kcal')",
  "protein": "Protein content (e.g., '15g')",
  "carbs": "Carbohydrate content (e.g., '30g')",
  "fat": "Fat content (e.g., '10g')",
  "fiber": "Fiber content (e.g., '5g')",
  "sugar": "Sugar content (e.g., '8g')",
  "sodium": "Sodium content (e.g., '450mg')",
  "healthCompatibility": "Personalized health recommendation based on the provided conditions",
  "confidence": 0.95,
  "keyNutrients": ["Nutrient 1", "Nutrient 2", "Nutrient 3"],
  "healthBenefits": ["Benefit 1", "Benefit 2"],
  "healthRisks": ["Risk 1", "Risk 2"]
}}

USER HEALTH INFORMATION:
{health_info}

IMPORTANT GUIDELINES:
- If the user provides non-health related information, acknowledge it but focus on actual health conditions
- If the user provides irrelevant or inappropriate content, respond with health-focused analysis anyway
- Always provide constructive health advice
- NEVER respond with harmful or misleading information
- If you cannot identify the food, respond with: {{"error": "unidentifiable_food", "message": "Could not identify the food in the image. Please try another image."}}

Analyze the food image and provide detailed nutritional information."#,
        health_info = health_info_text(profile)
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn image() -> FoodImage {
        FoodImage::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let request = build_analysis_request(
            &image(),
            &HealthProfile::default(),
            &GenerationSettings::default(),
        );
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["contents"][0]["parts"][1],
            json!({"inline_data": {"mime_type": "image/jpeg", "data": "/9j/4AAQ"}})
        );
        assert_eq!(body["generationConfig"]["temperature"], json!(0.4_f32));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], json!(1024));
        assert_eq!(
            body["generationConfig"]["response_mime_type"],
            json!("application/json")
        );
        assert!(body["contents"][0]["parts"][0]["text"].is_string());
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let request = build_analysis_request(
            &image(),
            &HealthProfile::default(),
            &GenerationSettings::default(),
        );
        let body = serde_json::to_string(&request).unwrap();
        assert!(!body.contains("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_health_fields_are_embedded_verbatim() {
        let profile = HealthProfile::new("Type 2 diabetes", "\"peanuts\" {tree nuts}");
        let text = build_instruction(&profile);

        assert!(text.contains("The user has the following health conditions:"));
        assert!(text.contains("- Diseases: Type 2 diabetes\n"));
        assert!(text.contains("- Allergies: \"peanuts\" {tree nuts}\n"));
    }

    #[test]
    fn test_only_provided_fields_are_listed() {
        let text = health_info_text(&HealthProfile::new("", "lactose"));
        assert!(!text.contains("Diseases"));
        assert!(text.contains("- Allergies: lactose"));
    }

    #[test]
    fn test_empty_profile_sentence() {
        let text = build_instruction(&HealthProfile::default());
        assert!(text.contains("The user has no specific health conditions."));
    }
}
