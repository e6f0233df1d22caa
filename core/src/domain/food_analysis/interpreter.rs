use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisResult, HealthProfile},
        value_objects::{Interpretation, RawServiceResponse},
    },
};

pub const NON_FOOD_REASON: &str = "non_food_image";
pub const NON_FOOD_MESSAGE: &str =
    "The uploaded image does not appear to contain food. Please upload a clear image of food.";
const DEFAULT_DECLINE_MESSAGE: &str = "The uploaded image is not recognized as food.";

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turns a raw model reply into an [`Interpretation`].
///
/// Transport-level failures (non-2xx, unreadable envelope) are errors. A
/// reply whose inner text is not valid JSON is never an error: it degrades to
/// either a non-food decline or a placeholder record.
pub fn interpret(
    raw: &RawServiceResponse,
    profile: &HealthProfile,
) -> Result<Interpretation, CoreError> {
    if !raw.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&raw.body)
            .ok()
            .and_then(|envelope| envelope.error.message);
        return Err(CoreError::ServiceHttpError {
            status: raw.status,
            message,
        });
    }

    let text = extract_text(&raw.body)?;

    let interpretation = match serde_json::from_str::<AnalysisResult>(&text) {
        Ok(record) if record.is_declined() => Interpretation::Declined {
            reason: record.error.unwrap_or_default(),
            message: record
                .message
                .unwrap_or_else(|| DEFAULT_DECLINE_MESSAGE.to_string()),
        },
        Ok(record) if record.is_analysis() => Interpretation::Analyzed(
            record.with_profile(&profile.diseases, &profile.allergies),
        ),
        Ok(_) => return Err(CoreError::IncompleteAnalysis),
        Err(e) => {
            warn!(error = %e, "Model reply is not valid analysis JSON, using fallback");
            classify_unparseable(&text, profile)
        }
    };

    debug!(outcome = interpretation.kind(), "Interpreted model reply");
    Ok(interpretation)
}

fn extract_text(body: &str) -> Result<String, CoreError> {
    let envelope: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::MalformedEnvelope(format!("invalid JSON envelope: {}", e)))?;

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| CoreError::MalformedEnvelope("no candidate text in response".to_string()))
}

fn classify_unparseable(text: &str, profile: &HealthProfile) -> Interpretation {
    let lowered = text.to_lowercase();
    if lowered.contains("not food") || lowered.contains("non-food") {
        return Interpretation::Declined {
            reason: NON_FOOD_REASON.to_string(),
            message: NON_FOOD_MESSAGE.to_string(),
        };
    }

    Interpretation::Degraded(fallback_record().with_profile(&profile.diseases, &profile.allergies))
}

/// A schema-valid record for replies that could not be read.
pub fn fallback_record() -> AnalysisResult {
    let na = || Some("N/A".to_string());

    AnalysisResult {
        food_item: Some("Unknown food item".to_string()),
        summary: Some("Analysis completed with limitations.".to_string()),
        calories: na(),
        protein: na(),
        carbs: na(),
        fat: na(),
        fiber: na(),
        sugar: na(),
        sodium: na(),
        health_compatibility: Some(
            "Unable to determine health compatibility due to analysis limitations.".to_string(),
        ),
        confidence: Some(0.5),
        key_nutrients: Some(vec!["Unable to determine nutrients".to_string()]),
        health_benefits: Some(vec!["Unable to determine benefits".to_string()]),
        health_risks: Some(vec!["Unable to determine risks".to_string()]),
        ..Default::default()
    }
}
