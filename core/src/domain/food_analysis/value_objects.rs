use crate::domain::food_analysis::entities::{AnalysisResult, FoodImage, HealthProfile};

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    pub image: FoodImage,
    pub profile: HealthProfile,
}

/// Sampling settings sent with every analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_output_tokens: 1024,
        }
    }
}

/// Status and body of the HTTP exchange with the model endpoint, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawServiceResponse {
    pub status: u16,
    pub body: String,
}

impl RawServiceResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// What a model reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    Analyzed(AnalysisResult),
    /// The model refused: not food, or food it could not identify.
    Declined { reason: String, message: String },
    /// The reply was not parseable; a placeholder record stands in for it.
    Degraded(AnalysisResult),
}

impl Interpretation {
    pub fn kind(&self) -> &'static str {
        match self {
            Interpretation::Analyzed(_) => "analyzed",
            Interpretation::Declined { .. } => "declined",
            Interpretation::Degraded(_) => "degraded",
        }
    }
}
