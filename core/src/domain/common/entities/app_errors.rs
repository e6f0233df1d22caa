use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Please select a food image first.")]
    NoImageSelected,

    #[error("Please select an image file (JPEG, PNG, etc.), got {0}")]
    UnsupportedImageType(String),

    #[error("Image data is not a valid base64 data URL")]
    InvalidImageData,

    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Gemini API error: {status} - {}", message.as_deref().unwrap_or("Unknown error"))]
    ServiceHttpError { status: u16, message: Option<String> },

    #[error("{message}")]
    ServiceDeclined { reason: String, message: String },

    #[error("Malformed LLM response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Invalid analysis data received from Gemini API")]
    IncompleteAnalysis,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Report generation failed: {0}")]
    ReportError(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Errors caused by what the user submitted, as opposed to the service or the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_)
                | CoreError::NoImageSelected
                | CoreError::UnsupportedImageType(_)
                | CoreError::InvalidImageData
                | CoreError::ServiceDeclined { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_defaults_to_unknown() {
        let err = CoreError::ServiceHttpError {
            status: 503,
            message: None,
        };
        assert_eq!(err.to_string(), "Gemini API error: 503 - Unknown error");
    }

    #[test]
    fn test_declined_displays_service_message() {
        let err = CoreError::ServiceDeclined {
            reason: "non_food_image".to_string(),
            message: "Not food".to_string(),
        };
        assert_eq!(err.to_string(), "Not food");
        assert!(err.is_client_error());
    }
}
