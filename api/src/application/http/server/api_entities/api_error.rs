use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platewise_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::NotFound(_) => "E_NOT_FOUND",
            ApiError::UnprocessableEntity(_) => "E_UNPROCESSABLE_ENTITY",
            ApiError::PayloadTooLarge(_) => "E_PAYLOAD_TOO_LARGE",
            ApiError::BadGateway(_) => "E_BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "E_SERVICE_UNAVAILABLE",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
        }
    }

    /// Text shown to the user, in the HTML notification or the JSON body.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::UnprocessableEntity(message)
            | ApiError::PayloadTooLarge(message)
            | ApiError::BadGateway(message)
            | ApiError::ServiceUnavailable(message)
            | ApiError::InternalServerError(message) => message,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        match error {
            CoreError::Validation(_)
            | CoreError::NoImageSelected
            | CoreError::UnsupportedImageType(_)
            | CoreError::InvalidImageData => ApiError::BadRequest(message),
            CoreError::ServiceDeclined { .. } => ApiError::UnprocessableEntity(message),
            CoreError::MissingApiKey => ApiError::ServiceUnavailable(message),
            CoreError::ServiceHttpError { .. }
            | CoreError::MalformedEnvelope(_)
            | CoreError::IncompleteAnalysis
            | CoreError::ExternalServiceError(_) => ApiError::BadGateway(message),
            CoreError::NotFound => ApiError::NotFound(message),
            CoreError::StorageError(_) | CoreError::ReportError(_) => {
                tracing::error!("{}", message);
                ApiError::InternalServerError(message)
            }
            CoreError::InternalServerError => ApiError::InternalServerError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiErrorResponse {
            code: self.code().to_string(),
            status: status.as_u16(),
            message: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_image_is_unprocessable() {
        let error = ApiError::from(CoreError::ServiceDeclined {
            reason: "non_food_image".to_string(),
            message: "Not food.".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.message(), "Not food.");
    }

    #[test]
    fn test_upstream_failures_are_bad_gateway() {
        let error = ApiError::from(CoreError::ServiceHttpError {
            status: 429,
            message: Some("Quota exceeded".to_string()),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.message(), "Gemini API error: 429 - Quota exceeded");
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        let error = ApiError::from(CoreError::MissingApiKey);
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.code(), "E_SERVICE_UNAVAILABLE");
    }
}
