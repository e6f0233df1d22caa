use axum::extract::Multipart;
use platewise_core::domain::food_analysis::entities::{FoodImage, HealthProfile};
use tracing::debug;
use validator::Validate;

use super::validators::HealthProfileForm;
use crate::application::http::server::api_entities::api_error::ApiError;

/// The capture form after multipart decoding.
#[derive(Debug, Clone)]
pub struct AnalysisForm {
    pub image: Option<FoodImage>,
    pub profile: HealthProfile,
}

/// Reads the `image`, `disease` and `allergies` fields. An empty file part
/// (a form submitted without a selection) counts as no image.
pub async fn read_analysis_form(
    multipart: &mut Multipart,
    max_image_bytes: usize,
) -> Result<AnalysisForm, ApiError> {
    let mut image: Option<FoodImage> = None;
    let mut form = HealthProfileForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.is_empty() {
                    continue;
                }
                if data.len() > max_image_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "Image too large. Max size is {} bytes",
                        max_image_bytes
                    )));
                }

                debug!(content_type = %content_type, size = data.len(), "Image received");
                image = Some(FoodImage::from_bytes(&content_type, &data)?);
            }
            "disease" => {
                form.disease = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read disease: {}", e))
                })?;
            }
            "allergies" => {
                form.allergies = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read allergies: {}", e))
                })?;
            }
            _ => {}
        }
    }

    form.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(AnalysisForm {
        image,
        profile: form.into(),
    })
}
