use base64::{Engine as _, engine::general_purpose};

use crate::domain::common::entities::app_errors::CoreError;

/// An uploaded image held as its mime type and raw base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodImage {
    mime_type: String,
    payload: String,
}

impl FoodImage {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::NoImageSelected);
        }
        if !mime_type.starts_with("image/") {
            return Err(CoreError::UnsupportedImageType(mime_type.to_string()));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: general_purpose::STANDARD.encode(bytes),
        })
    }

    /// Parses `data:<mime>;base64,<payload>`.
    pub fn from_data_url(data_url: &str) -> Result<Self, CoreError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or(CoreError::InvalidImageData)?;
        let (header, payload) = rest.split_once(',').ok_or(CoreError::InvalidImageData)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(CoreError::InvalidImageData)?;

        if payload.is_empty() {
            return Err(CoreError::NoImageSelected);
        }
        if !mime_type.starts_with("image/") {
            return Err(CoreError::UnsupportedImageType(mime_type.to_string()));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without the `data:...;base64,` prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }

    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        general_purpose::STANDARD
            .decode(&self.payload)
            .map_err(|_| CoreError::InvalidImageData)
    }
}
