use std::time::Duration;

use reqwest::Client;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    food_analysis::{
        ports::LLMClient, request_builder::GenerateContentRequest,
        value_objects::RawServiceResponse,
    },
};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    endpoint: String,
    client: Client,
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            endpoint: config.gemini_endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model_name, self.api_key
        )
    }

    async fn call_gemini_api(
        &self,
        request: GenerateContentRequest,
    ) -> Result<RawServiceResponse, CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::MissingApiKey);
        }

        let response = self
            .client
            .post(self.generate_content_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read Gemini response body: {}", e);
            CoreError::ExternalServiceError(format!("Failed to read LLM response: {}", e))
        })?;

        if !status.is_success() {
            tracing::error!("Gemini API error: {} - {}", status, body);
        }

        Ok(RawServiceResponse::new(status.as_u16(), body))
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<RawServiceResponse, CoreError> {
        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::{
        entities::{FoodImage, HealthProfile},
        request_builder::build_analysis_request,
        value_objects::GenerationSettings,
    };

    fn config(api_key: &str) -> LLMConfig {
        LLMConfig {
            gemini_api_key: api_key.to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_endpoint: format!("{}/", DEFAULT_GEMINI_ENDPOINT),
            temperature: 0.4,
            max_output_tokens: 1024,
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_url_includes_model_and_key() {
        let client = GeminiLLMClient::new(&config("secret")).unwrap();
        assert_eq!(
            client.generate_content_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=secret"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let client = GeminiLLMClient::new(&config("  ")).unwrap();
        let image = FoodImage::from_bytes("image/jpeg", &[0xff, 0xd8]).unwrap();
        let request = build_analysis_request(
            &image,
            &HealthProfile::default(),
            &GenerationSettings::default(),
        );

        assert_eq!(
            client.generate_content(request).await.unwrap_err(),
            CoreError::MissingApiKey
        );
    }
}
