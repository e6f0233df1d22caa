use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisResult, FoodImage, HealthProfile},
        request_builder::GenerateContentRequest,
        value_objects::{AnalyzeFoodInput, RawServiceResponse},
    },
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends the request and returns the HTTP exchange as-is. Only transport
    /// failures are errors; status codes are left to the interpreter.
    fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> impl Future<Output = Result<RawServiceResponse, CoreError>> + Send;
}

/// Service trait for food analysis business logic
pub trait FoodAnalysisService: Send + Sync {
    /// Validates, calls the model, interprets and persists.
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    /// Runs the loading indicator to completion, then persists a mock record.
    /// The stored image is replaced by `image`, or cleared when there is none.
    fn run_demo_analysis(
        &self,
        profile: HealthProfile,
        image: Option<FoodImage>,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    fn latest_analysis(
        &self,
    ) -> impl Future<Output = Result<Option<AnalysisResult>, CoreError>> + Send;

    /// Data URL of the image that went with the latest analysis.
    fn latest_image(&self) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}
