use tracing::info;

use crate::{
    domain::{
        common::{PlatewiseConfig, entities::app_errors::CoreError, services::Service},
        food_analysis::value_objects::GenerationSettings,
    },
    infrastructure::{llm::GeminiLLMClient, storage::StoreBackend},
};

pub type PlatewiseService = Service<GeminiLLMClient, StoreBackend>;

/// Wires the Gemini client and the configured store into a service.
/// A missing API key is not fatal here; the live analysis path reports it
/// per request so the demo path keeps working.
pub fn create_service(config: PlatewiseConfig) -> Result<PlatewiseService, CoreError> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;
    let store = StoreBackend::from(&config.storage);

    info!(
        model = %config.llm.gemini_model,
        persistent = config.storage.path.is_some(),
        "Platewise service created"
    );

    Ok(Service::new(
        llm_client,
        store,
        GenerationSettings {
            temperature: config.llm.temperature,
            max_output_tokens: config.llm.max_output_tokens,
        },
        config.pipeline,
    ))
}
