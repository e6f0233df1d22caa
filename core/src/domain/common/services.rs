use std::sync::Arc;

use crate::domain::{
    common::PipelineConfig,
    food_analysis::{ports::LLMClient, value_objects::GenerationSettings},
    storage::{ports::KeyValueStore, services::AnalysisStore},
};

pub struct Service<LLM, KV>
where
    LLM: LLMClient,
    KV: KeyValueStore,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) analysis_store: AnalysisStore<KV>,
    pub(crate) generation: GenerationSettings,
    pub(crate) pipeline: PipelineConfig,
}

impl<LLM, KV> Clone for Service<LLM, KV>
where
    LLM: LLMClient,
    KV: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            analysis_store: self.analysis_store.clone(),
            generation: self.generation.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<LLM, KV> Service<LLM, KV>
where
    LLM: LLMClient,
    KV: KeyValueStore,
{
    pub fn new(
        llm_client: LLM,
        store: KV,
        generation: GenerationSettings,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            analysis_store: AnalysisStore::new(store),
            generation,
            pipeline,
        }
    }

    pub fn pipeline_config(&self) -> &PipelineConfig {
        &self.pipeline
    }
}
