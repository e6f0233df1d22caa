use std::path::PathBuf;
use std::time::Duration;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct PlatewiseConfig {
    pub llm: LLMConfig,
    pub storage: StorageConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// File backing the key-value store. `None` keeps everything in memory.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub tick_interval: Duration,
    pub completion_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(250),
            completion_delay: Duration::from_millis(500),
        }
    }
}
