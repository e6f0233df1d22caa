use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use platewise_core::{
    domain::common::{LLMConfig, PipelineConfig, PlatewiseConfig, StorageConfig},
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_ENDPOINT,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "platewise", about = "Food photo nutrition analysis server", version)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/platewise`. Empty serves from `/`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        num_args = 0..
    )]
    pub allowed_origins: Vec<String>,

    #[arg(
        long = "server-max-upload-bytes",
        env = "SERVER_MAX_UPLOAD_BYTES",
        default_value_t = 10 * 1024 * 1024
    )]
    pub max_upload_bytes: usize,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(
        long = "gemini-api-key",
        env = "GEMINI_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash-exp")]
    pub model: String,

    #[arg(long = "gemini-endpoint", env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub endpoint: String,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.4)]
    pub temperature: f32,

    #[arg(long = "llm-max-output-tokens", env = "LLM_MAX_OUTPUT_TOKENS", default_value_t = 1024)]
    pub max_output_tokens: u32,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct StorageArgs {
    /// JSON file holding the latest analysis. In-memory when unset.
    #[arg(long = "storage-path", env = "STORAGE_PATH")]
    pub path: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PipelineArgs {
    #[arg(
        long = "pipeline-tick-ms",
        env = "PIPELINE_TICK_MS",
        default_value_t = 250,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    #[arg(
        long = "pipeline-completion-delay-ms",
        env = "PIPELINE_COMPLETION_DELAY_MS",
        default_value_t = 500
    )]
    pub completion_delay_ms: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    /// Used when RUST_LOG is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for PlatewiseConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.api_key,
                gemini_model: args.llm.model,
                gemini_endpoint: args.llm.endpoint,
                temperature: args.llm.temperature,
                max_output_tokens: args.llm.max_output_tokens,
                request_timeout_secs: args.llm.request_timeout_secs,
            },
            storage: StorageConfig {
                path: args.storage.path,
            },
            pipeline: PipelineConfig {
                tick_interval: Duration::from_millis(args.pipeline.tick_ms),
                completion_delay: Duration::from_millis(args.pipeline.completion_delay_ms),
            },
        }
    }
}
