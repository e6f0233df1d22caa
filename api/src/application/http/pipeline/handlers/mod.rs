pub mod stream_pipeline;
