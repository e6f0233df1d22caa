pub mod common;
pub mod food_analysis;
pub mod pipeline;
pub mod report;
pub mod storage;
