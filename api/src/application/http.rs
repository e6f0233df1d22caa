pub mod food_analysis;
pub mod health;
pub mod pages;
pub mod pipeline;
pub mod server;
