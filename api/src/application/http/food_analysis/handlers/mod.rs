pub mod analyze_food_image;
pub mod get_latest_analysis;
pub mod run_demo_analysis;
