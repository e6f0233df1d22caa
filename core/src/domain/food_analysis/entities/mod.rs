pub mod analysis_result;
pub mod food_image;
pub mod health_profile;

pub use analysis_result::*;
pub use food_image::*;
pub use health_profile::*;
