pub mod content_filter;
pub mod entities;
pub mod interpreter;
pub mod mock;
pub mod ports;
pub mod request_builder;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
