pub mod health_handler;
pub mod oauth;

pub use health_handler::health_handler;
