pub mod exchange_handler;

pub use exchange_handler::exchange_handler;
