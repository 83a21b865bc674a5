pub mod api_key;
pub mod cors;

pub use api_key::require_api_key;
pub use cors::cors_layer;
