//! HTTP service exposing the tax engine, document extraction and the tax
//! assistant as JSON endpoints.

pub mod assistant;
pub mod config;
pub mod errors;
pub mod extract;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use errors::ApiError;
pub use routes::build_router;
pub use state::AppState;
