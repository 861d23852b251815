pub mod chatbot;
pub mod documents;
pub mod health;
pub mod tax;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
};

use crate::errors::ApiError;
use crate::state::AppState;

/// Multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        .route("/api/calculate-tax", post(tax::handle_calculate_tax))
        .route("/api/compare-regimes", post(tax::handle_compare_regimes))
        .route("/api/tax-slabs/:regime", get(tax::handle_tax_slabs))
        .route(
            "/api/tax-saving-suggestions",
            get(tax::handle_tax_saving_suggestions),
        )
        .route(
            "/api/upload",
            post(documents::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/chatbot", post(chatbot::handle_chatbot))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {uri}"))
}
