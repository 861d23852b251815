use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /
/// Service banner with the feature list.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Tax Filing Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "features": [
            "Old and new regime tax calculation",
            "Regime comparison with recommendation",
            "Tax-saving suggestions",
            "Form 16 text extraction",
            "Tax assistant chatbot"
        ]
    }))
}

/// GET /api/health
/// Per-service availability plus the providers and years in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let years: Vec<String> = state
        .engine
        .slab_table()
        .years()
        .iter()
        .map(ToString::to_string)
        .collect();

    Json(json!({
        "status": "healthy",
        "services": {
            "document_parser": true,
            "tax_calculator": !state.engine.slab_table().is_empty(),
            "chatbot": true
        },
        "providers": {
            "document_parser": state.parser.name(),
            "chatbot": state.assistant.name()
        },
        "assessment_years": years,
        "timestamp": Utc::now().to_rfc3339()
    }))
}
