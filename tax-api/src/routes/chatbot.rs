use axum::{Json, extract::State};
use tax_core::{CapabilityError, ChatQuery, ChatResponse};
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

const MAX_MESSAGE_CHARS: usize = 1000;

/// Answer given when the assistant reports itself unavailable.
fn fallback_response(message: &str) -> ChatResponse {
    ChatResponse {
        response: format!(
            "I understand you're asking: '{message}'. The tax assistant is unavailable right \
             now, so only general guidance can be offered."
        ),
        confidence: 0.7,
        sources: vec!["Fallback Response".to_string()],
        follow_up_questions: vec![
            "What tax documents do I need?".to_string(),
            "Should I use old or new regime?".to_string(),
            "How can I save more tax legally?".to_string(),
        ],
        response_time: 0.0,
    }
}

/// POST /api/chatbot
pub async fn handle_chatbot(
    State(state): State<AppState>,
    ApiJson(query): ApiJson<ChatQuery>,
) -> Result<Json<ChatResponse>, ApiError> {
    let chars = query.message.chars().count();
    if chars == 0 || chars > MAX_MESSAGE_CHARS {
        return Err(ApiError::Validation(format!(
            "message must be between 1 and {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let preview: String = query.message.chars().take(50).collect();
    info!(%preview, "processing chatbot query");

    match state.assistant.answer_query(&query).await {
        Ok(response) => Ok(Json(response)),
        Err(CapabilityError::Unavailable(reason)) => {
            warn!(%reason, "assistant unavailable, using fallback response");
            Ok(Json(fallback_response(&query.message)))
        }
        Err(err) => Err(err.into()),
    }
}
