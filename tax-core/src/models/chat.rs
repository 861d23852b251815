use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxRegime;

/// What the caller already knows about the taxpayer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatContext {
    pub total_income: Option<Decimal>,
    pub section_80c: Option<Decimal>,
    pub recommended_regime: Option<TaxRegime>,
    pub savings_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub message: String,
    #[serde(default)]
    pub context: Option<ChatContext>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub sources: Vec<String>,
    pub follow_up_questions: Vec<String>,
    /// Seconds spent answering.
    pub response_time: f64,
}
