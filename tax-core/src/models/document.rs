use serde::{Deserialize, Serialize};

use super::FinancialData;

/// An uploaded document awaiting extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    /// MIME type as reported by the uploader.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Outcome of extracting financial data from a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentParseResult {
    pub success: bool,
    pub filename: String,
    pub extracted_data: FinancialData,
    /// In `[0, 1]`.
    pub confidence_score: f64,
    /// Leading excerpt of the cleaned document text.
    pub extracted_text: Option<String>,
    /// Seconds spent extracting.
    pub processing_time: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}
