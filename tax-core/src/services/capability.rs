use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ChatQuery, ChatResponse, Document, DocumentParseResult};

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Turns an uploaded document into financial data.
///
/// The tax engine never calls this; callers feed the extracted data into the
/// engine themselves.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Short identifier reported by health checks.
    fn name(&self) -> &'static str;

    async fn extract_financial_data(
        &self,
        document: &Document,
    ) -> Result<DocumentParseResult, CapabilityError>;
}

/// Answers free-form tax questions.
#[async_trait]
pub trait TaxAssistant: Send + Sync {
    /// Short identifier reported by health checks.
    fn name(&self) -> &'static str;

    async fn answer_query(
        &self,
        query: &ChatQuery,
    ) -> Result<ChatResponse, CapabilityError>;
}
