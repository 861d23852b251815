mod assessment_year;
mod chat;
mod deduction_limits;
mod document;
mod financial_data;
mod suggestion;
mod tax_details;
mod tax_regime;
mod tax_slab;

pub use assessment_year::{AssessmentYear, AssessmentYearError};
pub use chat::{ChatContext, ChatQuery, ChatResponse};
pub use deduction_limits::{DeductionLimits, HealthInsuranceLimits, TaxpayerCategory};
pub use document::{Document, DocumentParseResult};
pub use financial_data::{FinancialData, FinancialDataInput, MAX_AMOUNT};
pub use suggestion::{CurrentDeductions, Difficulty, TaxSavingSuggestion};
pub use tax_details::{
    ComparisonBreakdown, RegimeBreakdown, RegimeComparison, RegimeTaxDetails, TaxCalculation,
    TaxSlabDetail,
};
pub use tax_regime::TaxRegime;
pub use tax_slab::TaxSlab;
