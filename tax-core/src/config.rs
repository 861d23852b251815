//! Engine configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::AssessmentYear;

/// Health and Education Cess applied on top of slab tax.
pub const DEFAULT_CESS_RATE: Decimal = dec!(0.04);

/// Tunables injected into [`crate::TaxEngine::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fraction of `tax_before_cess`, e.g. `0.04`.
    pub cess_rate: Decimal,

    /// Year used when a request names a malformed or unknown year.
    pub default_assessment_year: AssessmentYear,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cess_rate: DEFAULT_CESS_RATE,
            default_assessment_year: AssessmentYear::AY_2024_25,
        }
    }
}
