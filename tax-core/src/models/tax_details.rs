use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxRegime;

/// Tax attributed to one slab of a regime's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlabDetail {
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    /// Percent, e.g. `20` for 20%.
    pub rate: Decimal,
    pub tax_amount: Decimal,
}

/// Full tax computation for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeTaxDetails {
    pub regime: TaxRegime,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub total_deductions: Decimal,
    pub tax_before_cess: Decimal,
    /// Health and Education Cess on `tax_before_cess`.
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub tax_slabs: Vec<TaxSlabDetail>,
    /// Percent of gross income, rounded to two decimal places.
    pub effective_tax_rate: Decimal,
    pub tds_deducted: Decimal,
    pub advance_tax: Decimal,
    /// Positive means more tax is payable, negative means a refund is due.
    pub refund_or_payable: Decimal,
}

/// Both regimes side by side with a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub old_regime: RegimeTaxDetails,
    pub new_regime: RegimeTaxDetails,
    pub recommended_regime: TaxRegime,
    /// Absolute difference between the two regimes' total tax.
    pub savings_amount: Decimal,
    pub calculation_timestamp: DateTime<Utc>,
}

impl TaxCalculation {
    pub fn details_for(
        &self,
        regime: TaxRegime,
    ) -> &RegimeTaxDetails {
        match regime {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }

    pub fn recommended(&self) -> &RegimeTaxDetails {
        self.details_for(self.recommended_regime)
    }
}

/// Headline figures for one regime inside a [`RegimeComparison`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeBreakdown {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_liability: Decimal,
    pub effective_rate: Decimal,
}

impl From<&RegimeTaxDetails> for RegimeBreakdown {
    fn from(details: &RegimeTaxDetails) -> Self {
        Self {
            gross_income: details.gross_income,
            total_deductions: details.total_deductions,
            taxable_income: details.taxable_income,
            tax_liability: details.total_tax,
            effective_rate: details.effective_tax_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonBreakdown {
    pub old_regime: RegimeBreakdown,
    pub new_regime: RegimeBreakdown,
}

/// Summary comparison with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime_tax: Decimal,
    pub new_regime_tax: Decimal,
    pub difference: Decimal,
    pub recommended: TaxRegime,
    pub reason: String,
    pub breakdown: ComparisonBreakdown,
}
