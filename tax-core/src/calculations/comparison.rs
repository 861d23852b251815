//! Human-readable regime comparison.

use crate::calculations::common::format_rupees;
use crate::calculations::engine::TaxEngine;
use crate::models::{
    ComparisonBreakdown, FinancialData, RegimeBreakdown, RegimeComparison, TaxCalculation,
    TaxRegime,
};

impl TaxEngine {
    /// Compares both regimes and explains the recommendation.
    pub fn regime_comparison(
        &self,
        data: &FinancialData,
        assessment_year: &str,
    ) -> RegimeComparison {
        RegimeComparison::from(&self.compare_regimes(data, assessment_year))
    }
}

impl From<&TaxCalculation> for RegimeComparison {
    fn from(calculation: &TaxCalculation) -> Self {
        let old_tax = calculation.old_regime.total_tax;
        let new_tax = calculation.new_regime.total_tax;
        let difference = calculation.savings_amount;

        let reason = if old_tax < new_tax {
            format!(
                "Old regime saves ₹{} due to available deductions",
                format_rupees(difference)
            )
        } else if new_tax < old_tax {
            format!(
                "New regime saves ₹{} due to lower tax rates",
                format_rupees(difference)
            )
        } else {
            "Both regimes result in similar tax liability".to_string()
        };

        Self {
            old_regime_tax: old_tax,
            new_regime_tax: new_tax,
            difference,
            recommended: calculation.recommended_regime,
            reason,
            breakdown: ComparisonBreakdown {
                old_regime: RegimeBreakdown::from(calculation.details_for(TaxRegime::Old)),
                new_regime: RegimeBreakdown::from(calculation.details_for(TaxRegime::New)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FinancialDataInput;

    #[test]
    fn old_regime_reason_names_savings() {
        let data: FinancialData = FinancialDataInput {
            basic_salary: dec!(600000),
            hra: dec!(240000),
            special_allowance: dec!(80000),
            other_allowances: dec!(120000),
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            section_24: dec!(200000),
            ..Default::default()
        }
        .into();

        let comparison = TaxEngine::default().regime_comparison(&data, "2024-25");

        assert_eq!(comparison.recommended, TaxRegime::Old);
        assert_eq!(comparison.difference, dec!(23920));
        assert_eq!(
            comparison.reason,
            "Old regime saves ₹23,920 due to available deductions"
        );
        assert_eq!(comparison.breakdown.old_regime.tax_liability, dec!(36920));
        assert_eq!(comparison.breakdown.new_regime.taxable_income, dec!(990000));
        assert_eq!(comparison.breakdown.new_regime.effective_rate, dec!(5.85));
    }

    #[test]
    fn new_regime_reason_names_lower_rates() {
        let data: FinancialData = FinancialDataInput {
            basic_salary: dec!(1550000),
            ..Default::default()
        }
        .into();

        let comparison = TaxEngine::default().regime_comparison(&data, "2024-25");

        assert_eq!(comparison.recommended, TaxRegime::New);
        assert_eq!(comparison.old_regime_tax - comparison.new_regime_tax, comparison.difference);
        assert!(comparison.reason.starts_with("New regime saves ₹"));
        assert!(comparison.reason.ends_with("due to lower tax rates"));
    }

    #[test]
    fn equal_tax_recommends_old() {
        let comparison = TaxEngine::default().regime_comparison(&FinancialData::default(), "2024-25");

        assert_eq!(comparison.recommended, TaxRegime::Old);
        assert_eq!(comparison.difference, Decimal::ZERO);
        assert_eq!(comparison.reason, "Both regimes result in similar tax liability");
    }
}
