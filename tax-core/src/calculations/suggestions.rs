//! Tax-saving suggestions from unused deduction headroom.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{format_rupees, round_half_up};
use crate::models::{
    CurrentDeductions, DeductionLimits, Difficulty, TaxRegime, TaxSavingSuggestion,
    TaxpayerCategory,
};

/// Marginal rate assumed when estimating savings.
const ASSUMED_MARGINAL_RATE: Decimal = dec!(0.30);

/// Suggestions for lowering tax under `regime`, highest priority first.
///
/// Under the old regime each of 80C, 80D and 80CCD(1B) with room left below
/// its cap yields one suggestion. The new regime allows none of those, so
/// the only suggestion is to compare against the old regime.
pub fn suggest_tax_savings(
    current: &CurrentDeductions,
    regime: TaxRegime,
    limits: &DeductionLimits,
) -> Vec<TaxSavingSuggestion> {
    let mut suggestions = match regime {
        TaxRegime::Old => old_regime_suggestions(current, limits),
        TaxRegime::New => vec![TaxSavingSuggestion {
            category: "Regime Comparison".to_string(),
            description: "Compare with old regime if you have significant deductions".to_string(),
            potential_savings: Decimal::ZERO,
            implementation_difficulty: Difficulty::Easy,
            priority: 1,
            details: "New regime has lower rates but limited deductions. Compare annually."
                .to_string(),
        }],
    };

    suggestions.sort_by_key(|s| s.priority);
    suggestions
}

fn old_regime_suggestions(
    current: &CurrentDeductions,
    limits: &DeductionLimits,
) -> Vec<TaxSavingSuggestion> {
    let mut suggestions = Vec::new();

    if let Some(remaining) = headroom(current.section_80c, limits.section_80c) {
        suggestions.push(TaxSavingSuggestion {
            category: "Section 80C Investment".to_string(),
            description: format!(
                "Invest ₹{} more in 80C instruments (PPF, ELSS, NSC, etc.)",
                format_rupees(remaining)
            ),
            potential_savings: estimated_savings(remaining),
            implementation_difficulty: Difficulty::Easy,
            priority: 1,
            details: "Popular options: PPF (15-year lock-in), ELSS (3-year lock-in), NSC (5-year)"
                .to_string(),
        });
    }

    let section_80d_cap = limits.section_80d.for_category(TaxpayerCategory::Individual);
    if let Some(remaining) = headroom(current.section_80d, section_80d_cap) {
        suggestions.push(TaxSavingSuggestion {
            category: "Health Insurance (80D)".to_string(),
            description: format!(
                "Increase health insurance premium by ₹{}",
                format_rupees(remaining)
            ),
            potential_savings: estimated_savings(remaining),
            implementation_difficulty: Difficulty::Easy,
            priority: 2,
            details: "Consider family floater plans or top-up insurance for better coverage"
                .to_string(),
        });
    }

    if let Some(remaining) = headroom(current.section_80ccd1b, limits.section_80ccd1b) {
        suggestions.push(TaxSavingSuggestion {
            category: "NPS Investment (80CCD1B)".to_string(),
            description: format!(
                "Additional NPS contribution of ₹{}",
                format_rupees(remaining)
            ),
            potential_savings: estimated_savings(remaining),
            implementation_difficulty: Difficulty::Medium,
            priority: 3,
            details: "Long-term retirement planning with tax benefits. Lock-in till 60 years."
                .to_string(),
        });
    }

    suggestions
}

fn headroom(
    claimed: Decimal,
    cap: Decimal,
) -> Option<Decimal> {
    let claimed = claimed.max(Decimal::ZERO);
    (claimed < cap).then(|| cap - claimed)
}

fn estimated_savings(remaining: Decimal) -> Decimal {
    round_half_up(remaining * ASSUMED_MARGINAL_RATE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_deductions_yields_three_old_regime_suggestions() {
        let suggestions = suggest_tax_savings(
            &CurrentDeductions::default(),
            TaxRegime::Old,
            &DeductionLimits::default(),
        );

        let categories: Vec<_> = suggestions.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Section 80C Investment",
                "Health Insurance (80D)",
                "NPS Investment (80CCD1B)"
            ]
        );
        assert_eq!(suggestions[0].potential_savings, dec!(45000));
        assert_eq!(suggestions[1].potential_savings, dec!(7500));
        assert_eq!(suggestions[2].potential_savings, dec!(15000));
        assert_eq!(suggestions[2].implementation_difficulty, Difficulty::Medium);
    }

    #[test]
    fn partial_80c_suggests_remaining_amount() {
        let current = CurrentDeductions {
            section_80c: dec!(100000),
            ..Default::default()
        };

        let suggestions = suggest_tax_savings(&current, TaxRegime::Old, &DeductionLimits::default());

        assert_eq!(
            suggestions[0].description,
            "Invest ₹50,000 more in 80C instruments (PPF, ELSS, NSC, etc.)"
        );
        assert_eq!(suggestions[0].potential_savings, dec!(15000));
    }

    #[test]
    fn maxed_sections_are_skipped() {
        let current = CurrentDeductions {
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            section_80ccd1b: dec!(20000),
        };

        let suggestions = suggest_tax_savings(&current, TaxRegime::Old, &DeductionLimits::default());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, 3);
        assert_eq!(suggestions[0].potential_savings, dec!(9000));
    }

    #[test]
    fn fully_claimed_old_regime_has_no_suggestions() {
        let current = CurrentDeductions {
            section_80c: dec!(200000),
            section_80d: dec!(25000),
            section_80ccd1b: dec!(50000),
        };

        let suggestions = suggest_tax_savings(&current, TaxRegime::Old, &DeductionLimits::default());

        assert!(suggestions.is_empty());
    }

    #[test]
    fn new_regime_suggests_comparison_only() {
        let suggestions = suggest_tax_savings(
            &CurrentDeductions::default(),
            TaxRegime::New,
            &DeductionLimits::default(),
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "Regime Comparison");
        assert_eq!(suggestions[0].potential_savings, Decimal::ZERO);
    }

    #[test]
    fn suggestions_are_sorted_by_priority() {
        let suggestions = suggest_tax_savings(
            &CurrentDeductions::default(),
            TaxRegime::Old,
            &DeductionLimits::default(),
        );

        assert!(suggestions.windows(2).all(|w| w[0].priority <= w[1].priority));
    }
}
