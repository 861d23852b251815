//! Regime-specific deduction totals.

use rust_decimal::Decimal;

use crate::models::{DeductionLimits, FinancialData, TaxRegime, TaxpayerCategory};

/// Total deductions allowed under `regime`.
///
/// The old regime allows every section deduction up to its cap. The new
/// regime allows only the standard deduction and professional tax.
pub fn total_deductions(
    data: &FinancialData,
    regime: TaxRegime,
    limits: &DeductionLimits,
) -> Decimal {
    match regime {
        TaxRegime::Old => old_regime_deductions(data, limits),
        TaxRegime::New => new_regime_deductions(data),
    }
}

fn old_regime_deductions(
    data: &FinancialData,
    limits: &DeductionLimits,
) -> Decimal {
    // Always the individual 80D cap; age category is not part of FinancialData.
    let section_80d_cap = limits.section_80d.for_category(TaxpayerCategory::Individual);

    data.standard_deduction()
        + data.section_80c().min(limits.section_80c)
        + data.section_80d().min(section_80d_cap)
        + data.section_80g()
        + data.section_24()
        + data.section_80ccd1b().min(limits.section_80ccd1b)
        + data.section_80e()
        + data.section_80tta().min(limits.section_80tta)
        + data.professional_tax()
}

fn new_regime_deductions(data: &FinancialData) -> Decimal {
    data.standard_deduction() + data.professional_tax()
}
