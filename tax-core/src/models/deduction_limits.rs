use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub(crate) const SECTION_80C_LIMIT: Decimal = dec!(150000);
pub(crate) const SECTION_80D_INDIVIDUAL_LIMIT: Decimal = dec!(25000);
pub(crate) const SECTION_80D_SENIOR_LIMIT: Decimal = dec!(50000);
pub(crate) const SECTION_80CCD1B_LIMIT: Decimal = dec!(50000);
pub(crate) const SECTION_80TTA_LIMIT: Decimal = dec!(10000);
pub(crate) const PROFESSIONAL_TAX_LIMIT: Decimal = dec!(2500);
pub(crate) const STANDARD_DEDUCTION: Decimal = dec!(50000);

/// Taxpayer age category used by the Section 80D health-insurance caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxpayerCategory {
    Individual,
    SeniorCitizen,
    SuperSeniorCitizen,
}

/// Section 80D caps by taxpayer category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsuranceLimits {
    pub individual: Decimal,
    pub senior_citizen: Decimal,
    pub super_senior_citizen: Decimal,
}

impl HealthInsuranceLimits {
    pub fn for_category(
        &self,
        category: TaxpayerCategory,
    ) -> Decimal {
        match category {
            TaxpayerCategory::Individual => self.individual,
            TaxpayerCategory::SeniorCitizen => self.senior_citizen,
            TaxpayerCategory::SuperSeniorCitizen => self.super_senior_citizen,
        }
    }
}

/// Statutory caps on the capped deduction sections.
///
/// Sections 80G, 24 and 80E are uncapped and have no entry here. A cap may
/// be lowered below its default but never raised above it; see
/// [`crate::TaxEngine::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionLimits {
    pub section_80c: Decimal,
    pub section_80d: HealthInsuranceLimits,
    pub section_80ccd1b: Decimal,
    pub section_80tta: Decimal,
    pub professional_tax: Decimal,
}

impl Default for DeductionLimits {
    fn default() -> Self {
        Self {
            section_80c: SECTION_80C_LIMIT,
            section_80d: HealthInsuranceLimits {
                individual: SECTION_80D_INDIVIDUAL_LIMIT,
                senior_citizen: SECTION_80D_SENIOR_LIMIT,
                super_senior_citizen: SECTION_80D_SENIOR_LIMIT,
            },
            section_80ccd1b: SECTION_80CCD1B_LIMIT,
            section_80tta: SECTION_80TTA_LIMIT,
            professional_tax: PROFESSIONAL_TAX_LIMIT,
        }
    }
}

impl DeductionLimits {
    /// Each cap the engine applies, paired with the statutory ceiling that
    /// [`crate::FinancialData`] already clamps the same section to.
    pub(crate) fn caps_with_statutory_ceiling(&self) -> [(&'static str, Decimal, Decimal); 5] {
        [
            ("80C", self.section_80c, SECTION_80C_LIMIT),
            ("80D", self.section_80d.individual, SECTION_80D_INDIVIDUAL_LIMIT),
            ("80CCD(1B)", self.section_80ccd1b, SECTION_80CCD1B_LIMIT),
            ("80TTA", self.section_80tta, SECTION_80TTA_LIMIT),
            ("professional tax", self.professional_tax, PROFESSIONAL_TAX_LIMIT),
        ]
    }
}
