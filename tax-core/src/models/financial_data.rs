use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::deduction_limits::{
    PROFESSIONAL_TAX_LIMIT, SECTION_80C_LIMIT, SECTION_80CCD1B_LIMIT,
    SECTION_80D_INDIVIDUAL_LIMIT, SECTION_80TTA_LIMIT, STANDARD_DEDUCTION,
};

/// Unvalidated financial data as entered by a user or parsed from a document.
///
/// Every field defaults to zero except `standard_deduction`. Convert into
/// [`FinancialData`] to apply the non-negative and statutory-cap clamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialDataInput {
    // Income components
    pub basic_salary: Decimal,
    pub hra: Decimal,
    pub special_allowance: Decimal,
    pub other_allowances: Decimal,
    pub bonus: Decimal,

    // Other income
    pub interest_income: Decimal,
    pub rental_income: Decimal,
    pub capital_gains: Decimal,
    pub other_income: Decimal,

    // Old-regime deductions
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub section_80g: Decimal,
    pub section_24: Decimal,
    pub section_80ccd1b: Decimal,
    pub section_80e: Decimal,
    pub section_80tta: Decimal,

    // Common deductions
    pub standard_deduction: Decimal,
    pub professional_tax: Decimal,

    // Tax already paid
    pub tds_deducted: Decimal,
    pub advance_tax: Decimal,
}

impl Default for FinancialDataInput {
    fn default() -> Self {
        Self {
            basic_salary: Decimal::ZERO,
            hra: Decimal::ZERO,
            special_allowance: Decimal::ZERO,
            other_allowances: Decimal::ZERO,
            bonus: Decimal::ZERO,
            interest_income: Decimal::ZERO,
            rental_income: Decimal::ZERO,
            capital_gains: Decimal::ZERO,
            other_income: Decimal::ZERO,
            section_80c: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            section_80g: Decimal::ZERO,
            section_24: Decimal::ZERO,
            section_80ccd1b: Decimal::ZERO,
            section_80e: Decimal::ZERO,
            section_80tta: Decimal::ZERO,
            standard_deduction: STANDARD_DEDUCTION,
            professional_tax: Decimal::ZERO,
            tds_deducted: Decimal::ZERO,
            advance_tax: Decimal::ZERO,
        }
    }
}

/// Largest amount any single field may hold, one quadrillion rupees.
///
/// Summing every field and applying a 100% slab rate to the result stays
/// well inside `Decimal::MAX`, so the engine's arithmetic cannot overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Validated financial data for one taxpayer.
///
/// Every monetary field lies between zero and [`MAX_AMOUNT`] and the capped
/// sections never exceed their statutory ceilings. Out-of-range values are clamped silently on
/// construction rather than rejected. Instances are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FinancialDataInput")]
pub struct FinancialData {
    basic_salary: Decimal,
    hra: Decimal,
    special_allowance: Decimal,
    other_allowances: Decimal,
    bonus: Decimal,
    interest_income: Decimal,
    rental_income: Decimal,
    capital_gains: Decimal,
    other_income: Decimal,
    section_80c: Decimal,
    section_80d: Decimal,
    section_80g: Decimal,
    section_24: Decimal,
    section_80ccd1b: Decimal,
    section_80e: Decimal,
    section_80tta: Decimal,
    standard_deduction: Decimal,
    professional_tax: Decimal,
    tds_deducted: Decimal,
    advance_tax: Decimal,
}

fn non_negative(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}

fn capped(
    value: Decimal,
    cap: Decimal,
) -> Decimal {
    non_negative(value).min(cap)
}

impl From<FinancialDataInput> for FinancialData {
    fn from(input: FinancialDataInput) -> Self {
        Self {
            basic_salary: non_negative(input.basic_salary),
            hra: non_negative(input.hra),
            special_allowance: non_negative(input.special_allowance),
            other_allowances: non_negative(input.other_allowances),
            bonus: non_negative(input.bonus),
            interest_income: non_negative(input.interest_income),
            rental_income: non_negative(input.rental_income),
            capital_gains: non_negative(input.capital_gains),
            other_income: non_negative(input.other_income),
            section_80c: capped(input.section_80c, SECTION_80C_LIMIT),
            section_80d: capped(input.section_80d, SECTION_80D_INDIVIDUAL_LIMIT),
            section_80g: non_negative(input.section_80g),
            section_24: non_negative(input.section_24),
            section_80ccd1b: capped(input.section_80ccd1b, SECTION_80CCD1B_LIMIT),
            section_80e: non_negative(input.section_80e),
            section_80tta: capped(input.section_80tta, SECTION_80TTA_LIMIT),
            standard_deduction: non_negative(input.standard_deduction),
            professional_tax: capped(input.professional_tax, PROFESSIONAL_TAX_LIMIT),
            tds_deducted: non_negative(input.tds_deducted),
            advance_tax: non_negative(input.advance_tax),
        }
    }
}

impl From<FinancialData> for FinancialDataInput {
    fn from(data: FinancialData) -> Self {
        Self {
            basic_salary: data.basic_salary,
            hra: data.hra,
            special_allowance: data.special_allowance,
            other_allowances: data.other_allowances,
            bonus: data.bonus,
            interest_income: data.interest_income,
            rental_income: data.rental_income,
            capital_gains: data.capital_gains,
            other_income: data.other_income,
            section_80c: data.section_80c,
            section_80d: data.section_80d,
            section_80g: data.section_80g,
            section_24: data.section_24,
            section_80ccd1b: data.section_80ccd1b,
            section_80e: data.section_80e,
            section_80tta: data.section_80tta,
            standard_deduction: data.standard_deduction,
            professional_tax: data.professional_tax,
            tds_deducted: data.tds_deducted,
            advance_tax: data.advance_tax,
        }
    }
}

impl Default for FinancialData {
    fn default() -> Self {
        FinancialDataInput::default().into()
    }
}

macro_rules! getters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(&self) -> Decimal {
                self.$field
            }
        )*
    };
}

impl FinancialData {
    getters!(
        basic_salary,
        hra,
        special_allowance,
        other_allowances,
        bonus,
        interest_income,
        rental_income,
        capital_gains,
        other_income,
        section_80c,
        section_80d,
        section_80g,
        section_24,
        section_80ccd1b,
        section_80e,
        section_80tta,
        standard_deduction,
        professional_tax,
        tds_deducted,
        advance_tax,
    );

    /// Salary components only.
    pub fn gross_salary(&self) -> Decimal {
        self.basic_salary + self.hra + self.special_allowance + self.other_allowances + self.bonus
    }

    /// Salary plus every other income source.
    pub fn total_income(&self) -> Decimal {
        self.gross_salary()
            + self.interest_income
            + self.rental_income
            + self.capital_gains
            + self.other_income
    }

    /// Sum of tax already paid through TDS and advance tax.
    pub fn taxes_paid(&self) -> Decimal {
        self.tds_deducted + self.advance_tax
    }

    /// True when any old-regime-only section deduction is non-zero.
    pub fn has_section_deductions(&self) -> bool {
        [
            self.section_80c,
            self.section_80d,
            self.section_80g,
            self.section_24,
            self.section_80ccd1b,
            self.section_80e,
            self.section_80tta,
        ]
        .iter()
        .any(|v| *v > Decimal::ZERO)
    }
}
