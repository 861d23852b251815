//! Dual-regime income tax engine.
//!
//! # Calculation steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income (every income field) |
//! | 2    | Total deductions for the regime |
//! | 3    | Taxable income (step 1 - step 2, minimum 0) |
//! | 4    | Slab tax on step 3 |
//! | 5    | Cess (step 4 × cess rate) |
//! | 6    | Total tax (step 4 + step 5) |
//! | 7    | Effective rate (step 6 / step 1 × 100, 0 when step 1 is 0) |
//! | 8    | Refund or payable (step 6 - TDS - advance tax) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FinancialData, FinancialDataInput, TaxEngine, TaxRegime};
//!
//! let engine = TaxEngine::with_builtin_tables();
//! let data: FinancialData = FinancialDataInput {
//!     basic_salary: dec!(600000),
//!     hra: dec!(240000),
//!     special_allowance: dec!(80000),
//!     other_allowances: dec!(120000),
//!     section_80c: dec!(150000),
//!     section_80d: dec!(25000),
//!     section_24: dec!(200000),
//!     ..Default::default()
//! }
//! .into();
//!
//! let result = engine.compare_regimes(&data, "2024-25");
//!
//! assert_eq!(result.old_regime.total_tax, dec!(36920));
//! assert_eq!(result.new_regime.total_tax, dec!(60840));
//! assert_eq!(result.recommended_regime, TaxRegime::Old);
//! assert_eq!(result.savings_amount, dec!(23920));
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{max, round_half_up};
use crate::calculations::deductions::total_deductions;
use crate::calculations::slabs::slab_tax;
use crate::config::EngineConfig;
use crate::models::{
    AssessmentYear, DeductionLimits, FinancialData, RegimeTaxDetails, TaxCalculation, TaxRegime,
    TaxSlab,
};
use crate::slab_table::SlabTable;

/// Errors raised while assembling a [`TaxEngine`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    #[error("cess rate {0} is outside 0 to 1")]
    InvalidCessRate(Decimal),

    #[error("slab table has no schedule for default assessment year {0}")]
    MissingDefaultYear(AssessmentYear),

    #[error("section {section} limit {limit} is outside 0 to {ceiling}")]
    LimitOutOfRange {
        section: &'static str,
        limit: Decimal,
        ceiling: Decimal,
    },
}

/// Computes tax under both regimes from injected tables.
///
/// The engine holds no mutable state and is safe to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    config: EngineConfig,
    slab_table: SlabTable,
    limits: DeductionLimits,
}

impl TaxEngine {
    /// Creates an engine after checking that the config fits the tables.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError`] if:
    /// - The cess rate is negative or above 1
    /// - The slab table has nothing for the default assessment year
    /// - A deduction cap is negative or above the statutory ceiling that
    ///   [`FinancialData`] clamps its section to
    pub fn new(
        config: EngineConfig,
        slab_table: SlabTable,
        limits: DeductionLimits,
    ) -> Result<Self, TaxEngineError> {
        if config.cess_rate < Decimal::ZERO || config.cess_rate > Decimal::ONE {
            return Err(TaxEngineError::InvalidCessRate(config.cess_rate));
        }
        if !slab_table.contains_year(config.default_assessment_year) {
            return Err(TaxEngineError::MissingDefaultYear(
                config.default_assessment_year,
            ));
        }
        if let Some((section, limit, ceiling)) = limits
            .caps_with_statutory_ceiling()
            .into_iter()
            .find(|(_, limit, ceiling)| *limit < Decimal::ZERO || limit > ceiling)
        {
            return Err(TaxEngineError::LimitOutOfRange {
                section,
                limit,
                ceiling,
            });
        }

        Ok(Self {
            config,
            slab_table,
            limits,
        })
    }

    /// Engine over the built-in 2023-24 and 2024-25 schedules and default limits.
    pub fn with_builtin_tables() -> Self {
        Self {
            config: EngineConfig::default(),
            slab_table: SlabTable::builtin(),
            limits: DeductionLimits::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn slab_table(&self) -> &SlabTable {
        &self.slab_table
    }

    pub fn limits(&self) -> &DeductionLimits {
        &self.limits
    }

    /// Resolves a requested year, falling back to the default year when the
    /// text is malformed or the table has no schedule for it.
    pub fn resolve_year(
        &self,
        assessment_year: &str,
    ) -> AssessmentYear {
        let fallback = self.config.default_assessment_year;
        match AssessmentYear::parse(assessment_year) {
            Ok(year) if self.slab_table.contains_year(year) => year,
            Ok(year) => {
                warn!(%year, %fallback, "no slab table for assessment year, using default");
                fallback
            }
            Err(err) => {
                warn!(error = %err, %fallback, "invalid assessment year, using default");
                fallback
            }
        }
    }

    /// Slab schedule used for `regime` in the resolved year.
    ///
    /// A year without a schedule for `regime` yields an empty list, which
    /// produces zero slab tax.
    pub fn slabs_for(
        &self,
        assessment_year: &str,
        regime: TaxRegime,
    ) -> (AssessmentYear, &[TaxSlab]) {
        let year = self.resolve_year(assessment_year);
        let slabs = self.slab_table.slabs(year, regime).unwrap_or_else(|| {
            warn!(%year, %regime, "no slabs for regime, tax before cess will be zero");
            &[]
        });
        (year, slabs)
    }

    /// Computes the full tax details for one regime.
    pub fn compute_regime_tax(
        &self,
        data: &FinancialData,
        regime: TaxRegime,
        assessment_year: &str,
    ) -> RegimeTaxDetails {
        let (year, slabs) = self.slabs_for(assessment_year, regime);

        let gross_income = data.total_income();
        let total_deductions = total_deductions(data, regime, &self.limits);
        let taxable_income = max(gross_income - total_deductions, Decimal::ZERO);

        let (tax_before_cess, tax_slabs) = slab_tax(taxable_income, slabs);
        let cess = tax_before_cess * self.config.cess_rate;
        let total_tax = tax_before_cess + cess;

        let effective_tax_rate = if gross_income.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(total_tax / gross_income * Decimal::ONE_HUNDRED)
        };

        let refund_or_payable = total_tax - data.taxes_paid();

        debug!(
            %regime,
            %year,
            %gross_income,
            %taxable_income,
            %total_tax,
            "computed regime tax"
        );

        RegimeTaxDetails {
            regime,
            gross_income,
            taxable_income,
            total_deductions,
            tax_before_cess,
            cess,
            total_tax,
            tax_slabs,
            effective_tax_rate,
            tds_deducted: data.tds_deducted(),
            advance_tax: data.advance_tax(),
            refund_or_payable,
        }
    }

    /// Computes both regimes and recommends the cheaper one, old on a tie.
    pub fn compare_regimes(
        &self,
        data: &FinancialData,
        assessment_year: &str,
    ) -> TaxCalculation {
        let old_regime = self.compute_regime_tax(data, TaxRegime::Old, assessment_year);
        let new_regime = self.compute_regime_tax(data, TaxRegime::New, assessment_year);

        let recommended_regime = if old_regime.total_tax <= new_regime.total_tax {
            TaxRegime::Old
        } else {
            TaxRegime::New
        };
        let savings_amount = (old_regime.total_tax - new_regime.total_tax).abs();

        debug!(%recommended_regime, %savings_amount, "compared regimes");

        TaxCalculation {
            old_regime,
            new_regime,
            recommended_regime,
            savings_amount,
            calculation_timestamp: Utc::now(),
        }
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::with_builtin_tables()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{CurrentDeductions, FinancialDataInput, MAX_AMOUNT};

    fn engine() -> TaxEngine {
        TaxEngine::with_builtin_tables()
    }

    fn worked_example() -> FinancialData {
        FinancialDataInput {
            basic_salary: dec!(600000),
            hra: dec!(240000),
            special_allowance: dec!(80000),
            other_allowances: dec!(120000),
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            section_24: dec!(200000),
            ..Default::default()
        }
        .into()
    }

    fn salary(amount: Decimal) -> FinancialData {
        FinancialDataInput {
            basic_salary: amount,
            ..Default::default()
        }
        .into()
    }

    // =========================================================================
    // construction tests
    // =========================================================================

    #[test]
    fn new_rejects_negative_cess_rate() {
        let config = EngineConfig {
            cess_rate: dec!(-0.01),
            ..Default::default()
        };

        let err = TaxEngine::new(config, SlabTable::builtin(), DeductionLimits::default())
            .unwrap_err();

        assert_eq!(err, TaxEngineError::InvalidCessRate(dec!(-0.01)));
    }

    #[test]
    fn new_rejects_default_year_without_schedule() {
        let config = EngineConfig {
            default_assessment_year: AssessmentYear::parse("2030-31").unwrap(),
            ..Default::default()
        };

        let err = TaxEngine::new(config, SlabTable::builtin(), DeductionLimits::default())
            .unwrap_err();

        assert_eq!(err.to_string(), "slab table has no schedule for default assessment year 2030-31");
    }

    #[test]
    fn new_accepts_builtin_tables() {
        let engine = TaxEngine::new(
            EngineConfig::default(),
            SlabTable::builtin(),
            DeductionLimits::default(),
        );

        assert!(engine.is_ok());
    }

    #[test]
    fn new_rejects_limit_above_statutory_ceiling() {
        let limits = DeductionLimits {
            section_80c: dec!(200000),
            ..Default::default()
        };

        let err = TaxEngine::new(EngineConfig::default(), SlabTable::builtin(), limits)
            .unwrap_err();

        assert_eq!(
            err,
            TaxEngineError::LimitOutOfRange {
                section: "80C",
                limit: dec!(200000),
                ceiling: dec!(150000),
            }
        );
    }

    #[test]
    fn new_rejects_negative_limit() {
        let mut limits = DeductionLimits::default();
        limits.section_80d.individual = dec!(-1);

        let err = TaxEngine::new(EngineConfig::default(), SlabTable::builtin(), limits)
            .unwrap_err();

        assert_eq!(err.to_string(), "section 80D limit -1 is outside 0 to 25000");
    }

    #[test]
    fn lowered_limit_agrees_with_suggestions() {
        let limits = DeductionLimits {
            section_80c: dec!(100000),
            ..Default::default()
        };
        let engine = TaxEngine::new(EngineConfig::default(), SlabTable::builtin(), limits)
            .expect("Failed to build engine");
        let data: FinancialData = FinancialDataInput {
            basic_salary: dec!(900000),
            section_80c: dec!(150000),
            ..Default::default()
        }
        .into();

        let details = engine.compute_regime_tax(&data, TaxRegime::Old, "2024-25");
        let suggestions = crate::suggest_tax_savings(
            &CurrentDeductions::from(&data),
            TaxRegime::Old,
            engine.limits(),
        );

        assert_eq!(details.total_deductions, dec!(150000));
        assert!(
            suggestions
                .iter()
                .all(|s| s.category != "Section 80C Investment")
        );
    }

    // =========================================================================
    // compute_regime_tax tests
    // =========================================================================

    #[test]
    fn old_regime_worked_example() {
        let details = engine().compute_regime_tax(&worked_example(), TaxRegime::Old, "2024-25");

        assert_eq!(details.gross_income, dec!(1040000));
        assert_eq!(details.total_deductions, dec!(425000));
        assert_eq!(details.taxable_income, dec!(615000));
        assert_eq!(details.tax_before_cess, dec!(35500));
        assert_eq!(details.cess, dec!(1420));
        assert_eq!(details.total_tax, dec!(36920));
        assert_eq!(details.effective_tax_rate, dec!(3.55));
        assert_eq!(details.tax_slabs.len(), 3);
    }

    #[test]
    fn new_regime_worked_example() {
        let details = engine().compute_regime_tax(&worked_example(), TaxRegime::New, "2024-25");

        assert_eq!(details.total_deductions, dec!(50000));
        assert_eq!(details.taxable_income, dec!(990000));
        assert_eq!(details.tax_before_cess, dec!(58500));
        assert_eq!(details.cess, dec!(2340));
        assert_eq!(details.total_tax, dec!(60840));
        assert_eq!(details.effective_tax_rate, dec!(5.85));
    }

    #[test]
    fn zero_income_yields_zero_everything() {
        let details = engine().compute_regime_tax(&FinancialData::default(), TaxRegime::Old, "2024-25");

        assert_eq!(details.gross_income, Decimal::ZERO);
        assert_eq!(details.taxable_income, Decimal::ZERO);
        assert_eq!(details.total_tax, Decimal::ZERO);
        assert_eq!(details.effective_tax_rate, Decimal::ZERO);
        assert!(details.tax_slabs.is_empty());
    }

    #[test]
    fn deductions_above_income_leave_zero_taxable_income() {
        let data: FinancialData = FinancialDataInput {
            basic_salary: dec!(100000),
            section_24: dec!(400000),
            ..Default::default()
        }
        .into();

        let details = engine().compute_regime_tax(&data, TaxRegime::Old, "2024-25");

        assert_eq!(details.taxable_income, Decimal::ZERO);
        assert_eq!(details.total_tax, Decimal::ZERO);
    }

    #[test]
    fn cess_is_exactly_four_percent_of_slab_tax() {
        for amount in [dec!(333333.33), dec!(777777.77), dec!(2500001)] {
            for regime in TaxRegime::ALL {
                let details = engine().compute_regime_tax(&salary(amount), regime, "2024-25");

                assert_eq!(details.cess, details.tax_before_cess * dec!(0.04));
                assert_eq!(details.total_tax, details.tax_before_cess + details.cess);
            }
        }
    }

    #[test]
    fn refund_when_tds_exceeds_tax() {
        let data: FinancialData = FinancialDataInput {
            tds_deducted: dec!(40000),
            advance_tax: dec!(5000),
            ..FinancialDataInput::from(worked_example())
        }
        .into();

        let details = engine().compute_regime_tax(&data, TaxRegime::Old, "2024-25");

        assert_eq!(details.refund_or_payable, dec!(-8080));
        assert_eq!(details.tds_deducted, dec!(40000));
        assert_eq!(details.advance_tax, dec!(5000));
    }

    #[test]
    fn payable_when_nothing_paid() {
        let details = engine().compute_regime_tax(&worked_example(), TaxRegime::New, "2024-25");

        assert_eq!(details.refund_or_payable, dec!(60840));
    }

    #[test]
    fn new_regime_deductions_never_exceed_old() {
        let data = worked_example();

        let old = engine().compute_regime_tax(&data, TaxRegime::Old, "2024-25");
        let new = engine().compute_regime_tax(&data, TaxRegime::New, "2024-25");

        assert!(new.total_deductions <= old.total_deductions);
    }

    #[test]
    fn total_tax_is_monotonic_in_income() {
        for regime in TaxRegime::ALL {
            let mut previous = Decimal::ZERO;
            for step in 0..40 {
                let income = Decimal::from(step * 75000);

                let tax = engine()
                    .compute_regime_tax(&salary(income), regime, "2024-25")
                    .total_tax;

                assert!(tax >= previous, "{regime} tax dropped at {income}");
                previous = tax;
            }
        }
    }

    #[test]
    fn computation_is_idempotent() {
        let data = worked_example();

        let first = engine().compute_regime_tax(&data, TaxRegime::Old, "2024-25");
        let second = engine().compute_regime_tax(&data, TaxRegime::Old, "2024-25");

        assert_eq!(first, second);
    }

    // =========================================================================
    // assessment year fallback tests
    // =========================================================================

    #[test]
    fn malformed_year_falls_back_to_default() {
        let engine = engine();

        assert_eq!(engine.resolve_year("next year"), AssessmentYear::AY_2024_25);
        assert_eq!(
            engine.compute_regime_tax(&worked_example(), TaxRegime::Old, "bogus"),
            engine.compute_regime_tax(&worked_example(), TaxRegime::Old, "2024-25"),
        );
    }

    #[test]
    fn unknown_year_falls_back_to_default() {
        assert_eq!(engine().resolve_year("2031-32"), AssessmentYear::AY_2024_25);
    }

    #[test]
    fn known_year_is_kept() {
        assert_eq!(engine().resolve_year("2023-24"), AssessmentYear::AY_2023_24);
    }

    #[test]
    fn year_without_regime_schedule_yields_zero_tax() {
        let mut table = SlabTable::builtin();
        let year = AssessmentYear::parse("2025-26").unwrap();
        let slabs = table.slabs(AssessmentYear::AY_2024_25, TaxRegime::New).unwrap().to_vec();
        table.insert(year, TaxRegime::New, slabs).unwrap();
        let engine =
            TaxEngine::new(EngineConfig::default(), table, DeductionLimits::default()).unwrap();

        let details = engine.compute_regime_tax(&worked_example(), TaxRegime::Old, "2025-26");

        assert_eq!(details.taxable_income, dec!(615000));
        assert_eq!(details.tax_before_cess, Decimal::ZERO);
        assert_eq!(details.total_tax, Decimal::ZERO);
        assert!(details.tax_slabs.is_empty());
    }

    // =========================================================================
    // compare_regimes tests
    // =========================================================================

    #[test]
    fn compare_recommends_old_for_worked_example() {
        let result = engine().compare_regimes(&worked_example(), "2024-25");

        assert_eq!(result.recommended_regime, TaxRegime::Old);
        assert_eq!(result.savings_amount, dec!(23920));
        assert_eq!(result.recommended().total_tax, dec!(36920));
    }

    #[test]
    fn compare_recommends_new_without_deductions() {
        let result = engine().compare_regimes(&salary(dec!(1200000)), "2024-25");

        assert_eq!(result.recommended_regime, TaxRegime::New);
        assert_eq!(
            result.savings_amount,
            result.old_regime.total_tax - result.new_regime.total_tax
        );
    }

    #[test]
    fn tie_favours_old_regime() {
        let result = engine().compare_regimes(&FinancialData::default(), "2024-25");

        assert_eq!(result.old_regime.total_tax, result.new_regime.total_tax);
        assert_eq!(result.recommended_regime, TaxRegime::Old);
        assert_eq!(result.savings_amount, Decimal::ZERO);
    }

    #[test]
    fn section_80c_above_cap_is_clamped_before_calculation() {
        let capped = engine().compare_regimes(&worked_example(), "2024-25");
        let over: FinancialData = FinancialDataInput {
            section_80c: dec!(400000),
            ..FinancialDataInput::from(worked_example())
        }
        .into();

        let result = engine().compare_regimes(&over, "2024-25");

        assert_eq!(result.old_regime.total_tax, capped.old_regime.total_tax);
    }

    #[test]
    fn income_at_decimal_max_is_clamped_instead_of_overflowing() {
        let data: FinancialData = FinancialDataInput {
            basic_salary: Decimal::MAX,
            hra: Decimal::MAX,
            special_allowance: Decimal::MAX,
            other_allowances: Decimal::MAX,
            bonus: Decimal::MAX,
            interest_income: Decimal::MAX,
            rental_income: Decimal::MAX,
            capital_gains: Decimal::MAX,
            other_income: Decimal::MAX,
            section_80g: Decimal::MAX,
            ..Default::default()
        }
        .into();

        let result = engine().compare_regimes(&data, "2024-25");

        assert_eq!(result.old_regime.gross_income, MAX_AMOUNT * dec!(9));
        assert_eq!(result.new_regime.taxable_income, MAX_AMOUNT * dec!(9) - dec!(50000));
        assert!(result.new_regime.total_tax > Decimal::ZERO);
        assert_eq!(result.recommended_regime, TaxRegime::Old);
    }
}
