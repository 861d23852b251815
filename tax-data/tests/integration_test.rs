//! Integration tests running CSV fixtures through the tax engine.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    AssessmentYear, DeductionLimits, Document, DocumentParser, EngineConfig, SlabTable, TaxEngine,
    TaxRegime,
};
use tax_data::{RuleBasedExtractor, SlabTableLoader, load_from_reader};

const SLABS_CSV: &str = include_str!("../test-data/slabs.csv");
const FINANCIAL_CSV: &str = include_str!("../test-data/financial_data.csv");
const FORM16_TXT: &str = include_str!("../test-data/form16.txt");

fn load_table() -> SlabTable {
    let records = SlabTableLoader::parse(SLABS_CSV.as_bytes()).expect("Failed to parse CSV");
    SlabTableLoader::build(&records).expect("Failed to build slab table")
}

fn engine() -> TaxEngine {
    TaxEngine::new(EngineConfig::default(), load_table(), DeductionLimits::default())
        .expect("Failed to build engine")
}

#[test]
fn test_loaded_table_covers_fixture_years() {
    let table = load_table();

    let years: Vec<String> = table.years().iter().map(ToString::to_string).collect();

    assert_eq!(years, vec!["2023-24", "2024-25", "2025-26"]);
    assert_eq!(table.len(), 5);
}

#[test]
fn test_loaded_table_matches_builtin_for_known_years() {
    let table = load_table();
    let builtin = SlabTable::builtin();

    for year in [AssessmentYear::AY_2023_24, AssessmentYear::AY_2024_25] {
        for regime in TaxRegime::ALL {
            assert_eq!(table.slabs(year, regime), builtin.slabs(year, regime));
        }
    }
}

#[test]
fn test_financial_rows_compare_as_expected() {
    let engine = engine();
    let records = load_from_reader(FINANCIAL_CSV.as_bytes()).expect("Failed to load CSV");

    let results: Vec<_> = records
        .iter()
        .map(|r| {
            let year = r.assessment_year.as_deref().unwrap_or("2024-25");
            engine.compare_regimes(&r.data, year)
        })
        .collect();

    assert_eq!(results.len(), 4);

    assert_eq!(results[0].old_regime.total_tax, dec!(36920));
    assert_eq!(results[0].new_regime.total_tax, dec!(60840));
    assert_eq!(results[0].recommended_regime, TaxRegime::Old);
    assert_eq!(results[0].old_regime.refund_or_payable, dec!(-3080));

    assert_eq!(results[1].old_regime.total_tax, dec!(163800));
    assert_eq!(results[1].new_regime.total_tax, dec!(85800));
    assert_eq!(results[1].recommended_regime, TaxRegime::New);
    assert_eq!(results[1].savings_amount, dec!(78000));

    assert_eq!(results[2].old_regime.total_tax, dec!(5200));
    assert_eq!(results[2].new_regime.total_tax, dec!(5200));
    assert_eq!(results[2].recommended_regime, TaxRegime::Old);
    assert_eq!(results[2].savings_amount, Decimal::ZERO);

    assert_eq!(results[3].old_regime.total_deductions, dec!(225000));
    assert_eq!(results[3].old_regime.total_tax, dec!(218400));
    assert_eq!(results[3].new_regime.total_tax, dec!(156000));
    assert_eq!(results[3].new_regime.refund_or_payable, dec!(-144000));
}

#[test]
fn test_year_with_only_new_schedule_gives_zero_old_tax() {
    let engine = engine();
    let records = load_from_reader(FINANCIAL_CSV.as_bytes()).expect("Failed to load CSV");

    let result = engine.compare_regimes(&records[1].data, "2025-26");

    assert_eq!(result.old_regime.tax_before_cess, Decimal::ZERO);
    assert_eq!(result.new_regime.taxable_income, dec!(1150000));
    assert_eq!(result.new_regime.tax_before_cess, dec!(55000));
    assert_eq!(result.recommended_regime, TaxRegime::Old);
}

#[tokio::test]
async fn test_extracted_form16_feeds_engine() {
    let extractor = RuleBasedExtractor::new().expect("Failed to compile patterns");
    let document = Document {
        filename: "form16.txt".to_string(),
        content_type: "text/plain".to_string(),
        bytes: FORM16_TXT.as_bytes().to_vec(),
    };

    let parsed = extractor
        .extract_financial_data(&document)
        .await
        .expect("Failed to extract");
    let details = engine().compute_regime_tax(&parsed.extracted_data, TaxRegime::Old, "2024-25");

    assert_eq!(parsed.extracted_data.basic_salary(), dec!(600000));
    assert_eq!(parsed.extracted_data.section_80c(), dec!(100000));
    assert_eq!(details.gross_income, dec!(840000));
    assert_eq!(details.total_deductions, dec!(152500));
    assert_eq!(details.taxable_income, dec!(687500));
    assert_eq!(details.total_tax, dec!(52000));
    assert_eq!(details.refund_or_payable, dec!(13600));
}
