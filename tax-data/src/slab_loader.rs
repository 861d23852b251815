use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    AssessmentYear, AssessmentYearError, EngineConfig, SlabTable, SlabTableError, TaxRegime,
    TaxSlab,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading slab schedules.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid assessment year: {0}")]
    AssessmentYear(#[from] AssessmentYearError),

    #[error("Unknown regime '{0}' (expected 'old' or 'new')")]
    UnknownRegime(String),

    #[error("Invalid slab schedule: {0}")]
    InvalidSchedule(#[from] SlabTableError),
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the slab schedule CSV file.
///
/// - `assessment_year`: e.g. `2024-25`
/// - `regime`: `old` or `new`
/// - `min`: lower bound of the slab
/// - `max`: upper bound (empty for the unbounded top slab)
/// - `rate`: percent, e.g. `20` for 20%
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub assessment_year: String,
    pub regime: String,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

pub(crate) fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for slab schedules from CSV files.
///
/// Rows are grouped by (assessment year, regime) in file order and each
/// group is validated as a complete schedule.
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table from parsed records.
    pub fn build(records: &[SlabRecord]) -> Result<SlabTable, SlabLoaderError> {
        let mut groups: BTreeMap<(AssessmentYear, TaxRegime), Vec<TaxSlab>> = BTreeMap::new();

        for record in records {
            let year = AssessmentYear::parse(&record.assessment_year)?;
            let regime = TaxRegime::parse(&record.regime)
                .ok_or_else(|| SlabLoaderError::UnknownRegime(record.regime.clone()))?;

            groups
                .entry((year, regime))
                .or_default()
                .push(TaxSlab::new(record.min, record.max, record.rate));
        }

        let mut table = SlabTable::new();
        for ((year, regime), slabs) in groups {
            debug!(%year, %regime, slabs = slabs.len(), "loaded slab schedule");
            table.insert(year, regime, slabs)?;
        }

        Ok(table)
    }

    /// Parse and build a table from a CSV file.
    pub fn load_file(path: &Path) -> Result<SlabTable, SlabLoaderError> {
        let file = File::open(path)?;
        let records = Self::parse(file)?;
        Self::build(&records)
    }
}

/// Default engine config, with the default year moved to the latest year in
/// `table` when the table has no schedule for the usual default.
///
/// An empty table keeps the usual default; [`tax_core::TaxEngine::new`]
/// rejects it afterwards.
pub fn engine_config_for(table: &SlabTable) -> EngineConfig {
    let mut config = EngineConfig::default();
    if table.contains_year(config.default_assessment_year) {
        return config;
    }
    if let Some(latest) = table.years().last().copied() {
        info!(
            missing = %config.default_assessment_year,
            %latest,
            "defaulting to latest loaded assessment year"
        );
        config.default_assessment_year = latest;
    }
    config
}
