//! Data sources for the tax engine: CSV slab schedules, CSV financial
//! records and rule-based extraction from plain-text documents.

pub mod financial_csv;
pub mod slab_loader;
pub mod text_extractor;

pub use financial_csv::{FinancialCsvError, FinancialRecord, load_from_file, load_from_reader};
pub use slab_loader::{SlabLoaderError, SlabRecord, SlabTableLoader, engine_config_for};
pub use text_extractor::RuleBasedExtractor;
