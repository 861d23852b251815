use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::calculations::common::format_rupees;
use tax_core::{DeductionLimits, SlabTable, TaxEngine};
use tax_data::{SlabTableLoader, engine_config_for, load_from_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compare the old and new tax regimes for each row of a financial-data CSV.
///
/// The input CSV has one column per financial field (any subset, e.g.
/// basic_salary, hra, section_80c) and an optional assessment_year column.
#[derive(Parser, Debug)]
#[command(name = "regime-compare")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing financial data rows
    #[arg(short, long)]
    input: PathBuf,

    /// Slab schedule CSV (assessment_year,regime,min,max,rate); built-in tables if omitted
    #[arg(short, long)]
    slabs: Option<PathBuf>,

    /// Assessment year for rows that do not name one
    #[arg(short, long, default_value = "2024-25")]
    year: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let slab_table = match &args.slabs {
        Some(path) => SlabTableLoader::load_file(path)
            .with_context(|| format!("Failed to load slab schedules: {}", path.display()))?,
        None => SlabTable::builtin(),
    };

    let config = engine_config_for(&slab_table);
    let engine = TaxEngine::new(config, slab_table, DeductionLimits::default())
        .context("Failed to build tax engine")?;

    let records = load_from_file(&args.input)
        .with_context(|| format!("Failed to read financial data: {}", args.input.display()))?;

    info!(rows = records.len(), "loaded financial data");

    println!(
        "{:>4}  {:>7}  {:>14}  {:>14}  {:>11}  {:>14}",
        "row", "year", "old regime", "new regime", "recommended", "savings"
    );

    for (index, record) in records.iter().enumerate() {
        let requested = record.assessment_year.as_deref().unwrap_or(&args.year);
        let year = engine.resolve_year(requested);
        let comparison = engine.regime_comparison(&record.data, requested);

        println!(
            "{:>4}  {:>7}  {:>14}  {:>14}  {:>11}  {:>14}",
            index + 1,
            year.to_string(),
            format_rupees(comparison.old_regime_tax),
            format_rupees(comparison.new_regime_tax),
            comparison.recommended.as_str(),
            format_rupees(comparison.difference),
        );
    }

    Ok(())
}
