//! Tax calculation for the old and new Indian income tax regimes.
//!
//! [`TaxEngine`] owns the slab schedules and deduction limits and produces
//! per-regime details, a comparison and a recommendation. The suggestion
//! builder works from claimed deductions alone.

pub mod common;
mod comparison;
pub mod deductions;
mod engine;
pub mod slabs;
pub mod suggestions;

pub use engine::{TaxEngine, TaxEngineError};
pub use suggestions::suggest_tax_savings;
