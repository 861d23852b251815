pub mod calculations;
pub mod config;
pub mod models;
pub mod services;
pub mod slab_table;

pub use calculations::{TaxEngine, TaxEngineError, suggest_tax_savings};
pub use config::EngineConfig;
pub use models::*;
pub use services::{CapabilityError, DocumentParser, TaxAssistant};
pub use slab_table::{SlabTable, SlabTableError};
