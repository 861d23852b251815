use std::sync::Arc;

use anyhow::Context;
use tax_core::{DocumentParser, SlabTable, TaxAssistant, TaxEngine};
use tax_data::{RuleBasedExtractor, SlabTableLoader};
use tracing::info;

use crate::assistant::OfflineAssistant;
use crate::config::ApiConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TaxEngine>,
    pub parser: Arc<dyn DocumentParser>,
    pub assistant: Arc<dyn TaxAssistant>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        engine: TaxEngine,
        parser: Arc<dyn DocumentParser>,
        assistant: Arc<dyn TaxAssistant>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            parser,
            assistant,
            config: Arc::new(config),
        }
    }

    /// Builds the engine from `config` and wires in the offline capabilities.
    pub fn from_config(config: ApiConfig) -> anyhow::Result<Self> {
        let slab_table = match &config.slab_table {
            Some(path) => SlabTableLoader::load_file(path)
                .with_context(|| format!("Failed to load slab schedules: {}", path.display()))?,
            None => SlabTable::builtin(),
        };
        info!(
            schedules = slab_table.len(),
            years = ?slab_table.years().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "slab table ready"
        );

        let engine = TaxEngine::new(config.engine.clone(), slab_table, config.limits.clone())
            .context("Failed to build tax engine")?;
        let parser = RuleBasedExtractor::new().context("Failed to compile extraction patterns")?;

        Ok(Self::new(
            config,
            engine,
            Arc::new(parser),
            Arc::new(OfflineAssistant::new()),
        ))
    }
}
