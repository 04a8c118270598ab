//! Shared helpers for integration tests: scripted collaborators and engine builders.

#![allow(dead_code)]

pub mod mock_collaborators;
pub mod strategies;

use mock_collaborators::{ScriptedGenerator, StaticSource};
use std::sync::Arc;
use stockmark_core::{AttributeKind, GenerationEngine, Record, StockmarkConfig};

/// Engine over `records`, already loaded, targeting `kind`
pub async fn loaded_engine(
    kind: AttributeKind,
    records: Vec<Record>,
    generator: Arc<ScriptedGenerator>,
) -> Arc<GenerationEngine> {
    loaded_engine_with_config(&StockmarkConfig::default(), kind, records, generator).await
}

pub async fn loaded_engine_with_config(
    config: &StockmarkConfig,
    kind: AttributeKind,
    records: Vec<Record>,
    generator: Arc<ScriptedGenerator>,
) -> Arc<GenerationEngine> {
    let source = Arc::new(StaticSource::new(records));
    let engine = GenerationEngine::for_kind(config, kind, source, generator);
    engine
        .load(None, false)
        .await
        .expect("static source never fails");
    Arc::new(engine)
}

/// Catalog from the distilled example: id 1 missing, id 2 already carrying SKU-9
pub fn two_product_catalog() -> Vec<Record> {
    vec![Record::new(1, "A"), Record::new(2, "B").with_sku("SKU-9")]
}
