use anyhow::Result;
use std::sync::Arc;

use bid_docs_extractor::browser::Credentials;
use bid_docs_extractor::config::Config;
use bid_docs_extractor::models::{BatchCriteria, CategorySelection};
use bid_docs_extractor::orchestrator::Extractor;
use bid_docs_extractor::services::InMemoryStore;
use bid_docs_extractor::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Console logging
    logging::init();

    // Configuration and credentials come from the environment
    let config = Config::from_env();
    let credentials = Credentials::from_env()?;

    let store = Arc::new(InMemoryStore::from_toml_file(&config.records_manifest)?);

    let criteria = BatchCriteria {
        organization_id: std::env::var("MERCHANT_ORG_ID").unwrap_or_default(),
        status: std::env::var("EXTRACTION_STATUS").unwrap_or_else(|_| "Awarded".to_string()),
        year: std::env::var("EXTRACTION_YEAR").unwrap_or_else(|_| "2024".to_string()),
    };

    let extractor = Extractor::initialize(config, store, credentials).await?;
    extractor
        .run_batch(&criteria, CategorySelection::all())
        .await?;
    extractor.shutdown().await;

    Ok(())
}
