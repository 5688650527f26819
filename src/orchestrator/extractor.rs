//! Top-level extraction orchestrator
//!
//! Owns the whole pipeline: browser session, render actor, worker pool and
//! dispatcher. `initialize` brings up a real headless browser; `with_surface`
//! assembles the same pipeline over any `RenderSurface`, which is how the
//! pipeline runs in tests and embeddings.

use crate::browser::{launch_headless_browser, session, Credentials};
use crate::config::Config;
use crate::infrastructure::{PageSurface, RenderSurface};
use crate::models::{BatchCriteria, CategorySelection, RecordJob};
use crate::orchestrator::dispatcher::Dispatcher;
use crate::orchestrator::render_actor::RenderActor;
use crate::orchestrator::worker_pool::{QueuedJob, RecordWorkerPool};
use crate::services::{MetadataStore, NotesSink, RenderQueue};
use crate::utils::logging;
use crate::workflow::RecordFlow;
use anyhow::Result;
use chromiumoxide::Browser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct Extractor {
    config: Arc<Config>,
    store: Arc<dyn MetadataStore>,
    dispatcher: Dispatcher,
    pool: RecordWorkerPool,
    actor: JoinHandle<()>,
    cancel: CancellationToken,
    browser: Option<Browser>,
}

impl Extractor {
    /// Launch a headless browser, log in, and assemble the full pipeline.
    pub async fn initialize(
        config: Config,
        store: Arc<dyn MetadataStore>,
        credentials: Credentials,
    ) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let (browser, page) = launch_headless_browser(&config).await?;
        session::login(&page, &config.urls, &credentials).await?;

        let surface: Arc<dyn RenderSurface> = Arc::new(PageSurface::new(page));
        Ok(Self::assemble(Arc::new(config), store, surface, Some(browser)))
    }

    /// Assemble the pipeline over an existing render surface. No browser is
    /// launched and no login is performed.
    pub fn with_surface(
        config: Config,
        store: Arc<dyn MetadataStore>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self::assemble(Arc::new(config), store, surface, None)
    }

    fn assemble(
        config: Arc<Config>,
        store: Arc<dyn MetadataStore>,
        surface: Arc<dyn RenderSurface>,
        browser: Option<Browser>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let notes = Arc::new(NotesSink::new());

        let (renders, render_rx) = RenderQueue::channel();
        let actor = RenderActor::new(
            surface,
            render_rx,
            notes.clone(),
            config.clone(),
            cancel.clone(),
        )
        .spawn();

        let flow = Arc::new(RecordFlow::new(
            store.clone(),
            notes,
            renders,
            config.clone(),
        ));

        let (intake_tx, intake_rx) = mpsc::unbounded_channel::<QueuedJob>();
        let pool = RecordWorkerPool::spawn(config.worker_count, intake_rx, flow, cancel.clone());

        Self {
            config,
            store,
            dispatcher: Dispatcher::new(intake_tx),
            pool,
            actor,
            cancel,
            browser,
        }
    }

    /// Direct access to batch submission, for callers that build their own
    /// job lists instead of going through `run_batch`.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Look up matching records, submit them as one batch and wait for full
    /// completion. Returns the number of records processed.
    pub async fn run_batch(
        &self,
        criteria: &BatchCriteria,
        categories: CategorySelection,
    ) -> Result<usize> {
        let records = self.store.find_records(criteria).await?;
        if records.is_empty() {
            warn!("⚠️ no matching records for organization {}", criteria.organization_id);
            return Ok(0);
        }

        let batch_size = records.len();
        let jobs = records
            .into_iter()
            .enumerate()
            .map(|(idx, (record_id, status))| RecordJob {
                record_id,
                status,
                categories,
                sequence: idx + 1,
                batch_size,
            })
            .collect();

        let handle = self.dispatcher.submit_batch(jobs)?;
        let completed = handle.wait_complete().await;
        logging::log_batch_summary(batch_size, completed, &self.config.output_root);
        Ok(completed)
    }

    /// Stop the pipeline and release the browser.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        self.pool.join().await;
        let _ = self.actor.await;

        if let Some(mut browser) = self.browser {
            match browser.close().await {
                Ok(_) => info!("✅ browser closed"),
                Err(e) => warn!("⚠️ browser close failed: {}", e),
            }
        }
    }
}
