//! Render actor - serialized page-to-PDF consumer
//!
//! A single task owns the authenticated browser session and drains the
//! render queue in FIFO order. No other component ever touches the page;
//! the session is a scarce, stateful resource and serializing it here
//! removes every navigation race.
//!
//! Every received command releases its render count exactly once, success
//! or failure, so batch completion tracking stays balanced.

use crate::browser::is_login_surface;
use crate::config::Config;
use crate::error::RenderError;
use crate::infrastructure::RenderSurface;
use crate::services::{NotesSink, RenderCommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct RenderActor {
    surface: Arc<dyn RenderSurface>,
    commands: UnboundedReceiver<RenderCommand>,
    notes: Arc<NotesSink>,
    config: Arc<Config>,
    cancel: CancellationToken,
}

impl RenderActor {
    pub fn new(
        surface: Arc<dyn RenderSurface>,
        commands: UnboundedReceiver<RenderCommand>,
        notes: Arc<NotesSink>,
        config: Arc<Config>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            surface,
            commands,
            notes,
            config,
            cancel,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        loop {
            let command = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(command) => command,
                    None => break,
                },
            };

            if let Err(e) = self.handle(&command).await {
                warn!("⚠️ render failed: {}", e);
                self.notes
                    .append(
                        &command.request.record_folder,
                        &format!(
                            "Failed to save PDF {}: {}",
                            command.request.target.pdf_file_name(),
                            e
                        ),
                    )
                    .await;
            }

            // Balance the count added at submit time, success or not.
            command.batch.render_finished();
        }

        self.logout().await;
    }

    async fn handle(&self, command: &RenderCommand) -> Result<(), RenderError> {
        let request = &command.request;
        let url = request.target.navigation_url(&self.config.urls);

        let dest = request.dest_folder.join(request.target.pdf_file_name());

        std::fs::create_dir_all(&request.dest_folder).map_err(|e| {
            RenderError::CaptureFailed {
                path: dest.display().to_string(),
                source: Box::new(e),
            }
        })?;

        let timeout = Duration::from_secs(self.config.navigation_timeout_secs);
        let final_url = match tokio::time::timeout(timeout, self.surface.navigate(&url)).await {
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url.clone(),
                    seconds: self.config.navigation_timeout_secs,
                })
            }
            Ok(Err(e)) => {
                return Err(RenderError::NavigationFailed {
                    url: url.clone(),
                    source: e.into(),
                })
            }
            Ok(Ok(final_url)) => final_url,
        };

        if is_login_surface(&final_url) {
            // The session has expired server-side. There is no point
            // retrying here; record what was skipped and move on.
            let expired = RenderError::SessionExpired { url };
            warn!("⚠️ {}", expired);
            self.notes
                .append(
                    &request.record_folder,
                    &format!(
                        "Saving PDF {} was skipped: {}.",
                        request.target.pdf_file_name(),
                        expired
                    ),
                )
                .await;
            return Ok(());
        }

        if request.target.strips_page_banner() {
            // Best effort; a missing banner element is not a failure.
            match self.surface.remove_element(&self.config.strip_selector).await {
                Ok(true) => debug!("banner element stripped before capture"),
                Ok(false) => debug!("no banner element present on {}", url),
                Err(e) => debug!("banner strip failed on {}: {}", url, e),
            }
        }

        self.surface
            .capture_pdf(&dest)
            .await
            .map_err(|e| RenderError::CaptureFailed {
                path: dest.display().to_string(),
                source: e.into(),
            })?;

        info!(
            "💾 saved PDF: {} ({})",
            dest.display(),
            request.target.category_name()
        );
        Ok(())
    }

    /// Ends the authenticated session by navigating to the logout address.
    async fn logout(&self) {
        match self.surface.navigate(&self.config.urls.logout_url).await {
            Ok(_) => info!("✅ logged out"),
            Err(e) => warn!("⚠️ logout navigation failed: {}", e),
        }
    }
}
