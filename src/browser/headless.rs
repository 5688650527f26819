use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::Path;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, BrowserError};

/// Launch the headless browser and open the login page.
pub async fn launch_headless_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🚀 launching headless browser...");
    debug!("login url: {}", config.urls.login_url);

    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .args(vec![
            "--disable-gpu",             // headless mode on Windows needs this
            "--no-sandbox",              // avoids sandbox permission crashes
            "--disable-dev-shm-usage",   // avoids shared-memory exhaustion
            "--remote-debugging-port=0", // let the browser pick its port
        ]);

    if let Some(executable) = &config.browser_executable {
        builder = builder.chrome_executable(Path::new(executable));
    }

    let browser_config = builder.build().map_err(|e| {
        error!("failed to configure headless browser: {}", e);
        anyhow::anyhow!("failed to configure headless browser: {}", e)
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("failed to launch headless browser: {}", e);
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(e),
        })
    })?;
    debug!("headless browser started");

    // Drive browser events in the background.
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // Give the browser a moment to settle before opening pages.
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page(&config.urls.login_url).await.map_err(|e| {
        error!("failed to create page: {}", e);
        AppError::Browser(BrowserError::PageCreationFailed {
            source: Box::new(e),
        })
    })?;

    info!("✅ headless browser opened: {}", config.urls.login_url);

    Ok((browser, page))
}
