/// Logging helpers
///
/// Console logging setup plus the formatting helpers used around batch
/// processing.
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult, FileError};

/// Initialize console logging.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Initialize the extraction log file with a dated header.
///
/// # Arguments
/// - `log_file_path`: path of the log file to (re)create
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\nBid document extraction log - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| {
        AppError::File(FileError::WriteFailed {
            path: log_file_path.to_string(),
            source: Box::new(e),
        })
    })?;
    Ok(())
}

/// Log startup information.
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 startup - parallel bid document extraction");
    info!("📊 worker count: {}", config.worker_count);
    info!("📁 output root: {}", config.output_root);
    info!("{}", "=".repeat(60));
}

/// Log the final statistics of a completed batch.
///
/// # Arguments
/// - `total`: number of records submitted
/// - `completed`: number of records fully processed
/// - `output_root`: where the extracted documents landed
pub fn log_batch_summary(total: usize, completed: usize, output_root: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 batch finished");
    info!(
        "finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ completed: {}/{}", completed, total);
    info!("{}", "=".repeat(60));
    info!("\ndocuments saved under: {}", output_root);
}

/// Truncate long text for log display.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
