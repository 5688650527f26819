use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;

/// Navigation addresses of the rendering collaborator.
///
/// The five category templates in [`crate::models::RenderTarget`] append
/// their query strings to these bases.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct UrlSet {
    pub login_url: String,
    pub logout_url: String,
    pub bid_notice_url: String,
    pub award_notice_url: String,
    pub assoc_comp_url: String,
    pub bid_sup_url: String,
    pub bid_sup_item_url: String,
}

impl Default for UrlSet {
    fn default() -> Self {
        let base = "https://notices.philgeps.gov.ph/GEPSNONPILOT";
        Self {
            login_url: format!("{}/log-in.aspx", base),
            logout_url: format!("{}/LogoutRedirect.aspx", base),
            bid_notice_url: format!("{}/Tender/PrintableBidNoticeAbstractUI.aspx", base),
            award_notice_url: format!("{}/Tender/printableAwardNoticeAbstractUI.aspx", base),
            assoc_comp_url: format!("{}/Tender/ViewNonElectronicAssocCompUI.aspx", base),
            bid_sup_url: format!("{}/Tender/BidSupplementViewUI.aspx", base),
            bid_sup_item_url: format!("{}/Tender/ViewNonElectronicAssocCompUI.aspx", base),
        }
    }
}

/// Program configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of parallel record workers
    pub worker_count: usize,
    /// Bounded timeout for one page navigation, in seconds
    pub navigation_timeout_secs: u64,
    /// Root folder extracted records land in
    pub output_root: String,
    /// Network storage root for electronic tender documents
    pub tender_files_root: String,
    /// Network storage root for electronic bid supplements
    pub supplement_files_root: String,
    /// Network storage root for award document files
    pub award_files_root: String,
    /// TOML manifest describing the records the in-memory store serves
    pub records_manifest: String,
    /// Plain-text run log
    pub output_log_file: String,
    /// Whether to log per-document detail
    pub verbose_logging: bool,
    /// Explicit browser executable; chromiumoxide auto-detects when unset
    pub browser_executable: Option<String>,
    /// On-page element removed before capture (best effort)
    pub strip_selector: String,
    pub urls: UrlSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_count: 4,
            navigation_timeout_secs: 32,
            output_root: "ExtractedBidDocs".to_string(),
            tender_files_root: "Z:/GEPS_Files/Tender".to_string(),
            supplement_files_root: "Z:/GEPS_Files/BidSupp".to_string(),
            award_files_root: "Z:/Fileserver/R3FileServer".to_string(),
            records_manifest: "records.toml".to_string(),
            output_log_file: "extraction.log".to_string(),
            verbose_logging: false,
            browser_executable: None,
            strip_selector: r#"span[id="ctl01_nameLBL"]"#.to_string(),
            urls: UrlSet::default(),
        }
    }
}

impl Config {
    /// Build a configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            worker_count: std::env::var("WORKER_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.worker_count),
            navigation_timeout_secs: std::env::var("NAVIGATION_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.navigation_timeout_secs),
            output_root: std::env::var("OUTPUT_ROOT").unwrap_or(default.output_root),
            tender_files_root: std::env::var("TENDER_FILES_ROOT").unwrap_or(default.tender_files_root),
            supplement_files_root: std::env::var("SUPPLEMENT_FILES_ROOT").unwrap_or(default.supplement_files_root),
            award_files_root: std::env::var("AWARD_FILES_ROOT").unwrap_or(default.award_files_root),
            records_manifest: std::env::var("RECORDS_MANIFEST").unwrap_or(default.records_manifest),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            browser_executable: std::env::var("BROWSER_EXECUTABLE").ok(),
            strip_selector: std::env::var("STRIP_SELECTOR").unwrap_or(default.strip_selector),
            urls: UrlSet::default(),
        }
    }

    /// Load a configuration from a TOML file. Missing keys fall back to the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::file_read_failed(path.display().to_string(), e)
        })?;
        let config: Config = toml::from_str(&raw).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert!(config.worker_count > 0);
        assert!(config.urls.login_url.contains("log-in"));
        assert_ne!(config.urls.bid_notice_url, config.urls.award_notice_url);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            worker_count = 2
            output_root = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.output_root, "out");
        assert_eq!(config.navigation_timeout_secs, Config::default().navigation_timeout_secs);
    }
}
