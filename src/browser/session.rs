//! Login and logout over the shared page.
//!
//! How credentials are collected is the caller's concern; this module only
//! performs the sequence against the login surface and verifies it left the
//! login page. There is no automatic re-login: if the session silently
//! expires mid-batch, the render actor notes each affected request instead.

use crate::config::UrlSet;
use crate::error::{AppError, AppResult, BrowserError, ConfigError};
use chromiumoxide::Page;
use tracing::info;

/// Fragment identifying the login surface in a page location.
pub const LOGIN_SURFACE_MARKER: &str = "log-in";

/// True when `url` resolves to the login surface (case-insensitive).
pub fn is_login_surface(url: &str) -> bool {
    url.to_lowercase().contains(LOGIN_SURFACE_MARKER)
}

/// Session credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from `GEPS_USERNAME` / `GEPS_PASSWORD`.
    pub fn from_env() -> AppResult<Self> {
        let username = std::env::var("GEPS_USERNAME").map_err(|_| {
            AppError::Config(ConfigError::EnvVarNotFound {
                var_name: "GEPS_USERNAME".to_string(),
            })
        })?;
        let password = std::env::var("GEPS_PASSWORD").map_err(|_| {
            AppError::Config(ConfigError::EnvVarNotFound {
                var_name: "GEPS_PASSWORD".to_string(),
            })
        })?;
        Ok(Self { username, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the password.
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Log in once, keeping the same page active for the whole batch.
pub async fn login(page: &Page, urls: &UrlSet, credentials: &Credentials) -> AppResult<()> {
    page.goto(&urls.login_url).await.map_err(|e| {
        AppError::Browser(BrowserError::NavigationFailed {
            url: urls.login_url.clone(),
            source: Box::new(e),
        })
    })?;
    page.wait_for_navigation().await?;

    let current = page.url().await?.unwrap_or_default();
    if !is_login_surface(&current) {
        info!("✓ session already active, skipping login");
        return Ok(());
    }

    info!("logging in, please wait...");

    page.find_element(r#"input[name="userName"]"#)
        .await?
        .click()
        .await?
        .type_str(&credentials.username)
        .await?;
    page.find_element(r#"input[id="password"]"#)
        .await?
        .click()
        .await?
        .type_str(&credentials.password)
        .await?;
    page.find_element(r#"input[id="btnLogin"]"#)
        .await?
        .click()
        .await?;
    page.wait_for_navigation().await?;

    let after = page.url().await?.unwrap_or_default();
    if is_login_surface(&after) {
        return Err(AppError::Browser(BrowserError::LoginRejected));
    }

    info!("✅ login successful");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_surface_detection_is_case_insensitive() {
        assert!(is_login_surface(
            "https://notices.philgeps.gov.ph/GEPSNONPILOT/Log-In.aspx"
        ));
        assert!(!is_login_surface(
            "https://notices.philgeps.gov.ph/GEPSNONPILOT/Tender/BidSupplementViewUI.aspx"
        ));
    }
}
