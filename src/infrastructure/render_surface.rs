//! Render surface - infrastructure layer
//!
//! Holds the one authenticated page and only exposes the abilities the
//! render actor needs: navigate, remove one element, capture a PDF. It knows
//! nothing about records, categories, or batches.

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use std::path::Path;

/// Abilities of the single browsing session.
///
/// The production implementation is [`PageSurface`]; tests substitute fakes.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Navigate and wait for the page to load. Returns the resulting
    /// location, which may differ from `url` (e.g. a login redirect).
    async fn navigate(&self, url: &str) -> Result<String>;

    /// Remove the first element matching `selector`, if present. Returns
    /// whether an element was removed.
    async fn remove_element(&self, selector: &str) -> Result<bool>;

    /// Capture the current page as an A4 PDF at `path`.
    async fn capture_pdf(&self, path: &Path) -> Result<()>;
}

/// [`RenderSurface`] over one chromiumoxide [`Page`].
pub struct PageSurface {
    page: Page,
}

impl PageSurface {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl RenderSurface for PageSurface {
    async fn navigate(&self, url: &str) -> Result<String> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn remove_element(&self, selector: &str) -> Result<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const element = document.querySelector({selector});
                if (element) {{
                    element.remove();
                    return true;
                }}
                return false;
            }})()
            "#,
            selector = serde_json::to_string(selector)?
        );
        let result = self.page.evaluate(js_code).await?;
        let removed: bool = result.into_value()?;
        Ok(removed)
    }

    async fn capture_pdf(&self, path: &Path) -> Result<()> {
        // A4 in inches, with backgrounds, like the print dialog would.
        let params = PrintToPdfParams {
            print_background: Some(true),
            paper_width: Some(8.27),
            paper_height: Some(11.69),
            ..Default::default()
        };
        self.page.save_pdf(params, path).await?;
        Ok(())
    }
}
