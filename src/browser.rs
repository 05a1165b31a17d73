//! Headless Chrome session management via chromiumoxide.
//!
//! The whole run shares one browser and one tab. Pages on this site build
//! their content client-side, so every fetch renders in Chrome and waits
//! for a readiness selector before the DOM is handed to the parsers.

use anyhow::{Context, Result};
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::ScrapeError;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Cookie-consent accept button, shown once per session.
const CONSENT_BUTTON: &str = "#onetrust-accept-btn-handler";
const CONSENT_WAIT: Duration = Duration::from_secs(5);
/// Pause after accepting consent so the overlay can clear.
const CONSENT_SETTLE: Duration = Duration::from_secs(2);

/// How often to re-poll for a readiness selector.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One browser, one tab, reused for every page in the run.
pub struct Session {
    browser: Browser,
    page: Page,
    consent_checked: bool,
}

impl Session {
    /// Launch Chrome and open the tab. `headed` keeps the window visible
    /// for debugging selector changes.
    pub async fn launch(headed: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-setuid-sandbox")
            .arg("--no-first-run");
        if headed {
            builder = builder.with_head();
        } else {
            builder = builder.arg("--headless=new");
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Browser config error: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch Chrome. Is Chrome/Chromium installed?")?;

        // Spawn handler in background
        tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = browser.new_page("about:blank").await?;
        page.execute(
            chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams::new(
                USER_AGENT,
            ),
        )
        .await?;

        info!(headed, "browser session started");
        Ok(Session {
            browser,
            page,
            consent_checked: false,
        })
    }

    /// Navigate to `url`, wait until `ready` matches, then return the
    /// rendered markup. `settle` adds a fixed pause between readiness and
    /// capture for pages that keep streaming rows in after the first one.
    pub async fn render(
        &mut self,
        url: &str,
        ready: &str,
        timeout: Duration,
        settle: Duration,
    ) -> std::result::Result<String, ScrapeError> {
        self.navigate(url, timeout).await?;
        if !self.consent_checked {
            self.consent_checked = true;
            self.dismiss_consent().await;
        }
        self.wait_for(ready, timeout).await?;
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        Ok(self.page.content().await?)
    }

    async fn navigate(&self, url: &str, timeout: Duration) -> std::result::Result<(), ScrapeError> {
        let nav_result = tokio::time::timeout(timeout, self.page.goto(url)).await;
        match nav_result {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "navigation timeout".to_string(),
            }),
        }
    }

    /// Poll for `selector` until it appears or `timeout` runs out.
    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> std::result::Result<Element, ScrapeError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(_) if Instant::now() < deadline => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(_) => {
                    return Err(ScrapeError::WaitTimeout {
                        selector: selector.to_string(),
                        timeout_ms: timeout.as_millis() as u64,
                    })
                }
            }
        }
    }

    /// Accept the cookie prompt if it shows. Tried once per session; not
    /// finding it is fine.
    async fn dismiss_consent(&self) {
        match self.wait_for(CONSENT_BUTTON, CONSENT_WAIT).await {
            Ok(button) => match button.click().await {
                Ok(_) => {
                    info!("accepted cookie consent");
                    tokio::time::sleep(CONSENT_SETTLE).await;
                }
                Err(e) => debug!(error = %e, "consent button found but click failed"),
            },
            Err(_) => debug!("no consent prompt shown"),
        }
    }

    /// Close the browser
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}
