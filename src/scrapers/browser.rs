//! Headless Chromium page rendering.
//!
//! Launches a browser with a desktop user agent and a fixed locale, blocks
//! image, font and media requests, navigates until `DOMContentLoaded`, gives
//! client-side rendering a chance to produce a heading, and returns the
//! serialized DOM.
//!
//! # Timeouts
//!
//! | Phase | Ceiling | On expiry |
//! |-------|---------|-----------|
//! | Navigation to `DOMContentLoaded` | 60 s | [`FetchError::Timeout`] |
//! | Waiting for an `h1` | 30 s | logged, HTML taken as-is |
//!
//! The browser is closed exactly once after a successful launch, whether
//! rendering succeeded or not.

use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetLocaleOverrideParams;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestPattern,
    RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// Desktop Chrome user agent presented to the site.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Browser locale and `Accept-Language`.
pub const LOCALE: &str = "en-US";

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const HEADING_TIMEOUT: Duration = Duration::from_secs(30);
const HEADING_POLL_INTERVAL: Duration = Duration::from_millis(250);
const HEADING_SELECTOR: &str = "h1";

/// Errors that end the run before any extraction happens.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid browser configuration: {0}")]
    Config(String),
    #[error("browser error: {0}")]
    Browser(#[from] CdpError),
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("navigation timed out after {0:?}")]
    Timeout(Duration),
}

/// No heading appeared in time. Rendering continues with the current DOM.
#[derive(Debug, Error)]
#[error("no heading appeared within {0:?}")]
pub struct HeadingWaitTimeout(pub Duration);

/// Render `url` in headless Chromium and return the page HTML.
///
/// # Errors
///
/// Returns [`FetchError`] if the browser cannot be launched or configured,
/// the navigation fails, or `DOMContentLoaded` does not fire within
/// [`NAVIGATION_TIMEOUT`].
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch(url: &str) -> Result<String, FetchError> {
    let session = BrowserSession::launch().await?;
    let rendered = session.render(url).await;
    session.close().await;

    let html = rendered?;
    info!(bytes = html.len(), "Rendered page");
    Ok(html)
}

/// Resource types never downloaded; only the DOM is needed.
pub fn is_blocked(resource_type: &ResourceType) -> bool {
    matches!(
        resource_type,
        ResourceType::Image | ResourceType::Font | ResourceType::Media
    )
}

/// A launched browser plus the task pumping its protocol events.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch() -> Result<Self, FetchError> {
        let config = BrowserConfig::builder()
            .arg(format!("--user-agent={USER_AGENT}"))
            .arg(format!("--lang={LOCALE}"))
            .arg("--disable-blink-features=AutomationControlled")
            .request_timeout(NAVIGATION_TIMEOUT)
            .build()
            .map_err(FetchError::Config)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        info!("Launched headless browser");

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        Ok(Self { browser, handler })
    }

    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let page = self.browser.new_page("about:blank").await?;
        page.execute(SetLocaleOverrideParams {
            locale: Some(LOCALE.to_string()),
        })
        .await?;

        let interceptor = block_heavy_resources(&page).await?;
        let result = navigate_and_capture(&page, url).await;
        interceptor.abort();
        result
    }

    /// Consumes the session so the browser is closed only once.
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Failed waiting for browser exit");
        }
        self.handler.abort();
        info!("Closed headless browser");
    }
}

/// Intercept every request and fail the ones [`is_blocked`] rejects.
async fn block_heavy_resources(page: &Page) -> Result<JoinHandle<()>, FetchError> {
    let mut paused = page.event_listener::<EventRequestPaused>().await?;
    let intercept_page = page.clone();

    let interceptor = tokio::spawn(async move {
        while let Some(event) = paused.next().await {
            let request_id = event.request_id.clone();
            let reply = if is_blocked(&event.resource_type) {
                debug!(url = %event.request.url, kind = ?event.resource_type, "Blocked request");
                intercept_page
                    .execute(FailRequestParams::new(request_id, ErrorReason::BlockedByClient))
                    .await
                    .map(|_| ())
            } else {
                intercept_page
                    .execute(ContinueRequestParams::new(request_id))
                    .await
                    .map(|_| ())
            };
            if let Err(e) = reply {
                debug!(error = %e, "Interception reply failed");
            }
        }
    });

    page.execute(
        EnableParams::builder()
            .pattern(
                RequestPattern::builder()
                    .url_pattern("*")
                    .request_stage(RequestStage::Request)
                    .build(),
            )
            .build(),
    )
    .await?;

    Ok(interceptor)
}

async fn navigate_and_capture(page: &Page, url: &str) -> Result<String, FetchError> {
    let mut dom_ready = page.event_listener::<EventDomContentEventFired>().await?;

    let navigation = async {
        let reply = page.execute(NavigateParams::new(url)).await?;
        if let Some(reason) = reply.result.error_text.clone() {
            return Err(FetchError::Navigation {
                url: url.to_string(),
                reason,
            });
        }
        dom_ready.next().await;
        Ok::<(), FetchError>(())
    };
    timeout(NAVIGATION_TIMEOUT, navigation)
        .await
        .map_err(|_| FetchError::Timeout(NAVIGATION_TIMEOUT))??;
    info!("DOM content loaded");

    if let Err(e) = wait_for_heading(page).await {
        warn!(error = %e, "Continuing with current DOM");
    }

    Ok(page.content().await?)
}

/// Poll for a heading element until one exists or [`HEADING_TIMEOUT`] passes.
async fn wait_for_heading(page: &Page) -> Result<(), HeadingWaitTimeout> {
    let poll = async {
        while page.find_element(HEADING_SELECTOR).await.is_err() {
            sleep(HEADING_POLL_INTERVAL).await;
        }
    };
    timeout(HEADING_TIMEOUT, poll)
        .await
        .map_err(|_| HeadingWaitTimeout(HEADING_TIMEOUT))?;
    debug!("Heading present");
    Ok(())
}
