//! Screenshot capture using Chrome DevTools Protocol

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use tracing::{debug, info, warn};
use uiprobe_core::{Artifact, ArtifactStore, ProbeError, Result};

use crate::session::BrowserSession;

/// Screenshot capture options
#[derive(Debug, Clone)]
pub struct ScreenshotOptions {
    /// Capture the full page (scrolls and stitches if needed)
    pub full_page: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self { full_page: true }
    }
}

impl ScreenshotOptions {
    /// Options for a full-page screenshot
    pub fn full_page() -> Self {
        Self { full_page: true }
    }

    /// Options for a viewport-only screenshot
    pub fn viewport() -> Self {
        Self { full_page: false }
    }
}

/// Capture a screenshot and store it under a fixed artifact name
///
/// # Arguments
/// * `session` - Active browser session
/// * `store` - Artifact store for the verification directory
/// * `name` - Artifact name without extension, e.g. `debug_initial`
/// * `description` - Human-readable description
/// * `options` - Screenshot capture options
///
/// # Returns
/// Metadata for the stored artifact
pub async fn capture_screenshot(
    session: &BrowserSession,
    store: &ArtifactStore,
    name: &str,
    description: &str,
    options: ScreenshotOptions,
) -> Result<Artifact> {
    debug!("Capturing screenshot '{}'", name);

    let data = capture_page(session, options.full_page)?;
    let artifact = store.store_screenshot(name, &data, description).await?;

    info!(
        "Screenshot stored: {} ({} bytes)",
        artifact.path.display(),
        artifact.size_bytes
    );

    Ok(artifact)
}

/// Best-effort screenshot of the failure state
///
/// Used on the probe error path; a capture failure here is logged and
/// swallowed so it cannot mask the failure being reported.
pub async fn capture_failure_screenshot(
    session: &BrowserSession,
    store: &ArtifactStore,
    name: &str,
) -> Option<Artifact> {
    match capture_screenshot(
        session,
        store,
        name,
        "Failure state",
        ScreenshotOptions::full_page(),
    )
    .await
    {
        Ok(artifact) => Some(artifact),
        Err(e) => {
            warn!("Failure screenshot '{}' could not be captured: {}", name, e);
            None
        }
    }
}

fn capture_page(session: &BrowserSession, full_page: bool) -> Result<Vec<u8>> {
    session
        .tab()
        .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, full_page)
        .map_err(|e| ProbeError::Screenshot(format!("CDP capture failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_options_default() {
        let options = ScreenshotOptions::default();
        assert!(options.full_page);
    }

    #[test]
    fn test_screenshot_options_viewport() {
        let options = ScreenshotOptions::viewport();
        assert!(!options.full_page);
    }
}
