//! The three UI probes
//!
//! Each probe drives a fresh browser session through a fixed script:
//! navigate, settle, observe, capture. Probes never bubble errors to the
//! caller; every outcome, including launch failure, is folded into a
//! [`ProbeReport`]. On the failure path a best-effort screenshot of the
//! broken state is attempted, and the browser is released on every exit
//! path.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uiprobe_core::{
    Artifact, ArtifactStore, ProbeError, ProbeKind, ProbeStatus, Result, UiprobeConfig,
};

use crate::console;
use crate::locator::{self, TargetRole};
use crate::screenshot::{self, ScreenshotOptions};
use crate::session::{BrowserConfig, BrowserSession};

/// Artifact name for the basic probe screenshot
pub const BASIC_SHOT: &str = "debug_initial";
/// Artifact name for the basic and console probe failure screenshot
pub const DEBUG_FAILURE_SHOT: &str = "debug_error";
/// Artifact name for the console probe screenshot
pub const CONSOLE_SHOT: &str = "debug_console";
/// Artifact name for the post-click screenshot
pub const INTERACTIVE_SHOT: &str = "dump_tab";
/// Artifact name when the sentinel or target never appeared
pub const INTERACTIVE_MISSING_SHOT: &str = "dump_tab_missing";
/// Artifact name for the interactive probe failure screenshot
pub const INTERACTIVE_FAILURE_SHOT: &str = "error";

/// Everything a probe run needs to know
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// URL the probe navigates to
    pub url: String,
    /// Directory screenshots are written to
    pub artifact_dir: PathBuf,
    /// Upper bound for navigation and element waits
    pub navigation_timeout: Duration,
    /// Fixed delay between navigation and capture
    pub settle: Duration,
    /// Fixed delay between a click and the post-click capture
    pub click_settle: Duration,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Leave the Chromium sandbox enabled
    pub sandbox: bool,
    /// Browser window width in pixels
    pub window_width: u32,
    /// Browser window height in pixels
    pub window_height: u32,
}

impl ProbeSettings {
    /// Build settings from a loaded configuration
    pub fn from_config(config: &UiprobeConfig) -> Self {
        Self {
            url: config.target_url.clone(),
            artifact_dir: config.artifact_dir.clone(),
            navigation_timeout: Duration::from_secs(config.timeouts.navigation_secs),
            settle: Duration::from_millis(config.timeouts.settle_ms),
            click_settle: Duration::from_millis(config.timeouts.click_settle_ms),
            headless: config.browser.headless,
            sandbox: config.browser.sandbox,
            window_width: config.browser.window_width,
            window_height: config.browser.window_height,
        }
    }

    fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            sandbox: self.sandbox,
            window_width: self.window_width,
            window_height: self.window_height,
            timeout_seconds: self.navigation_timeout.as_secs(),
        }
    }
}

/// Outcome of a single probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Which probe produced this report
    pub kind: ProbeKind,
    /// URL the probe ran against
    pub url: String,
    /// How the run ended
    pub status: ProbeStatus,
    /// Page title, when the probe reads it
    pub title: Option<String>,
    /// Screenshot captured by this run, if any
    pub screenshot: Option<Artifact>,
    /// Whether a click was dispatched
    pub clicked: bool,
    /// Failure reason, when the run failed
    pub failure: Option<String>,
}

impl ProbeReport {
    /// Report for a run that failed with the given error
    pub fn failed_with(
        kind: ProbeKind,
        url: &str,
        error: &ProbeError,
        screenshot: Option<Artifact>,
    ) -> Self {
        Self {
            kind,
            url: url.to_string(),
            status: ProbeStatus::Failed,
            title: None,
            screenshot,
            clicked: false,
            failure: Some(error.to_string()),
        }
    }

    /// Whether the run completed its full script
    pub fn passed(&self) -> bool {
        matches!(self.status, ProbeStatus::Completed)
    }

    /// Whether the run ended in failure
    pub fn failed(&self) -> bool {
        matches!(self.status, ProbeStatus::Failed)
    }
}

/// Navigate to the target URL, let it settle and capture a screenshot
///
/// Reports the page title on success. An optional CSS selector can be
/// awaited between navigation and the settle delay.
pub async fn run_basic_probe(settings: &ProbeSettings, wait_selector: Option<&str>) -> ProbeReport {
    info!("Running basic probe against {}", settings.url);
    let store = ArtifactStore::new(settings.artifact_dir.clone());
    let session = match BrowserSession::launch_with_config(settings.browser_config()).await {
        Ok(session) => session,
        Err(e) => return ProbeReport::failed_with(ProbeKind::Basic, &settings.url, &e, None),
    };

    let outcome = basic_probe_body(&session, &store, settings, wait_selector).await;
    finish(session, &store, ProbeKind::Basic, &settings.url, outcome, DEBUG_FAILURE_SHOT).await
}

async fn basic_probe_body(
    session: &BrowserSession,
    store: &ArtifactStore,
    settings: &ProbeSettings,
    wait_selector: Option<&str>,
) -> Result<ProbeReport> {
    session.navigate(&settings.url).await?;
    if let Some(selector) = wait_selector {
        session.wait_for_element(selector, None).await?;
    }
    session.settle(settings.settle).await;

    let title = session.get_title().await?;
    info!("Page title: {}", title);

    let artifact = screenshot::capture_screenshot(
        session,
        store,
        BASIC_SHOT,
        "Initial page state",
        ScreenshotOptions::full_page(),
    )
    .await?;

    Ok(ProbeReport {
        kind: ProbeKind::Basic,
        url: settings.url.clone(),
        status: ProbeStatus::Completed,
        title: Some(title),
        screenshot: Some(artifact),
        clicked: false,
        failure: None,
    })
}

/// Navigate with console capture attached and screenshot the settled page
///
/// Console messages and page errors are printed to stdout as they arrive.
/// Listeners are attached before navigation so messages emitted during
/// page load are included.
pub async fn run_console_probe(settings: &ProbeSettings) -> ProbeReport {
    info!("Running console probe against {}", settings.url);
    let store = ArtifactStore::new(settings.artifact_dir.clone());
    let session = match BrowserSession::launch_with_config(settings.browser_config()).await {
        Ok(session) => session,
        Err(e) => return ProbeReport::failed_with(ProbeKind::Console, &settings.url, &e, None),
    };

    let outcome = console_probe_body(&session, &store, settings).await;
    finish(session, &store, ProbeKind::Console, &settings.url, outcome, DEBUG_FAILURE_SHOT).await
}

async fn console_probe_body(
    session: &BrowserSession,
    store: &ArtifactStore,
    settings: &ProbeSettings,
) -> Result<ProbeReport> {
    console::attach_console_printer(session)?;
    session.navigate(&settings.url).await?;
    session.settle(settings.settle).await;

    let artifact = screenshot::capture_screenshot(
        session,
        store,
        CONSOLE_SHOT,
        "Page state after console capture",
        ScreenshotOptions::full_page(),
    )
    .await?;

    Ok(ProbeReport {
        kind: ProbeKind::Console,
        url: settings.url.clone(),
        status: ProbeStatus::Completed,
        title: None,
        screenshot: Some(artifact),
        clicked: false,
        failure: None,
    })
}

/// Wait for the application to render, click the target and capture the result
///
/// A sentinel that never appears is a soft outcome, not a failure: the
/// probe captures the broken state under [`INTERACTIVE_MISSING_SHOT`] and
/// reports `target-missing`. The same applies when the sentinel renders
/// but the target element does not exist.
pub async fn run_interactive_probe(
    settings: &ProbeSettings,
    sentinel: &str,
    role: TargetRole,
    target_label: &str,
) -> ProbeReport {
    info!(
        "Running interactive probe against {} (target: {} '{}')",
        settings.url, role, target_label
    );
    let store = ArtifactStore::new(settings.artifact_dir.clone());
    let session = match BrowserSession::launch_with_config(settings.browser_config()).await {
        Ok(session) => session,
        Err(e) => return ProbeReport::failed_with(ProbeKind::Interactive, &settings.url, &e, None),
    };

    let outcome =
        interactive_probe_body(&session, &store, settings, sentinel, role, target_label).await;
    finish(
        session,
        &store,
        ProbeKind::Interactive,
        &settings.url,
        outcome,
        INTERACTIVE_FAILURE_SHOT,
    )
    .await
}

async fn interactive_probe_body(
    session: &BrowserSession,
    store: &ArtifactStore,
    settings: &ProbeSettings,
    sentinel: &str,
    role: TargetRole,
    target_label: &str,
) -> Result<ProbeReport> {
    session.navigate(&settings.url).await?;

    // The application never rendering is an observation to record, not an
    // error to bubble.
    if let Err(e) = locator::wait_for_sentinel(session, sentinel, settings.navigation_timeout).await
    {
        if e.is_element_not_found() {
            warn!("Sentinel text '{}' never appeared", sentinel);
            let artifact = screenshot::capture_screenshot(
                session,
                store,
                INTERACTIVE_MISSING_SHOT,
                "Application did not render",
                ScreenshotOptions::full_page(),
            )
            .await?;
            return Ok(missing_report(settings, Some(artifact)));
        }
        return Err(e);
    }

    let clicked = match locator::find_target(session, role, target_label)? {
        Some(element) => {
            element.click().map_err(|e| {
                ProbeError::Other(format!("Click on '{}' failed: {}", target_label, e))
            })?;
            info!("Clicked target '{}'", target_label);
            true
        }
        None => {
            warn!("Target '{}' not found on the page", target_label);
            false
        }
    };

    if clicked {
        session.settle(settings.click_settle).await;
        let artifact = screenshot::capture_screenshot(
            session,
            store,
            INTERACTIVE_SHOT,
            "Page state after clicking the target",
            ScreenshotOptions::full_page(),
        )
        .await?;
        Ok(ProbeReport {
            kind: ProbeKind::Interactive,
            url: settings.url.clone(),
            status: ProbeStatus::Completed,
            title: None,
            screenshot: Some(artifact),
            clicked: true,
            failure: None,
        })
    } else {
        let artifact = screenshot::capture_screenshot(
            session,
            store,
            INTERACTIVE_MISSING_SHOT,
            "Target element not found",
            ScreenshotOptions::full_page(),
        )
        .await?;
        Ok(missing_report(settings, Some(artifact)))
    }
}

fn missing_report(settings: &ProbeSettings, screenshot: Option<Artifact>) -> ProbeReport {
    ProbeReport {
        kind: ProbeKind::Interactive,
        url: settings.url.clone(),
        status: ProbeStatus::TargetMissing,
        title: None,
        screenshot,
        clicked: false,
        failure: None,
    }
}

/// Shared failure tail: best-effort screenshot, then unconditional release
async fn finish(
    session: BrowserSession,
    store: &ArtifactStore,
    kind: ProbeKind,
    url: &str,
    outcome: Result<ProbeReport>,
    failure_shot: &str,
) -> ProbeReport {
    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            warn!("{} probe against {} failed: {}", kind, url, e);
            let shot = screenshot::capture_failure_screenshot(&session, store, failure_shot).await;
            ProbeReport::failed_with(kind, url, &e, shot)
        }
    };

    // The browser is released on every exit path.
    if let Err(e) = session.close().await {
        warn!("Browser session close failed: {}", e);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ProbeSettings {
        ProbeSettings::from_config(&UiprobeConfig::default())
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = settings();
        assert_eq!(settings.url, "http://localhost:8081");
        assert_eq!(settings.navigation_timeout, Duration::from_secs(60));
        assert_eq!(settings.settle, Duration::from_millis(5000));
        assert_eq!(settings.click_settle, Duration::from_millis(2000));
        assert!(settings.headless);
    }

    #[test]
    fn test_browser_config_carries_navigation_timeout() {
        let config = settings().browser_config();
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
    }

    #[test]
    fn test_failed_report_carries_error_message() {
        let error = ProbeError::navigation("http://localhost:8081", "connection refused");
        let report = ProbeReport::failed_with(ProbeKind::Basic, "http://localhost:8081", &error, None);
        assert!(report.failed());
        assert!(!report.passed());
        let failure = report.failure.unwrap();
        assert!(failure.contains("http://localhost:8081"));
        assert!(failure.contains("connection refused"));
    }

    #[test]
    fn test_missing_report_is_neither_passed_nor_failed() {
        let report = missing_report(&settings(), None);
        assert_eq!(report.status, ProbeStatus::TargetMissing);
        assert!(!report.passed());
        assert!(!report.failed());
        assert!(!report.clicked);
    }

    #[test]
    fn test_artifact_names_match_contract() {
        assert_eq!(BASIC_SHOT, "debug_initial");
        assert_eq!(DEBUG_FAILURE_SHOT, "debug_error");
        assert_eq!(CONSOLE_SHOT, "debug_console");
        assert_eq!(INTERACTIVE_SHOT, "dump_tab");
        assert_eq!(INTERACTIVE_MISSING_SHOT, "dump_tab_missing");
        assert_eq!(INTERACTIVE_FAILURE_SHOT, "error");
    }
}
