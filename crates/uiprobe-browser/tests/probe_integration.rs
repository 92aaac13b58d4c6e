//! Integration tests for the three probes.
//!
//! These tests drive a real Chromium instance and are ignored by default.
//! Run them with `cargo test -- --ignored` on a machine with Chrome or
//! Chromium installed. The sandbox is disabled so they also work inside
//! containers.

use std::time::Duration;

use tempfile::TempDir;
use uiprobe_browser::locator::TargetRole;
use uiprobe_browser::probe::{
    self, run_basic_probe, run_console_probe, run_interactive_probe, ProbeSettings,
};
use uiprobe_core::ProbeStatus;

fn test_settings(url: &str, artifact_dir: &TempDir) -> ProbeSettings {
    ProbeSettings {
        url: url.to_string(),
        artifact_dir: artifact_dir.path().to_path_buf(),
        navigation_timeout: Duration::from_secs(10),
        settle: Duration::from_millis(200),
        click_settle: Duration::from_millis(200),
        headless: true,
        sandbox: false,
        window_width: 1280,
        window_height: 800,
    }
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_basic_probe_captures_page_and_title() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(
        "data:text/html,<html><head><title>Probe</title></head><body><h1>Hello</h1></body></html>",
        &dir,
    );

    let report = run_basic_probe(&settings, None).await;

    assert!(report.passed(), "failure: {:?}", report.failure);
    assert_eq!(report.title.as_deref(), Some("Probe"));
    let shot = dir.path().join(format!("{}.png", probe::BASIC_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_basic_probe_reports_failure_for_unreachable_url() {
    let dir = TempDir::new().unwrap();
    // Port 9 (discard) refuses connections immediately.
    let mut settings = test_settings("http://127.0.0.1:9", &dir);
    settings.navigation_timeout = Duration::from_secs(5);

    let report = run_basic_probe(&settings, None).await;

    assert!(report.failed());
    let failure = report.failure.expect("failed report carries a reason");
    assert!(failure.contains("http://127.0.0.1:9"));
    // The error path leaves its own screenshot behind.
    let shot = dir.path().join(format!("{}.png", probe::DEBUG_FAILURE_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_console_probe_captures_screenshot() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(
        "data:text/html,<html><body><script>console.log('hello'); console.error('boom');</script></body></html>",
        &dir,
    );

    let report = run_console_probe(&settings).await;

    assert!(report.passed(), "failure: {:?}", report.failure);
    let shot = dir.path().join(format!("{}.png", probe::CONSOLE_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_interactive_probe_clicks_target() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(
        "data:text/html,<html><body><p>Schedule</p>\
         <a href='#' onclick=\"document.body.appendChild(document.createTextNode('clicked'))\">Dump</a>\
         </body></html>",
        &dir,
    );

    let report = run_interactive_probe(&settings, "Schedule", TargetRole::Link, "Dump").await;

    assert!(report.passed(), "failure: {:?}", report.failure);
    assert!(report.clicked);
    let shot = dir.path().join(format!("{}.png", probe::INTERACTIVE_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_interactive_probe_records_missing_sentinel() {
    let dir = TempDir::new().unwrap();
    // The page renders, but the sentinel text never appears.
    let mut settings = test_settings(
        "data:text/html,<html><body><p>nothing here</p></body></html>",
        &dir,
    );
    settings.navigation_timeout = Duration::from_secs(3);

    let report = run_interactive_probe(&settings, "Schedule", TargetRole::Link, "Dump").await;

    assert_eq!(report.status, ProbeStatus::TargetMissing);
    assert!(!report.clicked);
    let shot = dir
        .path()
        .join(format!("{}.png", probe::INTERACTIVE_MISSING_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_interactive_probe_records_missing_target() {
    let dir = TempDir::new().unwrap();
    // Sentinel renders, target does not.
    let settings = test_settings(
        "data:text/html,<html><body><p>Schedule</p></body></html>",
        &dir,
    );

    let report = run_interactive_probe(&settings, "Schedule", TargetRole::Link, "Dump").await;

    assert_eq!(report.status, ProbeStatus::TargetMissing);
    assert!(!report.clicked);
    let shot = dir
        .path()
        .join(format!("{}.png", probe::INTERACTIVE_MISSING_SHOT));
    assert!(shot.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_rerun_overwrites_artifacts_in_place() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(
        "data:text/html,<html><head><title>Probe</title></head><body>ok</body></html>",
        &dir,
    );

    let first = run_basic_probe(&settings, None).await;
    let second = run_basic_probe(&settings, None).await;

    assert!(first.passed() && second.passed());
    // Fixed names mean reruns leave exactly one file behind.
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}
