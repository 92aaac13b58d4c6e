//! Headless browser probes over the Chrome DevTools Protocol (CDP)
//!
//! This crate drives a headless Chrome/Chromium instance through short,
//! fixed verification scripts ("probes") against a running web application
//! and leaves screenshots behind as evidence.
//!
//! # Features
//!
//! - **Session Management**: Launch and control Chrome/Chromium browsers
//! - **Screenshot Capture**: Full-page captures stored under fixed artifact names
//! - **Console Capture**: Stream console messages and page errors to stdout
//! - **Element Interaction**: Locate targets by role and name, click, re-capture
//!
//! # Example
//!
//! ```no_run
//! use uiprobe_browser::probe::{run_basic_probe, ProbeSettings};
//! use uiprobe_core::UiprobeConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut settings = ProbeSettings::from_config(&UiprobeConfig::default());
//!     settings.url = "https://example.com".to_string();
//!
//!     // Never returns Err; every outcome is folded into the report.
//!     let report = run_basic_probe(&settings, None).await;
//!     println!("{} probe: {}", report.kind, report.status);
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium browser installed
//! - For headless operation, no additional setup required
//! - Inside containers, run with the sandbox disabled
//!
//! # Architecture
//!
//! The crate is organized into modules:
//!
//! - [`session`]: Browser lifecycle and navigation
//! - [`screenshot`]: Screenshot capture with artifact storage
//! - [`console`]: Console message and page error capture
//! - [`locator`]: Element location by role, name and visible text
//! - [`probe`]: The three probe scripts and their reports

pub mod console;
pub mod locator;
pub mod probe;
pub mod screenshot;
pub mod session;

// Re-export commonly used types
pub use console::attach_console_printer;
pub use locator::TargetRole;
pub use probe::{
    run_basic_probe, run_console_probe, run_interactive_probe, ProbeReport, ProbeSettings,
};
pub use screenshot::{capture_failure_screenshot, capture_screenshot, ScreenshotOptions};
pub use session::{BrowserConfig, BrowserSession};

#[cfg(test)]
mod tests {
    #[test]
    fn test_public_api_availability() {
        // This test just ensures all public APIs are accessible
        // Actual functionality is tested in individual modules
    }
}
