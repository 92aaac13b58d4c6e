//! Configuration management for uiprobe
//!
//! Probe defaults (target URL, artifact directory, timeouts, sentinel text)
//! come from `uiprobe.toml`; CLI flags override individual values. With no
//! config file present, the built-in defaults point at the usual local dev
//! server, so `uiprobe basic` works out of the box.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{ProbeError, Result};

/// Repository-level uiprobe configuration
///
/// Loaded from `uiprobe.toml` in the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiprobeConfig {
    /// URL of the application under test
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Directory screenshots are written to
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Text that proves the application has rendered
    #[serde(default = "default_sentinel_text")]
    pub sentinel_text: String,

    /// Wait and settle durations
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Browser launch defaults
    #[serde(default)]
    pub browser: BrowserDefaults,
}

/// Bounded waits used by every probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Maximum seconds to wait for the page to reach a loaded state
    #[serde(default = "default_navigation_secs")]
    pub navigation_secs: u64,

    /// Settle delay after navigation, before capture (milliseconds)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Settle delay after a click, before capture (milliseconds)
    #[serde(default = "default_click_settle_ms")]
    pub click_settle_ms: u64,
}

/// Browser launch defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserDefaults {
    /// Run in headless mode
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chromium sandbox (disable when running inside a container)
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,

    /// Browser window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

// Default value providers
fn default_target_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("verification")
}

fn default_sentinel_text() -> String {
    "Schedule".to_string()
}

fn default_navigation_secs() -> u64 {
    60
}

fn default_settle_ms() -> u64 {
    5000
}

fn default_click_settle_ms() -> u64 {
    2000
}

fn default_headless() -> bool {
    true
}

fn default_sandbox() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

impl UiprobeConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        PathBuf::from("uiprobe.toml")
    }

    /// Load configuration from a file, or use defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                ProbeError::Other(format!("Failed to parse config file {}: {}", path.display(), e))
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| ProbeError::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for UiprobeConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            artifact_dir: default_artifact_dir(),
            sentinel_text: default_sentinel_text(),
            timeouts: TimeoutConfig::default(),
            browser: BrowserDefaults::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            navigation_secs: default_navigation_secs(),
            settle_ms: default_settle_ms(),
            click_settle_ms: default_click_settle_ms(),
        }
    }
}

impl Default for BrowserDefaults {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            sandbox: default_sandbox(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}
