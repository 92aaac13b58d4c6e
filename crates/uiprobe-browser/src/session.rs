//! Browser lifecycle management using Chrome DevTools Protocol

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uiprobe_core::{ProbeError, Result};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Chromium sandbox; disable when running inside a container
    pub sandbox: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds; also bounds element waits
    pub timeout_seconds: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            window_width: 1920,
            window_height: 1080,
            timeout_seconds: 60,
        }
    }
}

/// Active browser session with Chrome DevTools Protocol
///
/// One session is one browser with one tab. Probes acquire a session at the
/// start of a run and release it on every exit path; dropping the session
/// tears the browser down.
pub struct BrowserSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
    /// Configuration
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch a new browser instance with default configuration
    ///
    /// # Example
    /// ```no_run
    /// use uiprobe_browser::session::BrowserSession;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let session = BrowserSession::launch().await.unwrap();
    ///     session.navigate("http://localhost:8081").await.unwrap();
    /// }
    /// ```
    pub async fn launch() -> Result<Self> {
        Self::launch_with_config(BrowserConfig::default()).await
    }

    /// Launch browser with custom configuration
    pub async fn launch_with_config(config: BrowserConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, size: {}x{})",
            config.headless, config.window_width, config.window_height
        );

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .build()
            .map_err(|e| ProbeError::Launch(format!("Invalid launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| ProbeError::Launch(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ProbeError::Launch(format!("Failed to create tab: {}", e)))?;

        // Bound navigation and element waits by the configured timeout
        tab.set_default_timeout(Duration::from_secs(config.timeout_seconds));

        info!("Browser launched successfully");

        Ok(Self {
            browser,
            tab,
            config,
        })
    }

    /// Navigate to a URL and wait for the page to reach a loaded state
    ///
    /// Fails with [`ProbeError::Navigation`] if the target is unreachable or
    /// does not finish loading within the configured timeout.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| ProbeError::navigation(url, e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ProbeError::navigation(url, format!("load not reached: {}", e)))?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    /// Wait for an element to appear
    ///
    /// # Arguments
    /// * `selector` - CSS selector for the element
    /// * `timeout` - Optional timeout (defaults to the configured navigation timeout)
    pub async fn wait_for_element(&self, selector: &str, timeout: Option<Duration>) -> Result<()> {
        let timeout = timeout.unwrap_or_else(|| self.navigation_timeout());

        debug!("Waiting for element: {} (timeout: {:?})", selector, timeout);

        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_e| ProbeError::ElementNotFound(format!("selector '{}'", selector)))?;

        debug!("Element found: {}", selector);
        Ok(())
    }

    /// Pause for a fixed settle delay so asynchronous rendering can finish
    pub async fn settle(&self, delay: Duration) {
        debug!("Settling for {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    /// Execute JavaScript in the page context
    ///
    /// # Returns
    /// JSON result from JavaScript execution
    pub async fn evaluate_script(&self, script: &str) -> Result<serde_json::Value> {
        debug!("Evaluating JavaScript: {}", script);

        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ProbeError::Evaluation(e.to_string()))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Get the current page title
    pub async fn get_title(&self) -> Result<String> {
        let result = self.evaluate_script("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Navigation timeout this session was launched with
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    /// Get reference to the active tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Close the browser session
    pub async fn close(self) -> Result<()> {
        info!("Closing browser session");
        // Browser is dropped and cleaned up automatically
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("BrowserSession dropped, browser will be cleaned up");
    }
}
