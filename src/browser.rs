use crate::errors::{Result, VerifyError};
use crate::locator::Selector;
use crate::types::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default timeout for element waits and count assertions.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const POLL_INTERVAL_MS: u64 = 100;

/// An exclusively-owned headless browser with one open tab.
///
/// The Chrome process lives as long as this session; dropping the session
/// (or calling [`BrowserSession::close`]) tears it down, on error paths
/// included.
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    pub async fn new(config: BrowserConfig) -> Result<Self> {
        // Create strings first to ensure they live long enough
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        if config.disable_images {
            args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        Ok(Self { browser, tab })
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        url::Url::parse(url)?;

        self.tab
            .navigate_to(url)
            .map_err(|e| VerifyError::NavigationFailed(e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| VerifyError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    pub async fn wait_for_page_load(&self, timeout_ms: u64) -> Result<()> {
        let js_code = r#"
            (function() {
                return document.readyState === 'complete';
            })()
        "#;

        let start_time = std::time::Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        while start_time.elapsed() < timeout {
            if let Some(true) = self.evaluate(js_code).await?.as_bool() {
                return Ok(());
            }

            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }

        Err(VerifyError::NavigationFailed(
            "Page load timeout".to_string(),
        ))
    }

    /// Click the first element matching the selector, waiting up to
    /// `timeout_ms` for it to appear.
    pub async fn click(&self, selector: &Selector, timeout_ms: u64) -> Result<()> {
        // CSS-expressible selectors go through the library's own waiting
        // queries; text matching is resolved in the page.
        if let Some(css) = selector.as_css() {
            self.tab
                .wait_for_element_with_custom_timeout(&css, Duration::from_millis(timeout_ms))
                .map_err(|_| VerifyError::ElementNotFound(selector.description()))?
                .click()
                .map_err(|e| VerifyError::InteractionFailed(e.to_string()))?;

            return Ok(());
        }

        let js_code = format!(
            r#"
            (function() {{
                const element = {};
                if (element) {{
                    element.click();
                    return true;
                }}
                return false;
            }})()
        "#,
            selector.query_js()
        );

        let start_time = std::time::Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        while start_time.elapsed() < timeout {
            if let Some(true) = self.evaluate(&js_code).await?.as_bool() {
                return Ok(());
            }

            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }

        Err(VerifyError::ElementNotFound(selector.description()))
    }

    /// Number of elements currently matching the selector.
    pub async fn count_elements(&self, selector: &Selector) -> Result<usize> {
        let count = self
            .evaluate(&selector.count_js())
            .await?
            .as_u64()
            .unwrap_or(0);

        Ok(count as usize)
    }

    /// Assert that the selector matches exactly `expected` elements,
    /// re-counting every poll interval until it does or `timeout_ms`
    /// elapses. On timeout the last observed count is reported.
    pub async fn expect_count(
        &self,
        selector: &Selector,
        expected: usize,
        timeout_ms: u64,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();
        let timeout = Duration::from_millis(timeout_ms);
        let mut actual = self.count_elements(selector).await?;

        while start_time.elapsed() < timeout {
            if actual == expected {
                return Ok(());
            }

            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            actual = self.count_elements(selector).await?;
        }

        if actual == expected {
            return Ok(());
        }

        Err(VerifyError::AssertionFailed {
            selector: selector.description(),
            expected,
            actual,
        })
    }

    /// Capture a PNG of the current viewport and write it to `path`,
    /// overwriting any existing file. Parent directories are created as
    /// needed.
    pub async fn screenshot_to_file(&self, path: &Path) -> Result<()> {
        let screenshot = self.capture_screenshot().await?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(path, screenshot).await?;
        debug!("Screenshot written to {}", path.display());

        Ok(())
    }

    pub async fn screenshot_base64(&self) -> Result<String> {
        let screenshot = self.capture_screenshot().await?;
        Ok(base64::encode(screenshot))
    }

    async fn capture_screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(
                headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption::Png,
                None,
                None,
                true,
            )
            .map_err(|e| VerifyError::ScreenshotFailed(e.to_string()))
    }

    pub async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| VerifyError::InteractionFailed(e.to_string()))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Release the browser. The Chrome process is torn down when the
    /// handle drops, so this also happens implicitly on error paths.
    pub async fn close(self) -> Result<()> {
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
