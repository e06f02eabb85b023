use crate::browser::{BrowserSession, DEFAULT_TIMEOUT_MS};
use crate::errors::Result;
use crate::locator::Selector;
use std::path::PathBuf;
use tracing::info;

/// Route served by the local dev server.
pub const TARGET_URL: &str = "http://localhost:3000/mobile-test";

/// Visible text of the control that creates a hotspot.
pub const ADD_HOTSPOT_TEXT: &str = "Add Hotspot";

/// Marker rendered for every hotspot on the page.
pub const HOTSPOT_SELECTOR: &str = ".hotspot-element";

/// Accessibility label of the toolbar delete control.
pub const DELETE_LABEL: &str = "Delete hotspot";

/// Output path for the post-run screenshot, overwritten on every run.
pub const SCREENSHOT_PATH: &str = "verification/verification.png";

/// The fixed add/select/delete acceptance scenario.
///
/// Every step delegates waiting to the session; nothing is caught or
/// retried here, so the first failing step aborts the run with its error.
#[derive(Debug, Clone)]
pub struct VerificationScenario {
    pub target_url: String,
    pub screenshot_path: PathBuf,
    pub timeout_ms: u64,
}

impl Default for VerificationScenario {
    fn default() -> Self {
        Self {
            target_url: TARGET_URL.to_string(),
            screenshot_path: PathBuf::from(SCREENSHOT_PATH),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl VerificationScenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run(&self, session: &BrowserSession) -> Result<()> {
        let hotspot = Selector::css(HOTSPOT_SELECTOR);

        info!("Navigating to {}", self.target_url);
        session.navigate(&self.target_url).await?;
        session.wait_for_page_load(self.timeout_ms).await?;

        // The scenario only makes sense against a clean editor. The app is
        // expected to start with zero hotspots; fail here rather than
        // produce a misleading result further down.
        session.expect_count(&hotspot, 0, self.timeout_ms).await?;

        info!("Clicking '{}'", ADD_HOTSPOT_TEXT);
        session
            .click(&Selector::text("button", ADD_HOTSPOT_TEXT), self.timeout_ms)
            .await?;

        info!("Selecting the created hotspot");
        session.click(&hotspot, self.timeout_ms).await?;

        info!("Clicking the delete control");
        session
            .click(
                &Selector::aria_label("button", DELETE_LABEL),
                self.timeout_ms,
            )
            .await?;

        info!("Verifying the hotspot is gone");
        session.expect_count(&hotspot, 0, self.timeout_ms).await?;

        info!("Capturing screenshot to {}", self.screenshot_path.display());
        session.screenshot_to_file(&self.screenshot_path).await?;

        Ok(())
    }
}
