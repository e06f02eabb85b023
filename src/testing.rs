use crate::errors::Result;
use crate::{BrowserConfig, BrowserSession};

pub struct TestHelper;

impl TestHelper {
    pub async fn create_test_session() -> Result<BrowserSession> {
        let config = BrowserConfig {
            headless: true,
            ..Default::default()
        };
        BrowserSession::new(config).await
    }
}
