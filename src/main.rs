use hotspot_verify::{BrowserConfig, BrowserSession, VerificationScenario};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting hotspot editor verification");

    let config = BrowserConfig::default();
    let session = BrowserSession::new(config).await?;

    // Run the scenario first, then release the browser on both paths
    // before reporting the outcome.
    let outcome = VerificationScenario::new().run(&session).await;
    session.close().await?;

    match outcome {
        Ok(()) => {
            info!("Verification passed");
            Ok(())
        }
        Err(e) => {
            error!("Verification failed: {}", e);
            Err(e.into())
        }
    }
}
