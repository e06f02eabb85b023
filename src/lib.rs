pub mod browser;
pub mod errors;
pub mod locator;
pub mod scenario;
pub mod testing;
pub mod types;

pub use browser::BrowserSession;
pub use errors::VerifyError;
pub use locator::Selector;
pub use scenario::VerificationScenario;
pub use types::*;
