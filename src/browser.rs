//! Opening article links in the user's browser.

use thiserror::Error;

use crate::util::{validate_url_for_open, UrlValidationError};

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("Refusing to open link: {0}")]
    Rejected(#[from] UrlValidationError),
    #[error("Failed to open browser: {0}")]
    Launch(#[from] std::io::Error),
}

/// Capability for handing a URL to an external viewer.
///
/// Implementations may block; the dispatcher runs them on a blocking task.
pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Platform default browser via the `open` crate.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        let url = validate_url_for_open(url)?;
        open::that(url.as_str())?;
        tracing::info!(url = %url, "Opened link in browser");
        Ok(())
    }
}
