//! Browser port for handing a URL to the user's desktop.

/// Opens URLs for the user.
pub trait Browser: Send + Sync {
    /// Opens `url` in the default browser.
    ///
    /// # Errors
    ///
    /// Returns an error if no opener could be launched.
    fn open(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
