//! Replaying adapter for the `Browser` port.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::ports::browser::Browser;

/// Remembers requested URLs instead of launching anything.
#[derive(Clone, Default)]
pub struct ReplayingBrowser {
    opened: Arc<Mutex<Vec<String>>>,
}

impl ReplayingBrowser {
    /// Creates a browser that opens nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs passed to [`Browser::open`], in order.
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl Browser for ReplayingBrowser {
    fn open(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(url, "browser launch suppressed during replay");
        self.opened.lock().map_err(|e| e.to_string())?.push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_opened_list() {
        let browser = ReplayingBrowser::new();
        let handle = browser.clone();
        browser.open("https://example.test").unwrap();
        assert_eq!(handle.opened(), vec!["https://example.test".to_string()]);
    }
}
