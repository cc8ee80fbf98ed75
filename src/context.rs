//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::adapters::live::browser::LiveBrowser;
use crate::adapters::live::http::LiveHttpClient;
use crate::adapters::recording::RecordingHttpClient;
use crate::adapters::replaying::{ReplayingBrowser, ReplayingHttpClient};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::FinderConfig;
use crate::ports::browser::Browser;
use crate::ports::http::HttpClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// HTTP client for the hosting API, shared by every lookup.
    pub http: Box<dyn HttpClient>,
    /// Browser for opening the resulting URL.
    pub browser: Box<dyn Browser>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context talking to the real hosting API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &FinderConfig) -> Result<Self, String> {
        Ok(Self {
            http: Box::new(LiveHttpClient::new(config)?),
            browser: Box::new(LiveBrowser),
            recorder: None,
        })
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work. This is the developer-only
    /// mechanism for capturing cassettes via `INTEGRATIONS_FINDER_RECORD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(config: &FinderConfig, path: &Path) -> Result<Self, String> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "integrations-finder")));
        let live = LiveHttpClient::new(config)?;
        Ok(Self {
            http: Box::new(RecordingHttpClient::new(Box::new(live), Arc::clone(&recorder))),
            browser: Box::new(LiveBrowser),
            recorder: Some(recorder),
        })
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self::with_ports(Box::new(ReplayingHttpClient::new(cassette)), Box::new(ReplayingBrowser::new()))
    }

    /// Creates a context from explicit port implementations.
    #[must_use]
    pub fn with_ports(http: Box<dyn HttpClient>, browser: Box<dyn Browser>) -> Self {
        Self { http, browser, recorder: None }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let saved = match recorder.lock() {
            Ok(guard) => guard.save().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match saved {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => warn!("failed to write cassette: {e}"),
        }
    }
}
