//! Replaying adapters that serve recorded interactions.

pub mod browser;
pub mod http;

pub use browser::ReplayingBrowser;
pub use http::ReplayingHttpClient;
