//! Recording adapters that capture interactions to cassettes.

pub mod http;

pub use http::RecordingHttpClient;
