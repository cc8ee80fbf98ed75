//! Live adapter for the `HttpClient` port using reqwest.

use reqwest::Client;
use tracing::debug;

use crate::config::FinderConfig;
use crate::error::TransportError;
use crate::ports::http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

/// Live HTTP client holding one connection pool for its whole lifetime.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Builds a client sending `config.user_agent` with `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &FinderConfig) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self { client })
    }
}

impl HttpClient for LiveHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            debug!(url = %request.url, query = ?request.query, "GET");
            let network = |e: reqwest::Error| TransportError::Network {
                url: request.url.clone(),
                message: e.to_string(),
            };

            let response =
                self.client.get(&request.url).query(&request.query).send().await.map_err(network)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(network)?;

            debug!(url = %request.url, status, "response");
            Ok(HttpResponse { status, body })
        })
    }
}
