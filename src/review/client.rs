use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::error::{CodebuddyError, Result};

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP client abstraction for dependency injection.
pub trait HttpClient {
    /// POST a JSON document and return the raw response.
    ///
    /// Only transport failures are errors; any status code is a response.
    ///
    /// # Errors
    /// Returns `Network` if the request could not be sent or the body could not be read.
    fn post_json(&self, url: &str, body: &str) -> Result<HttpResponse>;
}

/// Production HTTP client using reqwest.
///
/// This implementation cannot be unit tested without a real HTTP server,
/// so it is excluded from coverage measurement.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client. `None` disables the request timeout.
    ///
    /// # Errors
    /// Returns `Network` if the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodebuddyError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(not(tarpaulin_include))]
impl HttpClient for ReqwestClient {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    CodebuddyError::Network(format!("Request timeout: {url}"))
                } else if e.is_connect() {
                    CodebuddyError::Network(format!("Failed to connect to {url}"))
                } else {
                    CodebuddyError::Network(format!("Request to {url} failed: {e}"))
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| CodebuddyError::Network(format!("Failed to read response from {url}: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
