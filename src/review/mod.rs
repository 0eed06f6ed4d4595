//! Turning file content into review prose.

mod chat;
mod client;

pub use chat::ChatReviewer;
pub use client::{HttpClient, HttpResponse, ReqwestClient};

use reqwest::Url;

use crate::category::Category;
use crate::config::DATA_PLACEHOLDER;
use crate::error::{CodebuddyError, Result};

/// External collaborator producing a review for one file.
pub trait Reviewer {
    /// Review `content` using the prompt of `category`.
    ///
    /// # Errors
    /// Returns `Network` when the service is unreachable and `Upstream` when
    /// it answers with an error status or an unusable body.
    fn review(&self, category: &Category, content: &str) -> Result<String>;
}

/// Substitute `content` for every `{data}` placeholder in `template`.
#[must_use]
pub fn render_prompt(template: &str, content: &str) -> String {
    template.replace(DATA_PLACEHOLDER, content)
}

/// Check that `url` is an absolute http(s) URL with a host.
///
/// # Errors
/// Returns `InvalidArgument` otherwise.
pub fn validate_api_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| CodebuddyError::InvalidArgument(format!("Invalid API URL '{url}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(CodebuddyError::InvalidArgument(format!(
            "Invalid API URL '{url}': expected http(s)://host[:port]"
        )));
    }

    Ok(parsed)
}

/// Resolve `endpoint` against `base` as a relative reference.
///
/// A relative endpoint replaces the last segment of a base path without a
/// trailing slash, so `http://host/api` + `v1/x` gives `http://host/v1/x`.
///
/// # Errors
/// Returns `InvalidArgument` if either part is not a valid URL.
pub fn endpoint_url(base: &str, endpoint: &str) -> Result<Url> {
    let base = validate_api_url(base)?;
    base.join(endpoint).map_err(|e| {
        CodebuddyError::InvalidArgument(format!("Invalid API endpoint '{endpoint}': {e}"))
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
