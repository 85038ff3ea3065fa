//! Catalog fetching from the connector management API.
//!
//! The EDC management API returns the full catalog per request: there is
//! no pagination and no retry loop here. Transport failures are reported
//! to the job's gather error sink and surfaced as `None`; retry policy
//! belongs to the host framework.

use reqwest::blocking::Client;
use serde_json::json;

use crate::config::{
    HarvestConfig, DATASPACE_PROTOCOL, DEFAULT_API_KEY_HEADER, EDC_NAMESPACE, PLACEHOLDER_API_KEY,
};
use crate::types::HarvestJob;

/// Fetch the catalog document from a management API endpoint.
///
/// Non-HTTP(S) URLs are read from the local filesystem, which is how
/// file-based fixtures are supported.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - catalog request endpoint (or local file path)
/// * `config` - parsed source configuration
/// * `job` - current harvest job, receives error reports
///
/// # Returns
/// `(content, content_type)` on success, with the media type stripped of
/// any `;` parameter suffix. `None` after reporting the failure to the
/// job's gather error sink.
pub fn fetch_catalog(
    client: &Client,
    url: &str,
    config: &HarvestConfig,
    job: &mut HarvestJob,
) -> Option<(String, String)> {
    if !url.to_lowercase().starts_with("http") {
        tracing::debug!(url, "Getting local file");
        return load_local_file(url, job);
    }

    tracing::debug!(url, "Getting catalog");

    // The key header is always present. A configured header name only
    // applies to a configured key; the placeholder goes under the default.
    let (api_key_header, api_key) = match config.api_key.as_deref() {
        Some(key) => (
            config
                .api_key_header
                .as_deref()
                .unwrap_or(DEFAULT_API_KEY_HEADER),
            key,
        ),
        None => (DEFAULT_API_KEY_HEADER, PLACEHOLDER_API_KEY),
    };

    let catalog_request = json!({
        "@context": { "edc": EDC_NAMESPACE },
        "protocol": DATASPACE_PROTOCOL,
        "counterPartyAddress": config.connector_dsp_endpoint,
    });
    tracing::debug!(request = %catalog_request, "Catalog request");

    let response = match client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(api_key_header, api_key)
        .json(&catalog_request)
        .send()
    {
        Ok(response) => response,
        Err(e) => {
            job.save_gather_error(transport_error_message(url, &e));
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        job.save_gather_error(format!(
            "Could not get content from {url}. Server responded with {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ));
        return None;
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .unwrap_or_else(|| "application/json".to_string());

    match response.text() {
        Ok(content) => Some((content, content_type)),
        Err(e) => {
            job.save_gather_error(transport_error_message(url, &e));
            None
        }
    }
}

/// Classify a transport failure into a gather error message.
fn transport_error_message(url: &str, error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Could not get content from {url} because the connection timed out.")
    } else {
        format!("Could not get content from {url} because a connection error occurred. {error}")
    }
}

/// Load catalog content from the local filesystem.
fn load_local_file(url: &str, job: &mut HarvestJob) -> Option<(String, String)> {
    match std::fs::read_to_string(url) {
        Ok(content) => Some((content, "application/json".to_string())),
        Err(e) => {
            job.save_gather_error(format!("Could not read local file {url}: {e}"));
            None
        }
    }
}
