//! Harvest source configuration and protocol constants.

use serde_json::Value;
use url::Url;

use crate::error::{HarvesterError, Result};
use crate::types::HarvestSource;

/// JSON-LD namespace for EDC management API terms.
pub const EDC_NAMESPACE: &str = "https://w3id.org/edc/v0.0.1/ns/";

/// Protocol identifier sent in every catalog request.
pub const DATASPACE_PROTOCOL: &str = "dataspace-protocol-http";

/// Header carrying the API key unless the source configures another name.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Placeholder API key sent when no key is configured.
///
/// Connectors running with default management API settings accept this
/// literal; the header is always present, never omitted.
pub const PLACEHOLDER_API_KEY: &str = "ApiKeyDefaultValue";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Fallback notes for datasets without a description.
pub const DEFAULT_NOTES: &str = "Dataset harvested from an EDC connector catalog.";

/// Per-source harvest configuration.
///
/// Stored on the harvest source as a JSON blob and parsed once per
/// harvest job. Read-only after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// DSP endpoint of the counterparty connector.
    pub connector_dsp_endpoint: String,

    /// API key for the management API.
    pub api_key: Option<String>,

    /// Header name carrying the API key.
    pub api_key_header: Option<String>,

    /// Notes applied to packages without a description.
    pub default_notes: Option<String>,

    /// Explain URL applied when the dataset description has no marker.
    pub default_explain_url: Option<String>,
}

impl HarvestConfig {
    /// Parse and validate a source configuration blob.
    ///
    /// # Errors
    /// `Config` if the blob is not JSON, or if `connector_dsp_endpoint`
    /// is missing, not a string, or not a URL.
    pub fn from_json(blob: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(blob)
            .map_err(|e| HarvesterError::Config(format!("config is not valid JSON: {e}")))?;

        let connector_dsp_endpoint = match value.get("connector_dsp_endpoint") {
            Some(Value::String(endpoint)) => endpoint.clone(),
            Some(_) => {
                return Err(HarvesterError::Config(
                    "connector_dsp_endpoint must be a string".to_string(),
                ))
            }
            None => {
                return Err(HarvesterError::Config(
                    "connector_dsp_endpoint is required".to_string(),
                ))
            }
        };
        Url::parse(&connector_dsp_endpoint).map_err(|e| {
            HarvesterError::Config(format!(
                "connector_dsp_endpoint is not a valid URL: {e}"
            ))
        })?;

        Ok(Self {
            connector_dsp_endpoint,
            api_key: string_field(&value, "api_key"),
            api_key_header: string_field(&value, "api_key_header"),
            default_notes: string_field(&value, "default_notes"),
            default_explain_url: string_field(&value, "default_explain_url"),
        })
    }

    /// Parse the configuration attached to a harvest source.
    ///
    /// # Errors
    /// `Config` if the source has no configuration or the blob is invalid.
    pub fn from_source(source: &HarvestSource) -> Result<Self> {
        match &source.config {
            Some(blob) => Self::from_json(blob),
            None => Err(HarvesterError::Config(
                "harvest source has no configuration".to_string(),
            )),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
