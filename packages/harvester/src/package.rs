//! Package building and enrichment.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::config::{HarvestConfig, DEFAULT_NOTES};
use crate::convert::dcat_to_package;
use crate::error::Result;
use crate::normalize::normalize_dataset;
use crate::types::{HarvestObject, Package};

/// Regex matching an `explain_url:` marker in a free-text description.
/// The URL runs until whitespace or a quote character.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EXPLAIN_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"explain_url:\s*(https?://[^\s"']+)"#).expect("valid regex"));

/// Build the baseline package from a harvested record's content.
///
/// Parses the content, normalizes the record, runs the generic DCAT
/// converter, then overrides the package name with the dataset `id`.
///
/// # Returns
/// The baseline package together with the normalized dataset record.
pub fn build_package(content: &str) -> Result<(Package, Value)> {
    let dcat: Value = serde_json::from_str(content)?;
    let dcat = normalize_dataset(dcat)?;

    let mut package = dcat_to_package(&dcat);
    if let Some(id) = dcat.get("id").and_then(Value::as_str) {
        package.name = id.to_string();
    }

    Ok((package, dcat))
}

/// Enrich a baseline package with derived metadata.
///
/// Adds the issue date for newly seen datasets, the provider id, the
/// stable per-connector dataset UUID, and per-resource explain metadata.
///
/// # Arguments
/// * `package` - baseline package to enrich
/// * `dcat` - normalized dataset record
/// * `harvest_object` - framework metadata for this fetched item
/// * `config` - parsed source configuration
/// * `site_url` - the platform's catalog base URL, final explain fallback
pub fn modify_package(
    package: &mut Package,
    dcat: &Value,
    harvest_object: &HarvestObject,
    config: &HarvestConfig,
    site_url: &str,
) {
    if package.notes.trim().is_empty() {
        package.notes = config
            .default_notes
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTES.to_string());
    }

    if harvest_object.extra("status") == Some("new") {
        package.add_extra("issued", Utc::now().format("%Y-%m-%d").to_string());
    }

    package.add_extra(
        "caddec_provider_id",
        config.connector_dsp_endpoint.clone(),
    );
    package.add_extra(
        "caddec_dataset_id_for_detail",
        dataset_detail_id(&config.connector_dsp_endpoint, &package.name).to_string(),
    );

    let explain_url = explain_url(dcat, config, site_url);
    for resource in &mut package.resources {
        resource.explain_url = Some(explain_url.clone());
        resource.caddec_required = Some("required".to_string());
        resource.caddec_resource_type = Some("file/http".to_string());
    }
}

/// Stable identifier for a dataset within one connector.
///
/// The endpoint URL is hashed into a namespace UUID under the standard
/// URL namespace, then the package name under that namespace. The same
/// (endpoint, name) pair always derives the same UUID.
#[must_use]
pub fn dataset_detail_id(endpoint: &str, name: &str) -> Uuid {
    let namespace = Uuid::new_v5(&Uuid::NAMESPACE_URL, endpoint.as_bytes());
    Uuid::new_v5(&namespace, name.as_bytes())
}

/// Resolve the explain URL for a dataset.
///
/// Priority: `explain_url:` marker in the description, then the source's
/// configured default, then the platform's catalog base URL.
fn explain_url(dcat: &Value, config: &HarvestConfig, site_url: &str) -> String {
    dcat.get("description")
        .and_then(Value::as_str)
        .and_then(|description| EXPLAIN_URL_RE.captures(description))
        .and_then(|captures| captures.get(1))
        .map(|url| url.as_str().to_string())
        .or_else(|| config.default_explain_url.clone())
        .unwrap_or_else(|| site_url.to_string())
}
