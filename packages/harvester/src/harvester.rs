//! Gather and import stages tying the pipeline together.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::catalog::fetch_catalog;
use crate::config::HarvestConfig;
use crate::error::Result;
use crate::extract::guids_and_datasets;
use crate::http::{create_client, SessionCustomizer};
use crate::package::{build_package, modify_package};
use crate::types::{HarvestJob, HarvestObject, Package};

/// Plugin metadata presented to the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Describe this harvester.
#[must_use]
pub fn info() -> HarvesterInfo {
    HarvesterInfo {
        name: "edc",
        title: "EDC Connector",
        description: "Harvester for EDC Connectors using the Management API. \
                      Set an API endpoint for catalog requesting as URL.",
    }
}

/// Gather stage: fetch the catalog and create one harvest object per
/// dataset record.
///
/// A fetch failure yields an empty batch; the failure has already been
/// reported to the job's gather error sink, and retry policy belongs to
/// the host framework.
///
/// # Errors
/// Configuration errors, and document-shape errors from extraction.
pub fn gather(client: &Client, job: &mut HarvestJob) -> Result<Vec<HarvestObject>> {
    let config = HarvestConfig::from_source(&job.source)?;

    let url = job.source.url.clone();
    let Some((content, content_type)) = fetch_catalog(client, &url, &config, job) else {
        return Ok(Vec::new());
    };
    tracing::debug!(%content_type, "Fetched catalog document");

    let objects = guids_and_datasets(&content)?
        .into_iter()
        .map(|(guid, content)| HarvestObject::new(guid, content))
        .collect();
    Ok(objects)
}

/// Import stage: convert one harvest object into an enriched package.
///
/// # Errors
/// JSON and malformed-record errors from the package builder.
pub fn import(
    harvest_object: &HarvestObject,
    config: &HarvestConfig,
    site_url: &str,
) -> Result<(Package, Value)> {
    let (mut package, dcat) = build_package(&harvest_object.content)?;
    modify_package(&mut package, &dcat, harvest_object, config, site_url);
    Ok((package, dcat))
}

/// Run one complete harvest: gather, then import every object.
///
/// # Arguments
/// * `job` - the harvest job; collects gather errors
/// * `customizers` - session customization hooks for the HTTP client
/// * `site_url` - the platform's catalog base URL
pub fn run_harvest(
    job: &mut HarvestJob,
    customizers: &[Box<dyn SessionCustomizer>],
    site_url: &str,
) -> Result<Vec<Package>> {
    let config = HarvestConfig::from_source(&job.source)?;
    let client = create_client(customizers)?;

    let objects = gather(&client, job)?;
    let mut packages = Vec::with_capacity(objects.len());
    for object in &objects {
        let (package, _) = import(object, &config, site_url)?;
        packages.push(package);
    }
    Ok(packages)
}
