//! Generic DCAT to package conversion.
//!
//! The baseline mapping applied to every normalized dataset record before
//! enrichment: direct field mapping, one resource per distribution entry,
//! a `guid` extra from the DCAT identifier.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::types::{Extra, Package, Resource, Tag};

/// Regex for name generation - matches non-word characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAME_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Regex for name generation - matches whitespace and dashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAME_SPACE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Generate a URL-friendly package name from a title.
///
/// # Examples
/// ```
/// use edc_harvester::convert::name_from_title;
///
/// assert_eq!(name_from_title("Traffic counts (hourly)"), "traffic_counts_hourly");
/// ```
#[must_use]
pub fn name_from_title(title: &str) -> String {
    let text = title.to_lowercase();
    let text = NAME_NON_WORD.replace_all(&text, "");
    let text = NAME_SPACE_DASH.replace_all(&text, "_");
    text.trim_matches('_').to_string()
}

/// Convert a normalized DCAT dataset into the baseline package.
#[must_use]
pub fn dcat_to_package(dcat: &Value) -> Package {
    let title = text(dcat, "title").unwrap_or_default();

    let tags = dcat
        .get("keyword")
        .and_then(Value::as_array)
        .map(|keywords| {
            keywords
                .iter()
                .filter_map(Value::as_str)
                .map(Tag::new)
                .collect()
        })
        .unwrap_or_default();

    let resources = dcat
        .get("distribution")
        .and_then(Value::as_array)
        .map(|distributions| {
            distributions
                .iter()
                .map(distribution_to_resource)
                .collect()
        })
        .unwrap_or_default();

    let mut extras = Vec::new();
    if let Some(identifier) = text(dcat, "identifier") {
        extras.push(Extra::new("guid", identifier));
    }

    Package {
        name: name_from_title(&title),
        title,
        notes: text(dcat, "description").unwrap_or_default(),
        url: text(dcat, "landingPage"),
        tags,
        resources,
        extras,
    }
}

/// Convert one distribution entry into a resource.
fn distribution_to_resource(distribution: &Value) -> Resource {
    Resource {
        name: text(distribution, "title"),
        description: text(distribution, "description"),
        url: text(distribution, "accessURL").or_else(|| text(distribution, "downloadURL")),
        format: text(distribution, "format"),
        mimetype: text(distribution, "mediaType"),
        ..Resource::default()
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
