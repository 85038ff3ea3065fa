//! Core data types: the target package schema and the harvest framework
//! objects this plugin is written against.

use serde::{Deserialize, Serialize};

/// One entry of the package's extensible attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub key: String,
    pub value: String,
}

impl Extra {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A package tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A concrete downloadable representation of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    /// URL of the page explaining the dataset's terms of use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_url: Option<String>,

    /// CADDE contract confirmation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caddec_required: Option<String>,

    /// CADDE resource transfer type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caddec_resource_type: Option<String>,
}

/// The host platform's package representation.
///
/// Constructed fresh per harvested dataset and handed to the host
/// framework for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,

    pub title: String,

    pub notes: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub extras: Vec<Extra>,
}

impl Package {
    /// Append an entry to the attribute bag.
    pub fn add_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.push(Extra::new(key, value));
    }

    /// Look up an attribute bag entry by key (first match wins).
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|extra| extra.key == key)
            .map(|extra| extra.value.as_str())
    }
}

/// A harvest source: where to fetch from and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSource {
    /// Catalog request endpoint of the management API, or a local file
    /// path for fixtures.
    pub url: String,

    /// Source configuration as a JSON blob.
    pub config: Option<String>,
}

/// One polling run against a harvest source.
///
/// Carries the gather error sink: fetch failures are recorded here and
/// surfaced to the operator by the host framework.
#[derive(Debug, Clone)]
pub struct HarvestJob {
    pub source: HarvestSource,
    gather_errors: Vec<String>,
}

impl HarvestJob {
    #[must_use]
    pub fn new(source: HarvestSource) -> Self {
        Self {
            source,
            gather_errors: Vec::new(),
        }
    }

    /// Record a gather error for this job.
    pub fn save_gather_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(error = %message, "Gather error");
        self.gather_errors.push(message);
    }

    /// Errors recorded so far during the gather stage.
    #[must_use]
    pub fn gather_errors(&self) -> &[String] {
        &self.gather_errors
    }
}

/// One fetched dataset, queued for the import stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestObject {
    /// Stable identifier of the dataset within its source.
    pub guid: String,

    /// Serialized dataset record.
    pub content: String,

    /// Framework metadata attached to this object (e.g. `status`).
    pub extras: Vec<Extra>,
}

impl HarvestObject {
    #[must_use]
    pub fn new(guid: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            content: content.into(),
            extras: Vec::new(),
        }
    }

    /// Look up a named metadata extra.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|extra| extra.key == key)
            .map(|extra| extra.value.as_str())
    }
}
