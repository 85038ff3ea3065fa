//! EDC Connector catalog harvester.
//!
//! Polls an EDC Connector's management API for its DCAT catalog,
//! normalizes dataset records across connector dialects, and maps every
//! record into the host cataloging platform's package schema.
//!
//! # Example
//!
//! ```
//! use edc_harvester::config::HarvestConfig;
//!
//! let config = HarvestConfig::from_json(
//!     r#"{"connector_dsp_endpoint": "https://provider.example/dsp"}"#,
//! );
//! assert!(config.is_ok());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: harvest source configuration and protocol constants
//! - [`types`]: package schema and harvest framework types
//! - [`error`]: error types and Result alias
//! - [`http`]: HTTP client and session customization hooks
//! - [`catalog`]: catalog fetching from the management API
//! - [`extract`]: splitting a catalog document into dataset records
//! - [`normalize`]: dataset record normalization
//! - [`convert`]: generic DCAT to package conversion
//! - [`package`]: package building and enrichment
//! - [`harvester`]: gather/import pipeline
//! - [`cli`]: command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod harvester;
pub mod http;
pub mod normalize;
pub mod package;
pub mod types;

// Re-export main functions
pub use harvester::{gather, import, run_harvest};

// Re-export commonly used items
pub use config::HarvestConfig;
pub use error::{HarvesterError, Result};
pub use types::{HarvestJob, HarvestObject, HarvestSource, Package};
