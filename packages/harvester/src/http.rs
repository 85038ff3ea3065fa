//! HTTP client construction and session customization hooks.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("edc-harvester/", env!("CARGO_PKG_VERSION"));

/// Extension point for customizing the outgoing HTTP session.
///
/// Registered customizers run in order before the client is built and may
/// adjust anything on the builder: TLS settings, proxies, extra default
/// headers. Mirrors the `update_session` hook exposed to RDF harvester
/// plugins by the host framework.
pub trait SessionCustomizer {
    fn update_session(&self, builder: ClientBuilder) -> ClientBuilder;
}

/// Create a configured HTTP client.
///
/// # Arguments
/// * `customizers` - session customization hooks, applied in order
///
/// # Returns
/// A `reqwest::blocking::Client` with timeout and user agent set, after
/// every customizer has had its say.
pub fn create_client(customizers: &[Box<dyn SessionCustomizer>]) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT);

    for customizer in customizers {
        builder = customizer.update_session(builder);
    }

    Ok(builder.build()?)
}
