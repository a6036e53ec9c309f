//! Health polling of known services

use taskcluster_cli_client::{fan_out, fetch_json, Fetcher};
use taskcluster_cli_common::{CliError, EndpointMap, HealthStatus, Result};
use tracing::debug;

/// Polls health endpoints from a resolved [`EndpointMap`]
pub struct StatusPoller<'a> {
    fetcher: &'a dyn Fetcher,
    endpoints: &'a EndpointMap,
    concurrency: usize,
}

impl<'a> StatusPoller<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, endpoints: &'a EndpointMap, concurrency: usize) -> Self {
        Self {
            fetcher,
            endpoints,
            concurrency,
        }
    }

    /// Resolve the identifiers to poll against the known set.
    ///
    /// An empty request means every known service. Duplicates are dropped,
    /// keeping first occurrence order. Any unknown identifier rejects the
    /// whole request.
    pub fn resolve(&self, identifiers: &[String]) -> Result<Vec<(String, String)>> {
        if identifiers.is_empty() {
            return Ok(self
                .endpoints
                .iter()
                .map(|(id, url)| (id.clone(), url.clone()))
                .collect());
        }

        let mut targets: Vec<(String, String)> = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let url = self
                .endpoints
                .get(identifier)
                .ok_or_else(|| CliError::UnknownService(identifier.clone()))?;
            if !targets.iter().any(|(id, _)| id == identifier) {
                targets.push((identifier.clone(), url.clone()));
            }
        }
        Ok(targets)
    }

    /// Poll the requested services, returning statuses in request order.
    ///
    /// Validation happens before any request is issued.
    pub async fn poll(&self, identifiers: &[String]) -> Result<Vec<(String, HealthStatus)>> {
        let targets = self.resolve(identifiers)?;
        let fetcher = self.fetcher;

        fan_out(targets, self.concurrency, |(identifier, url)| {
            poll_one(fetcher, identifier, url)
        })
        .await
    }
}

async fn poll_one(
    fetcher: &dyn Fetcher,
    identifier: String,
    url: String,
) -> Result<(String, HealthStatus)> {
    debug!(service = %identifier, url = %url, "Polling");
    let status: HealthStatus = fetch_json(fetcher, &url).await?;
    Ok((identifier, status))
}
