//! Status command context
//!
//! Everything the status operations need is held here and built once at
//! startup, so tests can point the cache at a temporary directory and swap the
//! fetcher for a double.

use crate::cache::{CacheRecord, CacheStore};
use crate::extract::extract_endpoints;
use crate::poller::StatusPoller;
use std::sync::Arc;
use taskcluster_cli_client::{fetch_manifest, fetch_references, with_deadline, Fetcher};
use taskcluster_cli_common::{EndpointMap, HealthStatus, Result, Settings};
use tracing::{debug, info, warn};

pub struct StatusContext {
    settings: Settings,
    fetcher: Arc<dyn Fetcher>,
    cache: CacheStore,
}

impl StatusContext {
    pub fn new(settings: Settings, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = CacheStore::new(settings.cache_path.clone());
        Self {
            settings,
            fetcher,
            cache,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Known endpoints, served from the cache while it is fresh.
    ///
    /// A missing, expired or unreadable cache triggers a full refresh from
    /// the manifest; `force_refresh` skips the cache entirely.
    pub async fn endpoints(&self, force_refresh: bool) -> Result<EndpointMap> {
        if !force_refresh {
            match self.cache.load() {
                Ok(Some(record)) if !record.is_expired(self.settings.cache_max_age()) => {
                    debug!(services = record.endpoints.len(), "Using cached endpoints");
                    return Ok(record.endpoints);
                }
                Ok(Some(_)) => info!("Endpoint cache expired"),
                Ok(None) => info!("No endpoint cache"),
                Err(e) => warn!(error = %e, "Ignoring unreadable endpoint cache"),
            }
        }

        Ok(self.refresh().await?.endpoints)
    }

    /// Rebuild the endpoint map from the manifest and persist it.
    ///
    /// Nothing is written unless every fetch of the cycle succeeds.
    pub async fn refresh(&self) -> Result<CacheRecord> {
        info!(url = %self.settings.manifest_url, "Scraping ping URLs");
        let fetcher = self.fetcher.as_ref();
        let endpoints = with_deadline(
            "refreshing service endpoints",
            self.settings.cycle_timeout(),
            async {
                let manifest = fetch_manifest(fetcher, &self.settings.manifest_url).await?;
                let services =
                    fetch_references(fetcher, &manifest, self.settings.concurrency).await?;
                extract_endpoints(&services)
            },
        )
        .await?;

        self.cache.save(endpoints)
    }

    /// Poll the given services (all known services when empty)
    pub async fn poll(
        &self,
        endpoints: &EndpointMap,
        identifiers: &[String],
    ) -> Result<Vec<(String, HealthStatus)>> {
        let poller = StatusPoller::new(self.fetcher.as_ref(), endpoints, self.settings.concurrency);
        with_deadline(
            "polling service health",
            self.settings.cycle_timeout(),
            poller.poll(identifiers),
        )
        .await
    }
}
