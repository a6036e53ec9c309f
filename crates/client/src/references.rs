//! Manifest and reference document fetching

use crate::fanout::fan_out;
use crate::fetcher::{fetch_json, Fetcher};
use taskcluster_cli_common::{Manifest, Result, ServiceMap, ServiceReference};
use tracing::{debug, info};

/// Fetch the manifest mapping service names to reference document URLs
pub async fn fetch_manifest(fetcher: &dyn Fetcher, url: &str) -> Result<Manifest> {
    info!(url = %url, "Fetching service manifest");
    let manifest: Manifest = fetch_json(fetcher, url).await?;
    debug!(services = manifest.len(), "Manifest loaded");
    Ok(manifest)
}

/// Fetch and parse a single reference document
pub async fn fetch_reference(fetcher: &dyn Fetcher, url: &str) -> Result<ServiceReference> {
    fetch_json(fetcher, url).await
}

/// Fetch every reference listed in `manifest`, at most `limit` at a time.
///
/// Results are merged by the caller's task once all fetches have completed,
/// keyed by manifest service name.
pub async fn fetch_references(
    fetcher: &dyn Fetcher,
    manifest: &Manifest,
    limit: usize,
) -> Result<ServiceMap> {
    let fetched = fan_out(manifest.iter(), limit, |(name, url)| {
        fetch_named_reference(fetcher, name, url)
    })
    .await?;

    Ok(fetched.into_iter().collect())
}

async fn fetch_named_reference(
    fetcher: &dyn Fetcher,
    name: &str,
    url: &str,
) -> Result<(String, ServiceReference)> {
    info!(service = %name, "Fetching reference");
    let reference = fetch_reference(fetcher, url).await?;
    Ok((name.to_string(), reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockFetcher;
    use taskcluster_cli_common::CliError;

    const QUEUE_REFERENCE: &str = r#"{
        "baseUrl": "https://queue.example.com",
        "entries": [{"name": "ping", "route": "/ping"}]
    }"#;

    #[tokio::test]
    async fn test_fetch_references_one_call_per_service() {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_get()
            .withf(|url: &str| url == "https://ref.example/queue")
            .times(1)
            .returning(|_| Ok(QUEUE_REFERENCE.to_string()));
        fetcher
            .expect_get()
            .withf(|url: &str| url == "https://ref.example/auth")
            .times(1)
            .returning(|_| {
                Ok(r#"{"baseUrl": "https://auth.example.com", "entries": []}"#.to_string())
            });

        let manifest: Manifest = [
            ("queue", "https://ref.example/queue"),
            ("auth", "https://ref.example/auth"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let services = fetch_references(&fetcher, &manifest, 4).await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services["queue"].base_url, "https://queue.example.com");
        assert!(services["auth"].entries.is_empty());
    }

    #[tokio::test]
    async fn test_single_failure_aborts_stage() {
        let mut fetcher = MockFetcher::new();
        fetcher.expect_get().returning(|url| {
            if url.ends_with("/auth") {
                Err(CliError::Status {
                    url: url.to_string(),
                    status: 500,
                })
            } else {
                Ok(QUEUE_REFERENCE.to_string())
            }
        });

        let manifest: Manifest = [
            ("auth".to_string(), "https://ref.example/auth".to_string()),
            ("queue".to_string(), "https://ref.example/queue".to_string()),
        ]
        .into_iter()
        .collect();

        let err = fetch_references(&fetcher, &manifest, 2).await.unwrap_err();
        assert!(matches!(err, CliError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_manifest_must_be_object_of_strings() {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_get()
            .returning(|_| Ok(r#"{"queue": 42}"#.to_string()));

        let err = fetch_manifest(&fetcher, "https://ref.example/manifest.json")
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
    }
}
