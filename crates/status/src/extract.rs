//! Derivation of health-check URLs from reference documents

use reqwest::Url;
use std::collections::BTreeMap;
use taskcluster_cli_common::{CliError, EndpointMap, Result, ServiceMap};
use tracing::{debug, warn};

/// Short service identifier: the base URL's hostname up to the first `.`
///
/// `https://queue.taskcluster.net/v1` -> `queue`
///
/// The hostname keeps the spelling used in `base_url`; URL parsing would
/// otherwise lowercase it.
pub fn service_identifier(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url).map_err(|e| CliError::Parse {
        context: format!("base URL {:?}", base_url),
        message: e.to_string(),
    })?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| CliError::Parse {
            context: format!("base URL {:?}", base_url),
            message: "no hostname".to_string(),
        })?;

    let host = original_spelling(base_url, host);
    Ok(host.split('.').next().unwrap_or(host).to_string())
}

/// The slice of `base_url` that `host` was normalized from, or `host` itself
/// when it does not appear verbatim (e.g. punycoded names)
fn original_spelling<'a>(base_url: &'a str, host: &'a str) -> &'a str {
    let authority = base_url.find("://").map_or(0, |i| i + 3);
    base_url[authority..]
        .to_ascii_lowercase()
        .find(host)
        .map(|start| &base_url[authority + start..authority + start + host.len()])
        .unwrap_or(host)
}

/// Build the endpoint map from fetched reference documents.
///
/// Services without a `ping` entry are skipped. References are visited in
/// manifest-name order, so when two services map to the same identifier the
/// lexicographically first service keeps it.
pub fn extract_endpoints(services: &ServiceMap) -> Result<EndpointMap> {
    let mut endpoints = EndpointMap::new();
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();

    for (name, reference) in services {
        let Some(ping) = reference.ping_entry() else {
            debug!(service = %name, "No ping entry, skipping");
            continue;
        };

        let identifier = service_identifier(&reference.base_url)?;
        if let Some(owner) = owners.get(&identifier) {
            warn!(
                identifier = %identifier,
                kept = %owner,
                dropped = %name,
                "Service identifier collision"
            );
            continue;
        }

        endpoints.insert(
            identifier.clone(),
            format!("{}{}", reference.base_url, ping.route),
        );
        owners.insert(identifier, name.as_str());
    }

    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskcluster_cli_common::{ApiEntry, ServiceReference};

    fn entry(name: &str, route: &str) -> ApiEntry {
        ApiEntry {
            name: name.to_string(),
            route: route.to_string(),
            entry_type: "function".to_string(),
            method: "get".to_string(),
            args: vec![],
            query: vec![],
            stability: "stable".to_string(),
            input: None,
            output: None,
            title: String::new(),
            description: String::new(),
        }
    }

    fn reference(base_url: &str, entries: Vec<ApiEntry>) -> ServiceReference {
        ServiceReference {
            base_url: base_url.to_string(),
            title: String::new(),
            description: String::new(),
            entries,
        }
    }

    #[test]
    fn test_identifier_from_hostname() {
        assert_eq!(
            service_identifier("https://queue.taskcluster.net/v1").unwrap(),
            "queue"
        );
        assert_eq!(service_identifier("http://localhost:8080").unwrap(), "localhost");
    }

    #[test]
    fn test_identifier_keeps_hostname_case() {
        assert_eq!(service_identifier("https://Queue.example.com/v1").unwrap(), "Queue");
        assert_eq!(service_identifier("HTTPS://AUTH.Example.com").unwrap(), "AUTH");
        assert_eq!(
            service_identifier("https://user@Index.example.com:8443/v1").unwrap(),
            "Index"
        );
    }

    #[test]
    fn test_identifier_requires_host() {
        assert!(service_identifier("not a url").is_err());
        assert!(service_identifier("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_queue_scenario() {
        let mut services = ServiceMap::new();
        services.insert(
            "queue".to_string(),
            reference("https://queue.example.com", vec![entry("ping", "/ping")]),
        );

        let endpoints = extract_endpoints(&services).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints["queue"], "https://queue.example.com/ping");
    }

    #[test]
    fn test_services_without_ping_are_skipped() {
        let mut services = ServiceMap::new();
        services.insert(
            "auth".to_string(),
            reference(
                "https://auth.example.com/v1",
                vec![entry("listClients", "/clients"), entry("ping", "/ping")],
            ),
        );
        services.insert(
            "events".to_string(),
            reference("https://events.example.com/v1", vec![entry("Ping", "/ping")]),
        );

        let endpoints = extract_endpoints(&services).unwrap();
        assert_eq!(endpoints.keys().collect::<Vec<_>>(), vec!["auth"]);
        assert_eq!(endpoints["auth"], "https://auth.example.com/v1/ping");
    }

    #[test]
    fn test_identifier_comes_from_hostname_not_manifest_name() {
        let mut services = ServiceMap::new();
        services.insert(
            "Queue".to_string(),
            reference("https://queue.example.com/v1", vec![entry("ping", "/ping")]),
        );

        let endpoints = extract_endpoints(&services).unwrap();
        assert!(endpoints.contains_key("queue"));
    }

    #[test]
    fn test_collision_keeps_first_service_by_name() {
        let mut services = ServiceMap::new();
        services.insert(
            "queue-events".to_string(),
            reference("https://queue.example.com/exchanges", vec![entry("ping", "/b")]),
        );
        services.insert(
            "queue".to_string(),
            reference("https://queue.example.com/v1", vec![entry("ping", "/a")]),
        );

        let endpoints = extract_endpoints(&services).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints["queue"], "https://queue.example.com/v1/a");
    }
}
