//! Data model shared by the status checker and the API generator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the reference entry that describes a service's health check
pub const PING_ENTRY_NAME: &str = "ping";

/// Manifest: logical service name -> reference document URL
pub type Manifest = BTreeMap<String, String>;

/// Resolved service identifier -> health-check URL
pub type EndpointMap = BTreeMap<String, String>;

/// Manifest service name -> parsed reference document
pub type ServiceMap = BTreeMap<String, ServiceReference>;

/// Schema URL -> raw schema document text
pub type SchemaSet = BTreeMap<String, String>;

/// A parsed service reference document
///
/// Only `baseUrl` and `entries` are required; the descriptive fields are
/// carried through to the generated API definitions when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReference {
    /// Base URL every entry route is relative to
    pub base_url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// API entries in document order
    #[serde(default)]
    pub entries: Vec<ApiEntry>,
}

/// A single API entry of a reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Entry name, e.g. "ping" or "createTask"
    pub name: String,

    /// Route relative to the base URL, e.g. "/ping" or "/task/<taskId>"
    pub route: String,

    /// Entry kind, usually "function"
    #[serde(rename = "type", default)]
    pub entry_type: String,

    /// HTTP method
    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub query: Vec<String>,

    #[serde(default)]
    pub stability: String,

    /// Input schema URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Output schema URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

impl ServiceReference {
    /// First entry named exactly [`PING_ENTRY_NAME`], if any
    pub fn ping_entry(&self) -> Option<&ApiEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == PING_ENTRY_NAME)
    }
}

/// Body returned by a service health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub alive: bool,

    /// Seconds since the service started
    #[serde(rename = "uptime", default)]
    pub uptime_seconds: f64,
}
