//! Service status checks for Taskcluster
//!
//! Health-check URLs are discovered from the published service manifest and
//! cached on disk for a day; each status run polls the requested services.
//!
//! ## Discovery
//!
//! - Cache fresh: use it
//! - Cache missing, expired or unreadable: fetch the manifest, fetch every
//!   reference document, pick each one's `ping` entry and rewrite the cache
//!
//! Services are identified by the first label of their base URL hostname,
//! e.g. `https://queue.taskcluster.net/v1` is `queue`.

mod cache;
mod context;
mod extract;
mod poller;
mod report;

pub use cache::{CacheRecord, CacheStore};
pub use context::StatusContext;
pub use extract::{extract_endpoints, service_identifier};
pub use poller::StatusPoller;
pub use report::{build_report, ReportLine};
