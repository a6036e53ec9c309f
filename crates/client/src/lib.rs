//! Fetching of the Taskcluster service manifest and reference documents
//!
//! The network is reached only through the [`Fetcher`] trait. The real
//! implementation is [`HttpFetcher`]; tests substitute a double.
//!
//! ## Fetch Pipeline
//!
//! 1. `fetch_manifest` reads the manifest (service name -> reference URL)
//! 2. `fetch_references` fans out one request per service, bounded by the
//!    configured concurrency, and merges the results in the joining task
//!
//! No request is retried. The first failure aborts the whole stage.
//!
//! ## Usage
//! ```rust,ignore
//! use taskcluster_cli_client::{fetch_manifest, fetch_references, HttpFetcher};
//!
//! let fetcher = HttpFetcher::new(Duration::from_secs(30))?;
//! let manifest = fetch_manifest(&fetcher, DEFAULT_MANIFEST_URL).await?;
//! let services = fetch_references(&fetcher, &manifest, 8).await?;
//! ```

mod fanout;
mod fetcher;
mod references;

pub use fanout::{fan_out, with_deadline};
pub use fetcher::{fetch_json, Fetcher, HttpFetcher};
pub use references::{fetch_manifest, fetch_reference, fetch_references};

#[cfg(any(test, feature = "mock"))]
pub use fetcher::MockFetcher;
