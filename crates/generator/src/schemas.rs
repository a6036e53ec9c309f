//! Deduplicated fetching of JSON schemas referenced by API entries

use std::collections::BTreeSet;
use taskcluster_cli_client::{fan_out, Fetcher};
use taskcluster_cli_common::{ApiEntry, CliError, Result, SchemaSet};
use tracing::info;

/// Fetches every distinct input/output schema referenced by a set of entries
pub struct SchemaCollector<'a> {
    fetcher: &'a dyn Fetcher,
    concurrency: usize,
}

impl<'a> SchemaCollector<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency,
        }
    }

    /// Fetch the schemas referenced by `entries`.
    ///
    /// Each URL is fetched at most once. Any failure, including a body that is
    /// not JSON, aborts the whole collection.
    pub async fn collect<'e, I>(&self, entries: I) -> Result<SchemaSet>
    where
        I: IntoIterator<Item = &'e ApiEntry>,
    {
        let urls = schema_urls(entries);
        let fetcher = self.fetcher;

        let fetched = fan_out(urls, self.concurrency, |url| fetch_schema(fetcher, url)).await?;

        Ok(fetched.into_iter().collect())
    }
}

async fn fetch_schema(fetcher: &dyn Fetcher, url: String) -> Result<(String, String)> {
    info!(url = %url, "Fetching schema");
    let body = fetcher.get(&url).await?;
    // Only checked for validity; the raw text is what gets emitted.
    serde_json::from_str::<serde_json::Value>(&body).map_err(|e| CliError::Parse {
        context: url.clone(),
        message: e.to_string(),
    })?;
    Ok((url, body))
}

/// Distinct, non-empty schema URLs in first-reference order
pub fn schema_urls<'e, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'e ApiEntry>,
{
    let mut scheduled = BTreeSet::new();
    let mut urls = Vec::new();

    for entry in entries {
        for url in [&entry.input, &entry.output].into_iter().flatten() {
            if !url.is_empty() && scheduled.insert(url.as_str()) {
                urls.push(url.clone());
            }
        }
    }

    urls
}
