//! Bounded fan-out / fan-in of independent fetch tasks

use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use std::time::Duration;
use taskcluster_cli_common::{CliError, Result};

/// Run `task` over every item with at most `limit` tasks in flight.
///
/// Results come back in input order regardless of completion order. The first
/// error drops the remaining in-flight tasks and is returned.
pub async fn fan_out<I, T, R, F, Fut>(items: I, limit: usize, task: F) -> Result<Vec<R>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    stream::iter(items)
        .map(task)
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// Fail with [`CliError::Timeout`] if `fut` does not finish within `after`
pub async fn with_deadline<F, R>(what: &str, after: Duration, fut: F) -> Result<R>
where
    F: Future<Output = Result<R>>,
{
    tokio::time::timeout(after, fut)
        .await
        .map_err(|_| CliError::Timeout {
            what: what.to_string(),
            after,
        })?
}
