pub mod replicate;
pub mod zones;

pub use replicate::{ReplicationInvoker, ReplicationOutcome};
pub use zones::ZoneDirectory;

use async_trait::async_trait;
use common::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Handle returned by the grid for a created collection.
#[derive(Debug, Clone)]
pub struct CollectionHandle {
    pub path: String,
}

/// One row of a specific-query result; columns come back as optional text.
pub type SqlRow = Vec<Option<String>>;

/// The storage grid's session interface: collection creation, parameterized
/// remote rule execution, and the named ad-hoc ("specific") query interface
/// over the grid's internal catalog.
///
/// Implementations surface transport and server faults as
/// [`common::Error::Grid`]; callers remap catalog-query faults where the
/// taxonomy requires it.
#[async_trait]
pub trait GridClient: Send + Sync {
    /// Creates a collection at `path`. Returns `None` when the grid reports
    /// success without yielding a handle, which callers treat as a failure.
    async fn create_collection(&self, path: &str) -> Result<Option<CollectionHandle>>;

    /// Executes a named rule with string-quoted input parameters, returning
    /// the captured output text when `capture_output` is set.
    async fn execute_rule(
        &self,
        name: &str,
        body: &str,
        inputs: &[(String, String)],
        capture_output: bool,
    ) -> Result<String>;

    /// Registers a named specific query in the grid catalog.
    async fn register_query(&self, alias: &str, sql: &str) -> Result<()>;

    /// Iterates the rows of a registered specific query.
    async fn fetch_rows(&self, alias: &str) -> Result<Vec<SqlRow>>;

    /// Removes a registered specific query from the grid catalog.
    async fn deregister_query(&self, alias: &str) -> Result<()>;
}

/// Bounds a remote grid call; the grid is a network service outside this
/// core's control, so every call gets a deadline. Timeouts surface as
/// retryable [`Error::Grid`] faults.
pub(crate) async fn bounded<T>(
    limit: Duration,
    what: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Grid(format!(
            "{} timed out after {}s",
            what,
            limit.as_secs()
        ))),
    }
}
