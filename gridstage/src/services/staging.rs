use common::config::Settings;
use common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{MetadataCatalog, ObjectSelector};
use crate::grid::{bounded, GridClient, ReplicationInvoker, ReplicationOutcome, ZoneDirectory};
use crate::models::{
    DataObjectRecord, ObjectSummary, RemoteCollectionInfo, RemoteZoneInfo, StageOutcome,
    StagingReport,
};
use crate::query::SelectionQuery;

/// The selection-and-staging engine: selection against the metadata catalog,
/// zone directory lookups, and the staging state machine
/// (validate → resolve stage root → create collection → replicate each
/// object → resolve zone → report).
pub struct StagingService {
    selector: ObjectSelector,
    grid: Arc<dyn GridClient>,
    zones: ZoneDirectory,
    replicator: ReplicationInvoker,
    settings: Settings,
    grid_timeout: Duration,
}

impl StagingService {
    pub fn new(
        catalog: Arc<dyn MetadataCatalog>,
        grid: Arc<dyn GridClient>,
        settings: Settings,
    ) -> Self {
        let grid_timeout = Duration::from_secs(settings.grid.request_timeout_secs);
        Self {
            selector: ObjectSelector::new(catalog),
            zones: ZoneDirectory::new(Arc::clone(&grid), grid_timeout),
            replicator: ReplicationInvoker::new(Arc::clone(&grid), grid_timeout),
            grid,
            settings,
            grid_timeout,
        }
    }

    /// Selection without staging: summary rows for every matched object.
    pub async fn select_objects(&self, query: &SelectionQuery) -> Result<Vec<ObjectSummary>> {
        self.selector.select_summaries(&query.filter()).await
    }

    /// Metadata variant of selection: full catalog records.
    pub async fn select_metadata(&self, query: &SelectionQuery) -> Result<Vec<DataObjectRecord>> {
        self.selector.select(&query.filter()).await
    }

    pub async fn list_staging_zones(&self) -> Result<Vec<RemoteZoneInfo>> {
        self.zones.list_staging_zones().await
    }

    /// Stages every object matched by `query` into a fresh ephemeral
    /// collection on the `endpoint` zone. Partial-failure tolerant: a single
    /// object's replication failure is recorded in the report and processing
    /// continues; only failure to create the destination collection or to
    /// resolve the zone aborts the request.
    pub async fn stage_objects(
        &self,
        query: &SelectionQuery,
        endpoint: &str,
    ) -> Result<StagingReport> {
        if endpoint.is_empty() {
            return Err(Error::Validation(
                "endpoint name is required for staging".to_string(),
            ));
        }

        let stage_root = self.stage_root_for(endpoint)?;
        let records = self.selector.select(&query.filter()).await?;

        let dest_path = format!(
            "{}/{}",
            stage_root.trim_end_matches('/'),
            Uuid::new_v4()
        );
        let handle = bounded(
            self.grid_timeout,
            "collection creation",
            self.grid.create_collection(&dest_path),
        )
        .await?
        .ok_or_else(|| Error::Grid(format!("failed to create collection {}", dest_path)))?;
        info!(path = %handle.path, objects = records.len(), "created staging collection");

        let mut outcomes = Vec::with_capacity(records.len());
        let mut staged_count = 0usize;
        for record in &records {
            let destination = format!("{}/{}", dest_path, record.file_id);
            match self
                .replicator
                .replicate(&record.remote_path, &destination)
                .await
            {
                ReplicationOutcome::Success => {
                    staged_count += 1;
                    outcomes.push(StageOutcome::Staged {
                        file_id: record.file_id.clone(),
                        pid: record.pid.clone(),
                    });
                }
                ReplicationOutcome::Failure(reason) => {
                    warn!(file_id = %record.file_id, %reason, "object replication failed");
                    outcomes.push(StageOutcome::Failed {
                        file_id: record.file_id.clone(),
                        reason,
                    });
                }
            }
        }

        let zone = self.zones.resolve_zone(endpoint).await?;
        info!(staged_count, total = outcomes.len(), collection = %dest_path, "staging pass complete");

        Ok(StagingReport {
            staged_count,
            outcomes,
            remote_collection: RemoteCollectionInfo {
                collection_id: dest_path,
                zone,
            },
        })
    }

    /// Deletion of a staged collection is an external collaborator that does
    /// not exist yet; fail loudly rather than pretend to succeed.
    pub async fn free_staged_collection(&self, collection_id: &str) -> Result<()> {
        Err(Error::NotImplemented(format!(
            "deletion of staged collection '{}' is not available yet",
            collection_id
        )))
    }

    /// Resolves the configured stage root for `endpoint`, normalized to a
    /// leading `/`. The root's first path segment must equal the endpoint
    /// name: a staging target is only valid when its root is namespaced
    /// under the endpoint's own zone. Segment-exact on purpose, so a root of
    /// `/TARGETS/area` is rejected for endpoint `TARGET` even though it is a
    /// raw string prefix.
    fn stage_root_for(&self, endpoint: &str) -> Result<String> {
        let root = self.settings.stage.roots.get(endpoint).ok_or_else(|| {
            Error::Configuration(format!(
                "no stage root configured for endpoint '{}'",
                endpoint
            ))
        })?;

        let root = if root.starts_with('/') {
            root.clone()
        } else {
            format!("/{}", root)
        };

        let first_segment = root
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        if first_segment != endpoint {
            return Err(Error::InvalidEndpoint(format!(
                "stage root '{}' is not namespaced under endpoint '{}'",
                root, endpoint
            )));
        }

        Ok(root)
    }
}
