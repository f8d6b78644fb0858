use common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{bounded, GridClient, SqlRow};
use crate::models::RemoteZoneInfo;

/// Staging-eligible zones are marked by operators with a comment starting
/// with this prefix; a deliberate low-ceremony convention rather than a
/// dedicated flag in the zone catalog.
const STAGING_COMMENT_PREFIX: &str = "stag";

/// Queries the storage grid's zone catalog, either listing staging-eligible
/// zones or resolving one zone's connection metadata by exact name.
pub struct ZoneDirectory {
    grid: Arc<dyn GridClient>,
    timeout: Duration,
}

impl ZoneDirectory {
    pub fn new(grid: Arc<dyn GridClient>, timeout: Duration) -> Self {
        Self { grid, timeout }
    }

    /// Zones whose descriptive comment matches the `stag*` convention.
    pub async fn list_staging_zones(&self) -> Result<Vec<RemoteZoneInfo>> {
        let sql = format!(
            "select zone_name, zone_conn_string, r_comment from r_zone_main \
             where r_comment LIKE '{}%'",
            STAGING_COMMENT_PREFIX
        );
        let rows = self.run_scoped_query(&sql).await?;
        Ok(rows.iter().filter_map(zone_from_row).collect())
    }

    /// The single zone with exact `name`. Absent connection URI or
    /// description come back as `None`, never null-propagated.
    pub async fn resolve_zone(&self, name: &str) -> Result<RemoteZoneInfo> {
        let sql = format!(
            "select zone_name, zone_conn_string, r_comment from r_zone_main \
             where zone_name = '{}'",
            quote_literal(name)
        );
        let rows = self.run_scoped_query(&sql).await?;
        rows.iter()
            .find_map(zone_from_row)
            .ok_or_else(|| Error::CatalogQuery(format!("zone '{}' not found in grid catalog", name)))
    }

    /// Runs one specific query under a caller-unique alias, deregistering it
    /// on every exit path so named queries never leak into the grid catalog.
    async fn run_scoped_query(&self, sql: &str) -> Result<Vec<SqlRow>> {
        let alias = format!("zq_{}", Uuid::new_v4().simple());
        debug!(%alias, sql, "registering specific query");

        if let Err(first) = bounded(
            self.timeout,
            "specific query registration",
            self.grid.register_query(&alias, sql),
        )
        .await
        {
            // An alias collision is transient: clear the stale registration
            // and retry once before giving up.
            debug!(%alias, error = %first, "registration failed, retrying after deregister");
            let _ = bounded(
                self.timeout,
                "specific query deregistration",
                self.grid.deregister_query(&alias),
            )
            .await;
            bounded(
                self.timeout,
                "specific query registration",
                self.grid.register_query(&alias, sql),
            )
            .await
            .map_err(|e| Error::CatalogQuery(e.to_string()))?;
        }

        let rows = bounded(
            self.timeout,
            "specific query execution",
            self.grid.fetch_rows(&alias),
        )
        .await;

        if let Err(e) = bounded(
            self.timeout,
            "specific query deregistration",
            self.grid.deregister_query(&alias),
        )
        .await
        {
            warn!(%alias, error = %e, "failed to deregister specific query");
        }

        rows.map_err(|e| Error::CatalogQuery(e.to_string()))
    }
}

fn zone_from_row(row: &SqlRow) -> Option<RemoteZoneInfo> {
    let name = row.first()?.clone()?;
    Some(RemoteZoneInfo {
        name,
        connection: row.get(1).cloned().flatten().filter(|c| !c.is_empty()),
        description: row.get(2).cloned().flatten().filter(|d| !d.is_empty()),
    })
}

fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}
