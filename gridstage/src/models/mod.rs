use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cataloged scientific data unit. Owned and mutated exclusively by the
/// external metadata store; this service only reads it.
///
/// `file_id` encodes network.station.location.channel.acquisitionDate by
/// convention, e.g. `"IV.ACER..HHE.D.2015.015"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataObjectRecord {
    pub file_id: String,
    /// Persistent identifier (PID) of the digital object.
    pub pid: String,
    /// Absolute path of the object on the storage grid.
    pub remote_path: String,
    /// Geographic coverage point (latitude component).
    pub coverage_x: f64,
    /// Geographic coverage point (longitude component).
    pub coverage_y: f64,
    pub coverage_t_min: DateTime<Utc>,
    pub coverage_t_max: DateTime<Utc>,
    #[serde(default)]
    pub descriptive: DescriptiveMetadata,
}

/// Dublin-Core style descriptive fields carried by the catalog record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptiveMetadata {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub contributor: Option<String>,
    pub publisher: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub format: Option<String>,
    pub date: Option<String>,
    pub rights: Option<String>,
    pub available: Option<DateTime<Utc>>,
    pub date_accepted: Option<DateTime<Utc>>,
    pub is_part_of: Option<String>,
}

/// Selection result row: enough to identify and locate an object without
/// shipping the full descriptive metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub file_id: String,
    pub pid: String,
    pub remote_path: String,
}

impl From<&DataObjectRecord> for ObjectSummary {
    fn from(record: &DataObjectRecord) -> Self {
        Self {
            file_id: record.file_id.clone(),
            pid: record.pid.clone(),
            remote_path: record.remote_path.clone(),
        }
    }
}

/// A remote storage-grid zone, sourced live from the grid's own zone catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteZoneInfo {
    pub name: String,
    pub connection: Option<String>,
    pub description: Option<String>,
}

/// Per-object staging outcome. Every entry is an owned value; outcome rows
/// are never shared or reused across loop iterations.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    Staged { file_id: String, pid: String },
    Failed { file_id: String, reason: String },
}

impl StageOutcome {
    pub fn is_staged(&self) -> bool {
        matches!(self, StageOutcome::Staged { .. })
    }

    pub fn file_id(&self) -> &str {
        match self {
            StageOutcome::Staged { file_id, .. } => file_id,
            StageOutcome::Failed { file_id, .. } => file_id,
        }
    }
}

/// The ephemeral destination collection plus the resolved target zone.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteCollectionInfo {
    pub collection_id: String,
    pub zone: RemoteZoneInfo,
}

/// Result of one staging request. Never persisted; serialized straight into
/// the HTTP response.
#[derive(Debug, Clone, Serialize)]
pub struct StagingReport {
    pub staged_count: usize,
    pub outcomes: Vec<StageOutcome>,
    pub remote_collection: RemoteCollectionInfo,
}
