pub mod memory;

pub use memory::InMemoryCatalog;

use async_trait::async_trait;
use common::Result;
use std::sync::Arc;

use crate::models::{DataObjectRecord, ObjectSummary};
use crate::query::CatalogFilter;

/// The external metadata store. Implementations translate the canonical
/// [`CatalogFilter`] into their own query language and surface execution
/// faults as [`common::Error::StoreQuery`].
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    async fn select(&self, filter: &CatalogFilter) -> Result<Vec<DataObjectRecord>>;
}

/// Applies a built predicate against the metadata store and imposes a
/// canonical ascending `file_id` order on the results. The store itself
/// guarantees no ordering, so the sort happens here to keep "first match"
/// and report sequences reproducible.
pub struct ObjectSelector {
    catalog: Arc<dyn MetadataCatalog>,
}

impl ObjectSelector {
    pub fn new(catalog: Arc<dyn MetadataCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn select(&self, filter: &CatalogFilter) -> Result<Vec<DataObjectRecord>> {
        let mut records = self.catalog.select(filter).await?;
        records.sort_by(|a, b| a.file_id.cmp(&b.file_id));
        Ok(records)
    }

    pub async fn select_summaries(&self, filter: &CatalogFilter) -> Result<Vec<ObjectSummary>> {
        let records = self.select(filter).await?;
        Ok(records.iter().map(ObjectSummary::from).collect())
    }
}
