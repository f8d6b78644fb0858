use async_trait::async_trait;
use common::{Error, Result};
use std::sync::RwLock;

use super::MetadataCatalog;
use crate::models::DataObjectRecord;
use crate::query::CatalogFilter;

/// Catalog backed by an in-process vector. Evaluates the canonical filter
/// semantics directly via [`CatalogFilter::matches`]; used by tests and by
/// embedders that load a record snapshot at startup.
#[derive(Default)]
pub struct InMemoryCatalog {
    records: RwLock<Vec<DataObjectRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DataObjectRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn insert(&self, record: DataObjectRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| Error::StoreQuery("catalog lock poisoned".to_string()))?;
        records.push(record);
        Ok(())
    }
}

#[async_trait]
impl MetadataCatalog for InMemoryCatalog {
    async fn select(&self, filter: &CatalogFilter) -> Result<Vec<DataObjectRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| Error::StoreQuery("catalog lock poisoned".to_string()))?;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ObjectSelector;
    use crate::models::DescriptiveMetadata;
    use crate::query::{BoundingBox, SelectionQuery, TimeWindow};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn record(file_id: &str, lat: f64, lon: f64) -> DataObjectRecord {
        DataObjectRecord {
            file_id: file_id.to_string(),
            pid: format!("pid/{}", file_id),
            remote_path: format!("/INGV/home/{}", file_id),
            coverage_x: lat,
            coverage_y: lon,
            coverage_t_min: ts(2015, 1, 5),
            coverage_t_max: ts(2015, 1, 10),
            descriptive: DescriptiveMetadata::default(),
        }
    }

    fn area_query() -> SelectionQuery {
        let window = TimeWindow::new(ts(2015, 1, 3), ts(2015, 1, 24)).unwrap();
        let bbox = BoundingBox::new(35.30, 6.30, 46.30, 63.30).unwrap();
        SelectionQuery::area(window, bbox)
    }

    #[tokio::test]
    async fn test_selection_is_sorted_by_file_id() {
        let catalog = InMemoryCatalog::with_records(vec![
            record("IV.MILN..HHZ.D.2015.015", 40.0, 10.0),
            record("IV.ACER..HHE.D.2015.015", 40.0, 10.0),
            record("GE.MATE..BHZ.D.2015.015", 41.0, 12.0),
        ]);
        let selector = ObjectSelector::new(Arc::new(catalog));

        let records = selector.select(&area_query().filter()).await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "GE.MATE..BHZ.D.2015.015",
                "IV.ACER..HHE.D.2015.015",
                "IV.MILN..HHZ.D.2015.015",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_store_selects_nothing() {
        let selector = ObjectSelector::new(Arc::new(InMemoryCatalog::new()));
        let summaries = selector
            .select_summaries(&area_query().filter())
            .await
            .unwrap();
        assert!(summaries.is_empty());
    }
}
