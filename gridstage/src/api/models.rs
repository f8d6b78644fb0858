use chrono::{DateTime, Utc};
use common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::query::{BoundingBox, NsclPattern, SelectionQuery, TimeWindow};

// Request models
//
// Raw query parameters are validated once at the boundary into a typed
// SelectionQuery. Mode is chosen by the explicit `nscl` flag, never inferred
// from which fields happen to be present. `limit` and `offset` are declared
// for interface compatibility but unused.

#[derive(Debug, Deserialize)]
pub struct SelectParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minlat: Option<f64>,
    pub minlon: Option<f64>,
    pub maxlat: Option<f64>,
    pub maxlon: Option<f64>,
    #[serde(default)]
    pub nscl: bool,
    pub network: Option<String>,
    pub station: Option<String>,
    pub channel: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub download: bool,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// serde_urlencoded cannot flatten typed fields, so StageParams repeats the
// selection fields instead of embedding SelectParams.
#[derive(Debug, Deserialize)]
pub struct StageParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minlat: Option<f64>,
    pub minlon: Option<f64>,
    pub maxlat: Option<f64>,
    pub maxlon: Option<f64>,
    #[serde(default)]
    pub nscl: bool,
    pub network: Option<String>,
    pub station: Option<String>,
    pub channel: Option<String>,
    pub location: Option<String>,
    pub endpoint: String,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FreeParams {
    pub remote_coll_id: String,
}

impl SelectParams {
    pub fn to_query(&self) -> Result<SelectionQuery> {
        build_query(
            self.start,
            self.end,
            (self.minlat, self.minlon, self.maxlat, self.maxlon),
            self.nscl,
            (
                self.network.as_deref(),
                self.station.as_deref(),
                self.channel.as_deref(),
                self.location.as_deref(),
            ),
        )
    }
}

impl StageParams {
    pub fn to_query(&self) -> Result<SelectionQuery> {
        build_query(
            self.start,
            self.end,
            (self.minlat, self.minlon, self.maxlat, self.maxlon),
            self.nscl,
            (
                self.network.as_deref(),
                self.station.as_deref(),
                self.channel.as_deref(),
                self.location.as_deref(),
            ),
        )
    }
}

fn build_query(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    bbox: (Option<f64>, Option<f64>, Option<f64>, Option<f64>),
    nscl: bool,
    codes: (Option<&str>, Option<&str>, Option<&str>, Option<&str>),
) -> Result<SelectionQuery> {
    let window = TimeWindow::new(start, end)?;

    if nscl {
        let (network, station, channel, location) = codes;
        let pattern = NsclPattern::new(network.unwrap_or_default(), station, channel, location)?;
        return Ok(SelectionQuery::codes(window, pattern));
    }

    let (min_lat, min_lon, max_lat, max_lon) = match bbox {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => {
            return Err(Error::Validation(
                "bounding-box mode requires minlat, minlon, maxlat and maxlon".to_string(),
            ))
        }
    };
    let bbox = BoundingBox::new(min_lat, min_lon, max_lat, max_lon)?;
    Ok(SelectionQuery::area(window, bbox))
}

// Response models
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
