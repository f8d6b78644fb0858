use chrono::{DateTime, Utc};
use common::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::DataObjectRecord;

// NSCL codes are plain FDSN tokens; anything else would leak into the
// fileId pattern as regex syntax.
static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").expect("Invalid NSCL code regex"));

/// Matches any non-empty value in a single NSCL position.
pub const WILDCARD: &str = "*";

/// Closed time window; a matching object's full temporal extent must be
/// contained within it, not merely overlap it.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(Error::Validation(format!(
                "start time {} is after end time {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, t_min: DateTime<Utc>, t_max: DateTime<Utc>) -> bool {
        t_min >= self.start && t_max <= self.end
    }
}

/// Rectangular geographic region in degrees.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        if min_lat > max_lat {
            return Err(Error::Validation(format!(
                "minlat {} exceeds maxlat {}",
                min_lat, max_lat
            )));
        }
        if min_lon > max_lon {
            return Err(Error::Validation(format!(
                "minlon {} exceeds maxlon {}",
                min_lon, max_lon
            )));
        }
        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Network-Station-Channel-Location code pattern (FDSN convention).
///
/// `network` is mandatory. `station` and `channel` default to `*` (any
/// non-empty value in that position); `location` defaults to the empty
/// string, matching objects with an empty location segment such as
/// `IV.ACER..HHE.D.2015.015`.
#[derive(Debug, Clone)]
pub struct NsclPattern {
    pub network: String,
    pub station: String,
    pub channel: String,
    pub location: String,
    matcher: Regex,
}

impl NsclPattern {
    pub fn new(
        network: &str,
        station: Option<&str>,
        channel: Option<&str>,
        location: Option<&str>,
    ) -> Result<Self> {
        if network.is_empty() {
            return Err(Error::Validation(
                "network is mandatory in code-pattern mode".to_string(),
            ));
        }
        let station = station.filter(|s| !s.is_empty()).unwrap_or(WILDCARD);
        let channel = channel.filter(|c| !c.is_empty()).unwrap_or(WILDCARD);
        let location = location.unwrap_or("");

        validate_code("network", network, false)?;
        validate_code("station", station, true)?;
        validate_code("channel", channel, true)?;
        validate_code("location", location, true)?;

        let expr = format!(
            "{}\\.{}\\.{}\\.{}",
            segment_expr(network),
            segment_expr(station),
            segment_expr(location),
            segment_expr(channel)
        );
        let matcher = Regex::new(&expr)
            .map_err(|e| Error::Validation(format!("invalid code pattern: {}", e)))?;

        Ok(Self {
            network: network.to_string(),
            station: station.to_string(),
            channel: channel.to_string(),
            location: location.to_string(),
            matcher,
        })
    }

    /// Canonical wildcard-delimited form, `*<net>.<sta>.<loc>.<cha>*`.
    pub fn pattern_string(&self) -> String {
        format!(
            "*{}.{}.{}.{}*",
            self.network, self.station, self.location, self.channel
        )
    }

    pub fn matches(&self, file_id: &str) -> bool {
        self.matcher.is_match(file_id)
    }
}

fn segment_expr(code: &str) -> String {
    if code == WILDCARD {
        // any non-empty dot-free segment
        "[^.]+".to_string()
    } else {
        regex::escape(code)
    }
}

fn validate_code(name: &str, code: &str, wildcard_allowed: bool) -> Result<()> {
    if code == WILDCARD {
        if wildcard_allowed {
            return Ok(());
        }
        return Err(Error::Validation(format!("{} must not be a wildcard", name)));
    }
    if !CODE_REGEX.is_match(code) {
        return Err(Error::Validation(format!(
            "{} code '{}' contains invalid characters",
            name, code
        )));
    }
    Ok(())
}

/// The two mutually-exclusive selection modes. Chosen by an explicit flag at
/// the request boundary, never inferred from which fields are present.
#[derive(Debug, Clone)]
pub enum SelectionMode {
    Area(BoundingBox),
    Codes(NsclPattern),
}

/// A validated selection request: one mode plus the time window.
#[derive(Debug, Clone)]
pub struct SelectionQuery {
    pub window: TimeWindow,
    pub mode: SelectionMode,
}

impl SelectionQuery {
    pub fn area(window: TimeWindow, bbox: BoundingBox) -> Self {
        Self {
            window,
            mode: SelectionMode::Area(bbox),
        }
    }

    pub fn codes(window: TimeWindow, pattern: NsclPattern) -> Self {
        Self {
            window,
            mode: SelectionMode::Codes(pattern),
        }
    }

    /// Builds the canonical catalog predicate for this query. Pure; all
    /// validation already happened when the query was constructed.
    pub fn filter(&self) -> CatalogFilter {
        match &self.mode {
            SelectionMode::Area(bbox) => CatalogFilter {
                window: self.window,
                area: Some(*bbox),
                pattern: None,
            },
            SelectionMode::Codes(pattern) => CatalogFilter {
                window: self.window,
                area: None,
                pattern: Some(pattern.clone()),
            },
        }
    }
}

/// Canonical predicate over the metadata catalog. External stores translate
/// this into their own query language; `matches` is the reference semantics
/// and backs the in-memory catalog.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub window: TimeWindow,
    pub area: Option<BoundingBox>,
    pub pattern: Option<NsclPattern>,
}

impl CatalogFilter {
    pub fn matches(&self, record: &DataObjectRecord) -> bool {
        if !self
            .window
            .contains(record.coverage_t_min, record.coverage_t_max)
        {
            return false;
        }
        if let Some(area) = &self.area {
            if !area.contains(record.coverage_x, record.coverage_y) {
                return false;
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.matches(&record.file_id) {
                return false;
            }
        }
        true
    }
}
