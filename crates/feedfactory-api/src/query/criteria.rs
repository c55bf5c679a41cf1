//! Filter criteria value types and their translation into query parameters.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::error::{QueryError, QueryResult};
use super::params::QueryParams;
use crate::time_expr::TimePoint;

/// Largest page size the remote honours; larger values are sent but logged.
pub const MAX_PAGE_SIZE: u32 = 5000;

/// Editorial workflow state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Draft,
    ReadyForValidation,
    Approved,
    Rejected,
    Deleted,
    Archived,
}

impl WorkflowStatus {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::ReadyForValidation => "readyforvalidation",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Rejected => "rejected",
            WorkflowStatus::Deleted => "deleted",
            WorkflowStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Modified,
    Created,
    Title,
    WorkflowStatus,
}

impl SortField {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Modified => "modified",
            SortField::Created => "created",
            SortField::Title => "title",
            SortField::WorkflowStatus => "wfstatus",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker expression such as `!archived,featured`.
///
/// Entries prefixed with `!` exclude resources carrying that marker. The
/// expression is sent to the remote exactly as given; the partitions are only
/// for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFilter(String);

impl MarkerFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        MarkerFilter(raw.into())
    }

    /// Returns the expression unmodified.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Markers a resource must carry.
    pub fn included(&self) -> Vec<&str> {
        self.entries().filter(|m| !m.starts_with('!')).collect()
    }

    /// Markers a resource must not carry, without the `!` prefix.
    pub fn excluded(&self) -> Vec<&str> {
        self.entries()
            .filter_map(|m| m.strip_prefix('!'))
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect()
    }

    fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').map(str::trim).filter(|m| !m.is_empty())
    }
}

impl From<&str> for MarkerFilter {
    fn from(value: &str) -> Self {
        MarkerFilter::new(value)
    }
}

/// Comma-separated list of labels (keywords, types, categories, property ids).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelList(Vec<String>);

impl LabelList {
    /// Splits `raw` on commas, trimming entries and dropping empty ones.
    pub fn parse(raw: &str) -> Self {
        LabelList(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Joins the labels with commas, preserving order.
    pub fn to_wire(&self) -> String {
        self.0.join(",")
    }
}

impl From<Vec<String>> for LabelList {
    fn from(value: Vec<String>) -> Self {
        LabelList(value)
    }
}

impl From<Option<&str>> for LabelList {
    fn from(value: Option<&str>) -> Self {
        value.map(LabelList::parse).unwrap_or_default()
    }
}

/// Geographic center point for a distance search.
///
/// Parsing validates both coordinates as numbers but keeps the trimmed input
/// text, which is what goes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
    text: String,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint {
            lat,
            lon,
            text: format!("{lat},{lon}"),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// The `lat,lon` text sent as the `geo` parameter.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for GeoPoint {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat_text, lon_text) = s
            .split_once(',')
            .ok_or_else(|| QueryError::invalid_geo_point(s))?;
        let (lat_text, lon_text) = (lat_text.trim(), lon_text.trim());
        let lat = lat_text
            .parse::<f64>()
            .map_err(|_| QueryError::invalid_geo_point(s))?;
        let lon = lon_text
            .parse::<f64>()
            .map_err(|_| QueryError::invalid_geo_point(s))?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(QueryError::invalid_geo_point(s));
        }
        Ok(GeoPoint {
            lat,
            lon,
            text: format!("{lat_text},{lon_text}"),
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Search radius with unit, e.g. `10km`. Forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoRadius(String);

impl GeoRadius {
    pub fn new(raw: impl Into<String>) -> Self {
        GeoRadius(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for GeoRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    /// Plain-text publication format; events only, needs a closed date range.
    Uitkrant,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Uitkrant => "uitkrant",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource-agnostic filter intent.
///
/// Every field is optional; a field contributes a query parameter only when
/// it is present, non-empty and not at its default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Free text. `tag:` and `marker:` directives are passed through.
    pub search: Option<String>,
    pub markers: Option<MarkerFilter>,
    pub keywords: LabelList,
    pub types: LabelList,
    pub categories: LabelList,
    pub workflow_status: Option<WorkflowStatus>,
    pub published: Option<bool>,
    pub include_deleted: bool,
    pub owner: Option<String>,
    pub user_organisation: Option<String>,
    pub trc_id: Option<String>,
    pub external_id: Option<String>,
    pub language: Option<String>,
    pub updated_since: Option<TimePoint>,
    pub sort_field: Option<SortField>,
    pub sort_ascending: bool,
    pub page_size: u32,
    pub page_index: u32,
}

impl FilterCriteria {
    /// Translates the criteria into ordered query parameters.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params.set_opt("search", self.search.as_deref());
        params.set_opt("markers", self.markers.as_ref().map(MarkerFilter::as_str));
        set_labels(&mut params, "keywords", &self.keywords);
        set_labels(&mut params, "types", &self.types);
        set_labels(&mut params, "categories", &self.categories);
        if let Some(status) = self.workflow_status {
            params.set("wfstatus", status.as_str());
        }
        if let Some(published) = self.published {
            params.set("published", published.to_string());
        }
        if self.include_deleted {
            params.set("deleted", "true");
        }
        params.set_opt("owner", self.owner.as_deref());
        params.set_opt("userorganisation", self.user_organisation.as_deref());
        params.set_opt("trcid", self.trc_id.as_deref());
        params.set_opt("externalid", self.external_id.as_deref());
        params.set_opt("lang", self.language.as_deref());
        if let Some(since) = &self.updated_since {
            params.set("lastupdated", since.to_timestamp());
        }
        if let Some(sort) = self.sort_field {
            params.set("sort", sort.as_str());
        }
        if self.sort_ascending {
            params.set("sortorder", "asc");
        }
        if self.page_size > 0 {
            if self.page_size > MAX_PAGE_SIZE {
                tracing::warn!(
                    page_size = self.page_size,
                    max = MAX_PAGE_SIZE,
                    "page size exceeds the documented maximum"
                );
            }
            params.set("size", self.page_size.to_string());
        }
        if self.page_index > 0 {
            params.set("page", self.page_index.to_string());
        }

        params
    }
}

fn set_labels(params: &mut QueryParams, key: &str, labels: &LabelList) {
    if !labels.is_empty() {
        params.set(key, labels.to_wire());
    }
}

/// Filter intent for events: the common criteria plus date, place and
/// distance constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilterCriteria {
    pub base: FilterCriteria,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub location_id: Option<String>,
    pub city: Option<String>,
    pub geo_center: Option<GeoPoint>,
    pub geo_radius: Option<GeoRadius>,
}

impl EventFilterCriteria {
    /// Translates the criteria into ordered query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::GeoRadiusWithoutCenter`] when a radius is given
    /// without a center. An empty radius counts as absent.
    pub fn to_query(&self) -> QueryResult<QueryParams> {
        let geo_radius = self.geo_radius.as_ref().filter(|radius| !radius.is_empty());
        if let (Some(radius), None) = (geo_radius, &self.geo_center) {
            return Err(QueryError::GeoRadiusWithoutCenter {
                radius: radius.to_string(),
            });
        }

        let mut params = self.base.to_query();
        if let Some(from) = self.date_from {
            params.set("eventDateRangeStart", from.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = self.date_to {
            params.set("eventDateRangeEnd", to.format("%Y-%m-%d").to_string());
        }
        params.set_opt("locationId", self.location_id.as_deref());
        params.set_opt("city", self.city.as_deref());
        if let Some(center) = &self.geo_center {
            params.set("geo", center.as_str());
            if let Some(radius) = geo_radius {
                params.set("geodistance", radius.as_str());
            }
        }

        Ok(params)
    }
}

impl From<FilterCriteria> for EventFilterCriteria {
    fn from(base: FilterCriteria) -> Self {
        EventFilterCriteria {
            base,
            ..Default::default()
        }
    }
}

/// Options that only apply to exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportCriteria {
    /// Property columns to include, in order.
    pub property_column_ids: LabelList,
    pub format: ExportFormat,
}
