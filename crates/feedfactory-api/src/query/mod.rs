//! Translation of filter intent into remote query parameters.
//!
//! [`FilterCriteria`] covers the fields every resource kind understands;
//! [`EventFilterCriteria`] adds the event-only date, place and distance
//! constraints. Both implement [`QueryCriteria`] so listing and exporting can
//! be written once for every [`ResourceKind`].
//!
//! # Example
//!
//! ```
//! use feedfactory_api::query::{FilterCriteria, LabelList, MarkerFilter, QueryCriteria};
//!
//! let criteria = FilterCriteria {
//!     search: Some("jazz".to_string()),
//!     markers: Some(MarkerFilter::new("!archived,featured")),
//!     keywords: LabelList::parse("music, live"),
//!     page_size: 25,
//!     ..Default::default()
//! };
//!
//! let query = criteria.build_query().unwrap();
//! assert_eq!(query.get("markers"), Some("!archived,featured"));
//! assert_eq!(query.get("keywords"), Some("music,live"));
//! assert_eq!(query.get("size"), Some("25"));
//! ```

mod criteria;
mod error;
mod params;


use chrono::NaiveDate;

pub use criteria::{
    EventFilterCriteria, ExportCriteria, ExportFormat, FilterCriteria, GeoPoint, GeoRadius,
    LabelList, MarkerFilter, SortField, WorkflowStatus, MAX_PAGE_SIZE,
};
pub use error::{QueryError, QueryResult};
pub use params::QueryParams;

use crate::endpoint::ResourceKind;

/// Criteria that can be turned into a listing query.
pub trait QueryCriteria {
    /// Builds the query parameters, validating cross-field constraints.
    fn build_query(&self) -> QueryResult<QueryParams>;

    /// Event date bounds, if the criteria carry any.
    fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (None, None)
    }
}

impl QueryCriteria for FilterCriteria {
    fn build_query(&self) -> QueryResult<QueryParams> {
        Ok(self.to_query())
    }
}

impl QueryCriteria for EventFilterCriteria {
    fn build_query(&self) -> QueryResult<QueryParams> {
        self.to_query()
    }

    fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.date_from, self.date_to)
    }
}

/// Builds the query for an export of `kind`.
///
/// The `format` parameter is always sent. Property column ids go under the
/// kind-specific key from [`ResourceKind::property_ids_key`].
///
/// # Errors
///
/// Returns [`QueryError::ExportFormatRequiresRange`] when the uitkrant format
/// is requested without both date bounds, and any error from
/// [`QueryCriteria::build_query`].
pub fn build_export_query<C>(
    kind: ResourceKind,
    criteria: &C,
    export: &ExportCriteria,
) -> QueryResult<QueryParams>
where
    C: QueryCriteria + ?Sized,
{
    if export.format == ExportFormat::Uitkrant {
        let (from, to) = criteria.date_range();
        if from.is_none() || to.is_none() {
            return Err(QueryError::ExportFormatRequiresRange);
        }
    }

    let mut params = criteria.build_query()?;
    params.set("format", export.format.as_str());
    if !export.property_column_ids.is_empty() {
        params.set(kind.property_ids_key(), export.property_column_ids.to_wire());
    }

    Ok(params)
}
