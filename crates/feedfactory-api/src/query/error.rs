//! Error types for filter criteria and time expressions.

use thiserror::Error;

/// A specialized Result type for query building operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Local validation failures raised while turning filter intent into a query.
///
/// None of these are transient: they are detected before any request is sent
/// and should be reported to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A date-like value matched neither the relative nor the absolute form.
    #[error("invalid time expression \"{input}\" (use e.g. 3d, 2w, 1mo, 1y, or 2026-01-15)")]
    InvalidTimeExpression {
        /// The offending input.
        input: String,
    },

    /// A geo radius was supplied without a geo center.
    #[error("geo distance \"{radius}\" requires a geo center (lat,lon)")]
    GeoRadiusWithoutCenter {
        /// The radius that could not be applied.
        radius: String,
    },

    /// The uitkrant export format was requested without both date bounds.
    #[error("export format 'uitkrant' requires both a start date and an end date")]
    ExportFormatRequiresRange,

    /// A geo center that is not a `lat,lon` pair of numbers.
    #[error("invalid geo point \"{input}\" (expected lat,lon, e.g. 52.37,4.89)")]
    InvalidGeoPoint {
        /// The offending input.
        input: String,
    },
}

impl QueryError {
    /// Creates an invalid time expression error.
    pub fn invalid_time_expression(input: impl Into<String>) -> Self {
        QueryError::InvalidTimeExpression {
            input: input.into(),
        }
    }

    /// Creates an invalid geo point error.
    pub fn invalid_geo_point(input: impl Into<String>) -> Self {
        QueryError::InvalidGeoPoint {
            input: input.into(),
        }
    }

    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidTimeExpression { .. } => "DATE_FORMAT_ERROR",
            QueryError::GeoRadiusWithoutCenter { .. } => "GEO_FILTER_INVALID",
            QueryError::ExportFormatRequiresRange => "EXPORT_FORMAT_REQUIRES_RANGE",
            QueryError::InvalidGeoPoint { .. } => "GEO_POINT_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_expression_error_names_input_and_forms() {
        let err = QueryError::invalid_time_expression("3x");
        let msg = err.to_string();
        assert!(msg.contains("\"3x\""));
        assert!(msg.contains("3d, 2w, 1mo, 1y, or 2026-01-15"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QueryError::invalid_time_expression("abc").code(),
            "DATE_FORMAT_ERROR"
        );
        assert_eq!(
            QueryError::GeoRadiusWithoutCenter {
                radius: "10km".to_string()
            }
            .code(),
            "GEO_FILTER_INVALID"
        );
        assert_eq!(
            QueryError::ExportFormatRequiresRange.code(),
            "EXPORT_FORMAT_REQUIRES_RANGE"
        );
        assert_eq!(QueryError::invalid_geo_point("x").code(), "GEO_POINT_INVALID");
    }
}
