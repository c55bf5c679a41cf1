//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use feedfactory_api::prelude::*;
//!
//! // Now you have access to:
//! // - FeedFactoryClient, FeedFactoryClientBuilder (API client)
//! // - Error, ApiError, Result (error handling)
//! // - FilterCriteria, EventFilterCriteria, ExportCriteria, QueryParams (queries)
//! // - ResourceKind (endpoints)
//! // - Resource, SearchResult, ResourceDocument, etc. (data models)
//! ```

// Client types
pub use crate::client::{FeedFactoryClient, FeedFactoryClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Query building
pub use crate::query::{
    build_export_query, EventFilterCriteria, ExportCriteria, ExportFormat, FilterCriteria,
    GeoPoint, GeoRadius, LabelList, MarkerFilter, QueryCriteria, QueryError, QueryParams,
    SortField, WorkflowStatus,
};

// Endpoints
pub use crate::endpoint::{resolve_endpoint, ResourceKind};

// Time expressions
pub use crate::time_expr::{TimeExpression, TimePoint};

// Data models
pub use crate::models::{
    Comment, FlatCategory, Keyword, Ontology, Resource, ResourceDocument, Revision, SearchResult,
};
