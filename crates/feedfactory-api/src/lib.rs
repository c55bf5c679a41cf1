//! FeedFactory API client library
//!
//! Turns filter intent into remote queries, resolves resource endpoints, and
//! reconciles the API's loosely shaped JSON into typed models.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use feedfactory_api::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including
//! [`FeedFactoryClient`](client::FeedFactoryClient), the filter criteria,
//! error types, and data models.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod prelude;
pub mod query;
pub mod time_expr;
