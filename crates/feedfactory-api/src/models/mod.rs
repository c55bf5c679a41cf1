//! Data models for FeedFactory API responses.
//!
//! Responses are reconciled leniently: apart from a resource `id`, any field
//! with an unexpected shape falls back to its empty value instead of failing
//! the whole response.

pub mod contact;
pub mod dictionary;
pub mod document;
pub mod flex;
pub mod history;
pub mod localized;
pub mod resource;
pub mod search;

pub use contact::{ContactInfo, ContactMail, ContactPhone, ContactUrl, FlexContact};
pub use dictionary::{CategoryTranslation, Categorization, FlatCategory, Ontology};
pub use document::ResourceDocument;
pub use history::{parse_comments, parse_revisions, Comment, Revision};
pub use localized::ItemDetail;
pub use resource::{
    parse_resources, Address, Calendar, Keyword, Location, Media, Physical, Resource, SingleDate,
    UrlEntry,
};
pub use search::SearchResult;
