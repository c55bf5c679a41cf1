//! Output formatting utilities for the tff CLI.
//!
//! This module provides functions for formatting API data as tables and
//! detail views. JSON output is the API body itself, re-indented. It is
//! organized into submodules by entity type:
//!
//! - [`resources`] - Resource output formatting (list, get)
//! - [`history`] - Comment and revision output formatting
//! - [`dictionary`] - Ontology tree and category table formatting
//! - [`helpers`] - Common formatting utilities (truncation, tables, JSON)

mod dictionary;
pub mod helpers;
mod history;
mod resources;

// Re-export all public functions from submodules

// Resources
pub use resources::{format_resource_details, format_resources_table};

// Comments and revisions
pub use history::{format_comments, format_revisions};

// Dictionary
pub use dictionary::{format_categories_table, format_ontology_tree};
