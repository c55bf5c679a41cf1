//! Comments and revisions on a resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::flex::nullable;

/// An internal editor note on a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(deserialize_with = "nullable")]
    pub created: String,
}

/// One entry of a resource's change history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Revision {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(deserialize_with = "nullable")]
    pub created: String,
    #[serde(deserialize_with = "nullable")]
    pub comment: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Bare(Vec<T>),
    Comments { comments: Vec<T> },
    Revisions { revisions: Vec<T> },
}

fn parse_list<T: DeserializeOwned>(body: &[u8]) -> Option<Vec<T>> {
    match serde_json::from_slice::<ListPayload<T>>(body).ok()? {
        ListPayload::Bare(items)
        | ListPayload::Comments { comments: items }
        | ListPayload::Revisions { revisions: items } => Some(items),
    }
}

/// Parses a comments payload: a bare array or `{"comments": [...]}`.
///
/// Returns `None` for any other shape so the caller can show the body as-is.
pub fn parse_comments(body: &[u8]) -> Option<Vec<Comment>> {
    parse_list(body)
}

/// Parses a revisions payload: a bare array or `{"revisions": [...]}`.
pub fn parse_revisions(body: &[u8]) -> Option<Vec<Revision>> {
    parse_list(body)
}
