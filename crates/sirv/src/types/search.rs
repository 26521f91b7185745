//! File search types

use super::files::Source;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body of `POST /files/search`.
///
/// Unset fields are left out of the JSON body.
///
/// ```
/// use sirv::FileSearchPayload;
///
/// let payload = FileSearchPayload::new("logo").size(10);
/// assert_eq!(
///     serde_json::to_string(&payload).unwrap(),
///     r#"{"query":"logo","size":10}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchPayload {
    /// Search query (Elasticsearch query-string syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Sort order, field name to `asc` / `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<BTreeMap<String, String>>,

    /// Offset of the first hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,

    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Open a scroll context for [`Files::scroll`](crate::resources::Files::scroll)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<bool>,
}

impl FileSearchPayload {
    /// Search for `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self::default().query(query)
    }

    /// Set the query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add a sort key.
    pub fn sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), order.into());
        self
    }

    /// Set the offset of the first hit.
    pub fn from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the page size.
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Request a scroll context.
    pub fn scroll(mut self, scroll: bool) -> Self {
        self.scroll = Some(scroll);
        self
    }
}

/// Response of `POST /files/search` and `POST /files/search/scroll`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchResponse {
    /// Hits of this page
    pub hits: Vec<FileHit>,

    /// Total number of matches
    pub total: i64,

    /// How `total` relates to the real count (`eq` or `gte`)
    #[serde(rename = "_relation")]
    pub relation: String,

    /// Scroll cursor, present when the search was scrolled
    #[serde(rename = "scrollId", skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
}

impl FileSearchResponse {
    /// Scroll cursor, treating an empty cursor as absent.
    pub fn next_scroll(&self) -> Option<&str> {
        self.scroll_id.as_deref().filter(|s| !s.is_empty())
    }
}

/// Response of `POST /files/search/scroll`.
pub type FileSearchScrollResponse = FileSearchResponse;

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHit {
    /// Index name
    #[serde(rename = "_index")]
    pub index: String,

    /// Document type
    #[serde(rename = "_type")]
    pub doc_type: String,

    /// Document id
    #[serde(rename = "_id")]
    pub id: String,

    /// Routing key
    #[serde(rename = "_routing")]
    pub routing: String,

    /// Indexed file
    #[serde(rename = "_source")]
    pub source: Source,

    /// Sort values of this hit
    pub sort: Vec<f64>,
}

/// Request body of `POST /files/search/scroll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSearchScrollPayload {
    /// Cursor returned by the previous page
    #[serde(rename = "scrollId")]
    pub scroll_id: String,
}

impl FileSearchScrollPayload {
    /// Continue the scroll identified by `scroll_id`.
    pub fn new(scroll_id: impl Into<String>) -> Self {
        Self {
            scroll_id: scroll_id.into(),
        }
    }
}
