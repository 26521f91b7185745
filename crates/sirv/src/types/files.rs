//! File and folder types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Attributes shared by folder entries, `stat` results and search hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonFileInfo {
    /// Last modification time (ISO 8601)
    pub mtime: String,

    /// MIME type
    pub content_type: String,

    /// Size in bytes
    pub size: i64,

    /// Whether the entry is a folder
    pub is_directory: bool,

    /// Free-form media metadata, see [`CommonFileInfo::file_meta`]
    pub meta: HashMap<String, Value>,
}

impl CommonFileInfo {
    /// Interpret [`meta`](Self::meta) as image/video metadata.
    ///
    /// Keys not covered by [`FileMeta`] are ignored; missing keys default.
    pub fn file_meta(&self) -> Result<FileMeta> {
        let object = self
            .meta
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(Value::Object(object)).map_err(Error::Decode)
    }
}

/// One entry of a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    /// Shared attributes
    #[serde(flatten)]
    pub info: CommonFileInfo,

    /// Entry name, relative to the listed folder
    pub filename: String,
}

/// Response of `GET /files/stat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    /// Shared attributes
    #[serde(flatten)]
    pub info: CommonFileInfo,

    /// Creation time (ISO 8601)
    pub ctime: String,
}

/// Indexed document behind a search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    /// Shared attributes
    #[serde(flatten)]
    pub info: CommonFileInfo,

    /// Owning account
    pub account_id: String,

    /// Absolute path of the file
    pub filename: String,

    /// Parent folder
    pub dirname: String,

    /// File name without folder
    pub basename: String,

    /// File extension including the dot
    pub extension: String,

    /// Document id
    pub id: String,
}

/// Response of `GET /files/readdir`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderContents {
    /// Entries of this page
    pub contents: Vec<File>,

    /// Cursor for the next page; absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

impl FolderContents {
    /// Cursor of the next page, treating an empty cursor as exhausted.
    pub fn next_page(&self) -> Option<&str> {
        self.continuation.as_deref().filter(|c| !c.is_empty())
    }
}

/// Image and video metadata carried in `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeta {
    /// Width in pixels
    pub width: i64,

    /// Height in pixels
    pub height: i64,

    /// Media format (e.g. "jpeg")
    pub format: String,

    /// Duration of video files, in seconds
    pub duration: f64,

    /// Selected EXIF tags
    #[serde(rename = "EXIF")]
    pub exif: Exif,
}

/// EXIF tags surfaced by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exif {
    /// `ModifyDate` tag
    #[serde(rename = "ModifyDate")]
    pub modify_date: String,
}
