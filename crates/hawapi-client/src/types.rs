//! Response types for the HawAPI.
//!
//! These types mirror the API response structures and are used for
//! deserialization of JSON responses.

use crate::headers::HeaderResponse;
use serde::{Deserialize, Serialize};

/// Metadata returned alongside every list/find/random result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResponse {
    /// Values parsed from the response headers
    #[serde(flatten)]
    pub headers: HeaderResponse,
    /// The entry for this request now resides in the cache
    pub cached: bool,
    /// The result was served from the cache without a network call
    #[serde(default)]
    pub served_from_cache: bool,
    /// HTTP status of the (original) response
    pub status: u16,
}

impl BaseResponse {
    pub fn new(headers: HeaderResponse, status: u16) -> Self {
        Self {
            headers,
            cached: false,
            served_from_cache: false,
            status,
        }
    }
}

/// A single entity and its response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResponse<T> {
    pub base: BaseResponse,
    pub data: T,
}

/// A page of entities and its response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub base: BaseResponse,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Next page index, if the server reported pagination.
    pub fn next_page(&self) -> Option<u32> {
        u32::try_from(self.base.headers.next_page).ok()
    }

    /// Previous page index, if there is one.
    pub fn prev_page(&self) -> Option<u32> {
        u32::try_from(self.base.headers.prev_page).ok()
    }

    /// Whether the server reports more pages after this one.
    pub fn has_next(&self) -> bool {
        let headers = &self.base.headers;
        headers.page > 0 && headers.page_total > 0 && headers.page < headers.page_total
    }
}

/// API information served on the root endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
    pub url: String,
    pub docs: String,
    pub github: String,
    pub license: String,
    pub github_home: String,
    pub api_url: String,
    pub api_version: String,
    pub api_path: String,
    pub api_base_url: String,
    pub license_url: String,
}

/// Number of items per resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCount {
    pub actors: u64,
    pub characters: u64,
    pub episodes: u64,
    pub games: u64,
    pub locations: u64,
    pub seasons: u64,
    pub soundtracks: u64,
}

/// Overview of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub uuid: String,
    pub href: String,
    pub sources: Vec<String>,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub languages: Vec<String>,
    pub creators: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub data_count: DataCount,
}
