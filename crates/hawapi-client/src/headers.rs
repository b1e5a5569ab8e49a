//! Pagination, quota and caching metadata carried in response headers.
//!
//! Every numeric field is parsed on its own. Missing or malformed values
//! become `-1`, never an error, so `0` stays distinguishable from "absent".

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

pub const HEADER_RATE_LIMIT_REMAINING: &str = "X-Rate-Limit-Remaining";
pub const HEADER_PAGE_INDEX: &str = "X-Pagination-Page-Index";
pub const HEADER_PAGE_SIZE: &str = "X-Pagination-Page-Size";
pub const HEADER_PAGE_TOTAL: &str = "X-Pagination-Page-Total";
pub const HEADER_ITEM_TOTAL: &str = "X-Pagination-Item-Total";
pub const HEADER_CONTENT_LANGUAGE: &str = "Content-Language";
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length";
pub const HEADER_ETAG: &str = "ETag";

/// Value used for any numeric header that is absent or unparseable.
pub const SENTINEL: i64 = -1;

/// Rate limit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub remaining: i64,
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            remaining: SENTINEL,
        }
    }
}

/// Structured view of the API response headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderResponse {
    pub page: i64,
    pub page_size: i64,
    pub page_total: i64,
    pub item_size: i64,
    pub next_page: i64,
    pub prev_page: i64,
    pub language: String,
    pub quota: Quota,
    pub etag: String,
    pub length: i64,
}

impl Default for HeaderResponse {
    fn default() -> Self {
        Self {
            page: SENTINEL,
            page_size: SENTINEL,
            page_total: SENTINEL,
            item_size: SENTINEL,
            next_page: SENTINEL,
            prev_page: SENTINEL,
            language: String::new(),
            quota: Quota::default(),
            etag: String::new(),
            length: SENTINEL,
        }
    }
}

/// Parse response headers. Never fails.
pub fn extract_headers(headers: &HeaderMap) -> HeaderResponse {
    let page = parse_int(header_str(headers, HEADER_PAGE_INDEX));

    HeaderResponse {
        page,
        page_size: parse_int(header_str(headers, HEADER_PAGE_SIZE)),
        page_total: parse_int(header_str(headers, HEADER_PAGE_TOTAL)),
        item_size: parse_int(header_str(headers, HEADER_ITEM_TOTAL)),
        next_page: next_page(page),
        prev_page: prev_page(page),
        language: header_str(headers, HEADER_CONTENT_LANGUAGE).to_string(),
        quota: Quota {
            remaining: parse_int(header_str(headers, HEADER_RATE_LIMIT_REMAINING)),
        },
        etag: header_str(headers, HEADER_ETAG).to_string(),
        length: parse_int(header_str(headers, HEADER_CONTENT_LENGTH)),
    }
}

/// Page after `page`, or -1 when `page` is not a valid index.
pub fn next_page(page: i64) -> i64 {
    if page <= 0 {
        return SENTINEL;
    }
    page.saturating_add(1)
}

/// Page before `page`, or -1 when there is none (there is no page 0).
pub fn prev_page(page: i64) -> i64 {
    if page <= 1 {
        return SENTINEL;
    }
    page - 1
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn parse_int(value: &str) -> i64 {
    value.trim().parse().unwrap_or(SENTINEL)
}
