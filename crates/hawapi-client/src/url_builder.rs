//! Canonical request URL construction.
//!
//! The produced string doubles as the cache key, so equal inputs must always
//! yield byte-identical URLs. Parameters are kept as an ordered list where a
//! repeated key overwrites the earlier value in place.

use crate::config::{ClientConfig, DEFAULT_LANGUAGE, DEFAULT_SIZE};
use crate::query::{Query, QueryOptions, LANGUAGE_FILTER};

/// Ordered `key=value` pairs with push-or-overwrite semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`, or replace the value if `key` is already present.
    pub fn push_or_overwrite(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as `?k=v&k=v`, or an empty string when there are no params.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        let joined = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

/// Build the URL for `path` under the configured endpoint and version.
///
/// `None` yields the bare URL without even client-level parameters; pass an
/// empty [`Query`] to get those.
pub fn build_url(config: &ClientConfig, path: &str, query: Option<&Query>) -> String {
    let url = format!("{}/{}/{}", config.endpoint, config.version, path);

    let Some(query) = query else {
        return url;
    };

    let mut params = QueryParams::new();

    if !config.language.is_empty() && config.language != DEFAULT_LANGUAGE {
        params.push_or_overwrite(LANGUAGE_FILTER, encode(&config.language));
    }

    if config.size != 0 && config.size != DEFAULT_SIZE {
        params.push_or_overwrite("size", config.size.to_string());
    }

    let opts = query.resolve(QueryOptions::seeded(config));

    for (key, value) in opts.filters.iter() {
        if !value.is_empty() {
            params.push_or_overwrite(encode(key), encode(value));
        }
    }

    let pageable = &opts.pageable;
    if pageable.page != 0 && pageable.page != 1 {
        params.push_or_overwrite("page", pageable.page.to_string());
    }

    if pageable.size != 0 && pageable.size != DEFAULT_SIZE {
        params.push_or_overwrite("size", pageable.size.to_string());
    }

    if !pageable.sort.is_empty() {
        let mut sort = encode(&pageable.sort);
        if !pageable.order.is_empty() {
            sort = format!("{},{}", sort, encode(&pageable.order));
        }
        params.push_or_overwrite("sort", sort);
    }

    url + &params.to_query_string()
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
