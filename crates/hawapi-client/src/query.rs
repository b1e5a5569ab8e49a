//! Query model: pagination, filters and the per-call option list.
//!
//! A [`Query`] records options in call order. The URL builder replays them
//! over a [`QueryOptions`] snapshot seeded from the client configuration, so
//! later options win over earlier ones and over client-level defaults.

use crate::config::{ClientConfig, DEFAULT_LANGUAGE, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};

/// Filter key used for the content language.
pub const LANGUAGE_FILTER: &str = "language";

/// Pagination and sorting parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub order: String,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_SIZE,
            sort: String::new(),
            order: "ASC".to_string(),
        }
    }
}

/// Free-form filters keyed by name.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the position where the key was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}

/// Snapshot of the effective pagination and filters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub pageable: Pageable,
    pub filters: Filters,
}

impl QueryOptions {
    /// Seed a snapshot with the client-level size and language.
    pub fn seeded(config: &ClientConfig) -> Self {
        let size = if config.size == 0 {
            DEFAULT_SIZE
        } else {
            config.size
        };

        let mut filters = Filters::new();
        if !config.language.is_empty() && config.language != DEFAULT_LANGUAGE {
            filters.insert(LANGUAGE_FILTER, config.language.clone());
        }

        Self {
            pageable: Pageable {
                size,
                ..Pageable::default()
            },
            filters,
        }
    }

    fn apply(&mut self, option: &QueryOption) {
        match option {
            QueryOption::Page(page) => self.pageable.page = *page,
            QueryOption::Size(size) => self.pageable.size = *size,
            QueryOption::Sort(sort) => self.pageable.sort.clone_from(sort),
            QueryOption::Order(order) => self.pageable.order.clone_from(order),
            QueryOption::Pageable(pageable) => self.pageable = pageable.clone(),
            QueryOption::Filter(key, value) => {
                self.filters.insert(key.clone(), value.clone());
            }
            QueryOption::Filters(filters) => self.filters = filters.clone(),
        }
    }
}

/// A single mutation of the query snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    Page(u32),
    Size(u32),
    Sort(String),
    Order(String),
    Pageable(Pageable),
    Filter(String, String),
    /// Replaces every filter, including the seeded language.
    Filters(Filters),
}

/// Ordered list of query options for a single call.
///
/// ```
/// use hawapi_client::Query;
///
/// let query = Query::new()
///     .page(2)
///     .filter("gender", "1")
///     .sort("first_name")
///     .order("DESC");
/// assert_eq!(query.options().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    options: Vec<QueryOption>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw option.
    pub fn with(mut self, option: QueryOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn page(self, page: u32) -> Self {
        self.with(QueryOption::Page(page))
    }

    pub fn size(self, size: u32) -> Self {
        self.with(QueryOption::Size(size))
    }

    pub fn sort(self, sort: impl Into<String>) -> Self {
        self.with(QueryOption::Sort(sort.into()))
    }

    /// Sort direction. Ignored unless a sort field is also set.
    pub fn order(self, order: impl Into<String>) -> Self {
        self.with(QueryOption::Order(order.into()))
    }

    pub fn pageable(self, pageable: Pageable) -> Self {
        self.with(QueryOption::Pageable(pageable))
    }

    pub fn filter(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(QueryOption::Filter(key.into(), value.into()))
    }

    pub fn filters(self, filters: Filters) -> Self {
        self.with(QueryOption::Filters(filters))
    }

    pub fn language(self, language: impl Into<String>) -> Self {
        self.filter(LANGUAGE_FILTER, language)
    }

    pub fn options(&self) -> &[QueryOption] {
        &self.options
    }

    /// Replay the options in order over `seed`.
    pub fn resolve(&self, seed: QueryOptions) -> QueryOptions {
        self.options.iter().fold(seed, |mut opts, option| {
            opts.apply(option);
            opts
        })
    }
}
