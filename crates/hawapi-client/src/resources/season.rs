use super::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A season of the show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub uuid: Uuid,
    pub href: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub genres: Vec<String>,
    pub episodes: Vec<String>,
    pub trailers: Vec<String>,
    pub budget: i64,
    /// Sum of the episode durations in milliseconds
    pub duration_total: i64,
    pub season_num: u8,
    pub release_date: String,
    pub next_season: Option<String>,
    pub prev_season: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub sources: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSeason {
    pub title: String,
    pub description: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailers: Vec<String>,
    pub budget: i64,
    pub duration_total: i64,
    pub season_num: u8,
    pub release_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchSeason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_num: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl Resource for Season {
    const PATH: &'static str = "seasons";
    type Create = CreateSeason;
    type Patch = PatchSeason;
}
