use super::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub uuid: Uuid,
    pub href: String,
    pub title: String,
    pub description: String,
    pub language: String,
    /// Duration in milliseconds
    pub duration: i64,
    /// Href of the season
    pub season: String,
    pub episode_num: u8,
    pub next_episode: Option<String>,
    pub prev_episode: Option<String>,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub sources: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEpisode {
    pub title: String,
    pub description: String,
    pub language: String,
    pub duration: i64,
    pub season: String,
    pub episode_num: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_episode: Option<String>,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchEpisode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_num: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl Resource for Episode {
    const PATH: &'static str = "episodes";
    type Create = CreateEpisode;
    type Patch = PatchEpisode;
}
