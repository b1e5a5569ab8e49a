//! HawAPI Client SDK
//!
//! A Rust HTTP client for the HawAPI content catalog (actors, characters,
//! episodes, games, locations, seasons and soundtracks).
//!
//! # Features
//!
//! - **Typed resources**: list, find, random, create, patch and delete for
//!   every catalog resource
//! - **Deterministic URLs**: query options resolve to one canonical URL per
//!   logical request
//! - **Response metadata**: pagination and rate-limit headers parsed into
//!   [`HeaderResponse`]
//! - **In-memory caching**: repeat GETs are served from a swappable [`Cache`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hawapi_client::{ClientConfig, HawApiClient, Query};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HawApiClient::new(
//!         ClientConfig::builder()
//!             .language("pt-BR")
//!             .size(20)
//!             .build()?
//!     )?;
//!
//!     let actors = client
//!         .actors()
//!         .list(&Query::new().page(2).sort("first_name").order("DESC"))
//!         .await?;
//!     for actor in &actors.data {
//!         println!("{} {}", actor.first_name, actor.last_name);
//!     }
//!     println!("next page: {:?}", actors.next_page());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Caching
//!
//! Successful GETs are cached by URL when `use_in_memory_cache` is enabled
//! (the default). A cached entry that no longer decodes into the requested
//! type is ignored and the request goes to the network instead.
//! `BaseResponse::cached` means the response now resides in the cache;
//! `BaseResponse::served_from_cache` means no network call was made.
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Errors include:
//!
//! - `Transport`: connection, DNS or timeout failure
//! - `Api`: unexpected status with a structured error body
//! - `AuthRequired`: create/patch/delete attempted without a token
//!
//! Nothing is retried.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod query;
pub mod resources;
pub mod types;
pub mod url_builder;

// Re-exports for convenience
pub use cache::{Cache, CacheEntry, LruMemoryCache, MemoryCache};
pub use client::{HawApiClient, SharedClient};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigOverrides};
pub use error::{ApiErrorBody, ClientError, Result};
pub use headers::{HeaderResponse, Quota};
pub use query::{Filters, Pageable, Query, QueryOption, QueryOptions};
pub use resources::{
    Actor, Character, CreateActor, CreateCharacter, CreateEpisode, CreateGame, CreateLocation,
    CreateSeason, CreateSoundtrack, Episode, Game, Location, PatchActor, PatchCharacter,
    PatchEpisode, PatchGame, PatchLocation, PatchSeason, PatchSoundtrack, Resource, Resources,
    Season, Social, Soundtrack,
};
pub use types::{BaseResponse, DataCount, Info, ItemResponse, ListResponse, Overview};
