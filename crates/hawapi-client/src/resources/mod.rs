//! Typed access to the catalog resources.
//!
//! Each resource declares its entity, create and patch payloads and the
//! path it lives under; [`Resources`] maps the common operations onto the
//! client's collaborator methods.
//!
//! ```rust,ignore
//! use hawapi_client::{HawApiClient, ClientConfig, Query};
//!
//! let client = HawApiClient::new(ClientConfig::default())?;
//! let actors = client.actors().list(&Query::new().page(2)).await?;
//! let random = client.episodes().random().await?;
//! ```

mod actor;
mod character;
mod episode;
mod game;
mod location;
mod season;
mod soundtrack;

pub use actor::{Actor, CreateActor, PatchActor, Social};
pub use character::{Character, CreateCharacter, PatchCharacter};
pub use episode::{CreateEpisode, Episode, PatchEpisode};
pub use game::{CreateGame, Game, PatchGame};
pub use location::{CreateLocation, Location, PatchLocation};
pub use season::{CreateSeason, PatchSeason, Season};
pub use soundtrack::{CreateSoundtrack, PatchSoundtrack, Soundtrack};

use crate::client::HawApiClient;
use crate::error::Result;
use crate::query::Query;
use crate::types::{ItemResponse, ListResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use uuid::Uuid;

/// A catalog entity type and its payloads.
pub trait Resource: DeserializeOwned + Serialize + Send + Sync {
    /// Path relative to the versioned endpoint, e.g. `"actors"`.
    const PATH: &'static str;

    /// Body sent on creation.
    type Create: Serialize + Send + Sync;

    /// Partial body merged over the current entity on patch.
    type Patch: Serialize + Send + Sync;
}

/// Operations on one resource type.
pub struct Resources<'a, R> {
    client: &'a HawApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Resources<'a, R> {
    pub(crate) fn new(client: &'a HawApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: Uuid) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// List one page of items.
    pub async fn list(&self, query: &Query) -> Result<ListResponse<R>> {
        self.client.list_resource(R::PATH, query).await
    }

    /// Get a single item by UUID.
    pub async fn find(&self, id: Uuid) -> Result<ItemResponse<R>> {
        self.client.find_resource(&Self::item_path(id)).await
    }

    /// Get a random item. Always goes to the network.
    pub async fn random(&self) -> Result<ItemResponse<R>> {
        self.client
            .random_resource(&format!("{}/random", R::PATH))
            .await
    }

    /// Create an item. Requires a token.
    pub async fn create(&self, item: &R::Create) -> Result<R> {
        self.client.create_resource(R::PATH, item).await
    }

    /// Patch an item. Requires a token.
    pub async fn patch(&self, id: Uuid, patch: &R::Patch) -> Result<R> {
        self.client
            .patch_resource(&Self::item_path(id), patch)
            .await
    }

    /// Delete an item. Requires a token.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete_resource(&Self::item_path(id)).await
    }
}

impl HawApiClient {
    /// Generic handle for any [`Resource`].
    pub fn resource<R: Resource>(&self) -> Resources<'_, R> {
        Resources::new(self)
    }

    pub fn actors(&self) -> Resources<'_, Actor> {
        self.resource()
    }

    pub fn characters(&self) -> Resources<'_, Character> {
        self.resource()
    }

    pub fn episodes(&self) -> Resources<'_, Episode> {
        self.resource()
    }

    pub fn games(&self) -> Resources<'_, Game> {
        self.resource()
    }

    pub fn locations(&self) -> Resources<'_, Location> {
        self.resource()
    }

    pub fn seasons(&self) -> Resources<'_, Season> {
        self.resource()
    }

    pub fn soundtracks(&self) -> Resources<'_, Soundtrack> {
        self.resource()
    }
}
