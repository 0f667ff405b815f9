use std::sync::{Arc, Mutex};

use futures::stream::BoxStream;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use crate::connectivity::ConnectivityProbe;
use crate::db::{CacheError, RecipesEntity, RecipesRepository};
use crate::models::FoodRecipe;
use crate::network_result::{handle_food_recipes_response, NetworkResult, RecipeErrorKind};
use crate::remote::{Queries, RemoteDataSource};

/// Runs recipe searches and publishes their state.
///
/// Each search goes `Loading` then `Success` or `Error`. Observers subscribe
/// through [`MainViewModel::recipes_response`]; a new search simply
/// overwrites the previous state. Successful payloads are written to the
/// cache on a separate task that the search does not wait for.
pub struct MainViewModel<C> {
    inner: Arc<Inner<C>>,
}

struct Inner<C> {
    remote: RemoteDataSource,
    local: RecipesRepository,
    connectivity: C,
    recipes_response: watch::Sender<NetworkResult<FoodRecipe>>,
    cache_writes: Mutex<JoinSet<()>>,
}

impl<C> Clone for MainViewModel<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: ConnectivityProbe> MainViewModel<C> {
    pub fn new(remote: RemoteDataSource, local: RecipesRepository, connectivity: C) -> Self {
        let (recipes_response, _) = watch::channel(NetworkResult::Loading);
        Self {
            inner: Arc::new(Inner {
                remote,
                local,
                connectivity,
                recipes_response,
                cache_writes: Mutex::new(JoinSet::new()),
            }),
        }
    }

    /// Subscribes to the search state.
    pub fn recipes_response(&self) -> watch::Receiver<NetworkResult<FoodRecipe>> {
        self.inner.recipes_response.subscribe()
    }

    /// Cached rows from the last successful search.
    pub fn read_recipes(&self) -> BoxStream<'_, Result<RecipesEntity, CacheError>> {
        self.inner.local.read_recipes()
    }

    /// Starts a search in the background.
    pub fn get_recipes(&self, queries: Queries) -> JoinHandle<NetworkResult<FoodRecipe>> {
        let this = self.clone();
        tokio::spawn(async move { this.get_recipe_safe_call(queries).await })
    }

    /// Runs one search to completion and returns its final state.
    pub async fn get_recipe_safe_call(&self, queries: Queries) -> NetworkResult<FoodRecipe> {
        self.publish(NetworkResult::Loading);

        if !self.inner.connectivity.is_internet_connected().await {
            tracing::info!("No connectivity, skipping recipe request");
            let result = NetworkResult::from(RecipeErrorKind::NoInternet);
            self.publish(result.clone());
            return result;
        }

        let result = match self.inner.remote.get_recipes(&queries).await {
            Ok(response) => handle_food_recipes_response(response),
            Err(e) => {
                tracing::warn!(error = %e, "Recipe request failed");
                NetworkResult::from(RecipeErrorKind::TransportFailure)
            }
        };
        self.publish(result.clone());

        if let NetworkResult::Success(food_recipe) = &result {
            self.offline_cache_recipes(food_recipe.clone());
        }

        result
    }

    /// Waits for every cache write started so far.
    pub async fn wait_for_cache_writes(&self) {
        let mut pending = match self.inner.cache_writes.lock() {
            Ok(mut set) => std::mem::take(&mut *set),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        while pending.join_next().await.is_some() {}
    }

    fn offline_cache_recipes(&self, food_recipe: FoodRecipe) {
        let local = self.inner.local.clone();
        let write = async move {
            let entity = RecipesEntity::new(food_recipe);
            if let Err(e) = local.insert_recipes(&entity).await {
                tracing::warn!(error = %e, "Failed to cache recipes");
            }
        };

        let mut set = match self.inner.cache_writes.lock() {
            Ok(set) => set,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Reap finished writes so the set only holds in-flight ones
        while set.try_join_next().is_some() {}
        set.spawn(write);
    }

    fn publish(&self, result: NetworkResult<FoodRecipe>) {
        self.inner.recipes_response.send_replace(result);
    }
}
