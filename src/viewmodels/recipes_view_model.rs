use std::sync::Arc;

use futures::stream::Stream;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::preferences::{DataStoreRepository, MealAndDietType};
use crate::remote::{
    Queries, QUERY_ADD_RECIPE_INFORMATION, QUERY_API_KEY, QUERY_DIET, QUERY_FILL_INGREDIENTS,
    QUERY_NUMBER, QUERY_SEARCH, QUERY_TYPE,
};

/// A connectivity change worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatusNotice {
    NoInternet,
    BackOnline,
}

impl NetworkStatusNotice {
    pub fn message(&self) -> &'static str {
        match self {
            NetworkStatusNotice::NoInternet => "No Internet Connection.",
            NetworkStatusNotice::BackOnline => "We're back online.",
        }
    }
}

impl std::fmt::Display for NetworkStatusNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Builds search queries from saved preferences and tracks network status.
pub struct RecipesViewModel {
    data_store: Arc<DataStoreRepository>,
    api_key: String,
    recipes_number: u32,
    /// Whether the last connectivity check succeeded
    pub network_status: bool,
    /// Whether the app was offline and has not yet announced coming back
    pub back_online: bool,
}

impl RecipesViewModel {
    pub fn new(data_store: Arc<DataStoreRepository>, api_key: String, recipes_number: u32) -> Self {
        let back_online = data_store.current_back_online();
        Self {
            data_store,
            api_key,
            recipes_number,
            network_status: false,
            back_online,
        }
    }

    pub fn from_config(data_store: Arc<DataStoreRepository>, config: &Config) -> Self {
        Self::new(
            data_store,
            config.api_key.value.clone(),
            config.recipes_number.value,
        )
    }

    pub fn read_meal_and_diet_type(&self) -> impl Stream<Item = MealAndDietType> + Send + 'static {
        self.data_store.read_meal_and_diet_type()
    }

    pub fn read_back_online(&self) -> impl Stream<Item = bool> + Send + 'static {
        self.data_store.read_back_online()
    }

    /// Queries for a category search using the saved meal and diet type.
    pub fn apply_queries(&self) -> Queries {
        let selection = self.data_store.current_meal_and_diet_type();

        let mut queries = self.base_queries();
        queries.insert(QUERY_TYPE.to_string(), selection.selected_meal_type);
        queries.insert(QUERY_DIET.to_string(), selection.selected_diet_type);
        queries
    }

    /// Queries for a free-text search.
    pub fn apply_search_query(&self, search_query: &str) -> Queries {
        let mut queries = self.base_queries();
        queries.insert(QUERY_SEARCH.to_string(), search_query.to_string());
        queries
    }

    fn base_queries(&self) -> Queries {
        let mut queries = Queries::new();
        queries.insert(QUERY_NUMBER.to_string(), self.recipes_number.to_string());
        queries.insert(QUERY_API_KEY.to_string(), self.api_key.clone());
        queries.insert(QUERY_ADD_RECIPE_INFORMATION.to_string(), "true".to_string());
        queries.insert(QUERY_FILL_INGREDIENTS.to_string(), "true".to_string());
        queries
    }

    /// Persists the selection in the background. Failures are only logged.
    pub fn save_meal_and_diet_type(&self, selection: MealAndDietType) -> JoinHandle<()> {
        let data_store = Arc::clone(&self.data_store);
        tokio::spawn(async move {
            if let Err(e) = data_store.save_meal_and_diet_type(selection).await {
                tracing::warn!(error = %e, "Failed to save meal and diet type");
            }
        })
    }

    /// Persists the flag in the background. Failures are only logged.
    pub fn save_back_online(&self, back_online: bool) -> JoinHandle<()> {
        let data_store = Arc::clone(&self.data_store);
        tokio::spawn(async move {
            if let Err(e) = data_store.save_back_online(back_online).await {
                tracing::warn!(error = %e, "Failed to save back-online flag");
            }
        })
    }

    /// Decides what to tell the user about connectivity and records it.
    ///
    /// Offline always yields [`NetworkStatusNotice::NoInternet`] and marks the
    /// flag; coming back online yields [`NetworkStatusNotice::BackOnline`]
    /// once and clears it. The returned handle is the background flag write.
    pub fn show_network_status(&mut self) -> Option<(NetworkStatusNotice, JoinHandle<()>)> {
        if !self.network_status {
            self.back_online = true;
            Some((NetworkStatusNotice::NoInternet, self.save_back_online(true)))
        } else if self.back_online {
            self.back_online = false;
            Some((NetworkStatusNotice::BackOnline, self.save_back_online(false)))
        } else {
            None
        }
    }
}
