//! TastyBites
//!
//! Recipe search client: fetches recipes from the Spoonacular search API,
//! classifies the outcome, caches the last successful result in SQLite and
//! keeps the user's meal/diet selection in a preference file.

pub mod config;
pub mod connectivity;
pub mod db;
pub mod models;
pub mod network_result;
pub mod preferences;
pub mod remote;
pub mod viewmodels;

pub use config::{Config, ConfigError};
pub use connectivity::{Connectivity, ConnectivityProbe, TcpProbe};
pub use db::{init_db, CacheError, RecipesEntity, RecipesRepository};
pub use models::{DietType, ExtendedIngredient, FoodRecipe, MealType, Recipe};
pub use network_result::{handle_food_recipes_response, NetworkResult, RecipeErrorKind};
pub use preferences::{DataStoreRepository, MealAndDietType, PreferencesError};
pub use remote::{FetchError, Queries, RecipesResponse, RemoteDataSource};
pub use viewmodels::{MainViewModel, NetworkStatusNotice, RecipesViewModel};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
