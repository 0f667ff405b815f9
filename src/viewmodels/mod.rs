//! Orchestration of preferences, connectivity, the remote API and the cache.

mod main_view_model;
mod recipes_view_model;

pub use main_view_model::MainViewModel;
pub use recipes_view_model::{NetworkStatusNotice, RecipesViewModel};
