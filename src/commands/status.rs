use clap::Args;
use std::sync::Arc;

use super::PROBE_TIMEOUT;
use tastybites::{
    init_db, Config, Connectivity, ConnectivityProbe, DataStoreRepository, RecipesRepository,
    RecipesViewModel, TcpProbe,
};

/// Check connectivity, announce coming back online and summarize local state
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Behave as if offline
    #[arg(long)]
    offline: bool,
}

impl StatusCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let connectivity = if self.offline {
            Connectivity::Fixed(false)
        } else {
            Connectivity::Probe(TcpProbe::for_base_url(
                &config.base_url.value,
                PROBE_TIMEOUT,
            ))
        };

        let data_store = Arc::new(DataStoreRepository::open(&config.data_dir.value).await?);
        let mut view_model = RecipesViewModel::from_config(Arc::clone(&data_store), config);
        view_model.network_status = connectivity.is_internet_connected().await;

        println!("Server:  {}", config.base_url.value);
        println!(
            "Network: {}",
            if view_model.network_status {
                "✓ connected"
            } else {
                "✗ unreachable"
            }
        );

        if let Some((notice, write)) = view_model.show_network_status() {
            println!("         {}", notice);
            write.await?;
        }

        let pool = init_db(&config.database_path.value).await?;
        let cached = RecipesRepository::new(pool).read_all().await?;
        let cached_count = cached
            .first()
            .map(|entity| entity.food_recipe.results.len())
            .unwrap_or(0);
        println!("Cache:   {} recipe(s)", cached_count);

        let selection = data_store.current_meal_and_diet_type();
        println!(
            "Prefs:   {} / {}",
            selection.selected_meal_type, selection.selected_diet_type
        );

        Ok(())
    }
}
