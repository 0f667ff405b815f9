use clap::{Args, Subcommand};
use futures::TryStreamExt;
use std::sync::Arc;

use super::{OutputFormat, PROBE_TIMEOUT};
use tastybites::{
    init_db, Config, Connectivity, ConnectivityProbe, DataStoreRepository, FoodRecipe,
    MainViewModel, NetworkResult, RecipesEntity, RecipesRepository, RecipesViewModel,
    RemoteDataSource, TcpProbe,
};

#[derive(Args)]
pub struct RecipesCommand {
    #[command(subcommand)]
    pub command: RecipesSubcommand,
}

#[derive(Subcommand)]
pub enum RecipesSubcommand {
    /// Search recipes using the saved meal/diet type or a search term
    Fetch {
        /// Free-text search instead of the saved meal/diet type
        #[arg(long, short)]
        search: Option<String>,

        /// Skip the network and behave as if offline
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the recipes cached by the last successful search
    Cached {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl RecipesCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let pool = init_db(&config.database_path.value).await?;
        let repo = RecipesRepository::new(pool);

        match &self.command {
            RecipesSubcommand::Fetch {
                search,
                offline,
                format,
            } => {
                let connectivity = if *offline {
                    Connectivity::Fixed(false)
                } else {
                    Connectivity::Probe(TcpProbe::for_base_url(
                        &config.base_url.value,
                        PROBE_TIMEOUT,
                    ))
                };

                let data_store = Arc::new(DataStoreRepository::open(&config.data_dir.value).await?);
                let mut recipes_view_model = RecipesViewModel::from_config(data_store, config);

                recipes_view_model.network_status = connectivity.is_internet_connected().await;
                if let Some((notice, write)) = recipes_view_model.show_network_status() {
                    eprintln!("{}", notice);
                    write.await?;
                }

                let queries = match search {
                    Some(text) => recipes_view_model.apply_search_query(text),
                    None => recipes_view_model.apply_queries(),
                };

                let remote = RemoteDataSource::from_config(config)?;
                let main_view_model = MainViewModel::new(remote, repo, connectivity);

                let result = main_view_model.get_recipes(queries).await?;
                main_view_model.wait_for_cache_writes().await;

                match result {
                    NetworkResult::Success(food_recipe) => print_recipes(&food_recipe, format)?,
                    NetworkResult::Error(message) => {
                        eprintln!("{}", message);
                        let cached: Vec<RecipesEntity> =
                            main_view_model.read_recipes().try_collect().await?;
                        match cached.first() {
                            Some(entity) => {
                                eprintln!("Showing cached recipes from the last successful search.");
                                print_recipes(&entity.food_recipe, format)?;
                            }
                            None => return Err(message.into()),
                        }
                    }
                    NetworkResult::Loading => {}
                }
                Ok(())
            }

            RecipesSubcommand::Cached { format } => {
                let cached = repo.read_all().await?;
                match cached.first() {
                    Some(entity) => print_recipes(&entity.food_recipe, format)?,
                    None => println!("No cached recipes"),
                }
                Ok(())
            }
        }
    }
}

fn print_recipes(
    food_recipe: &FoodRecipe,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(food_recipe)?);
        }
        OutputFormat::Text => {
            println!("{:<10}  {:<45}  {:>7}  {:>6}  DIET", "ID", "TITLE", "MINUTES", "LIKES");
            println!("{}", "-".repeat(90));
            for recipe in &food_recipe.results {
                let title = if recipe.title.chars().count() > 45 {
                    let truncated: String = recipe.title.chars().take(42).collect();
                    format!("{}...", truncated)
                } else {
                    recipe.title.clone()
                };
                let minutes = recipe
                    .ready_in_minutes
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10}  {:<45}  {:>7}  {:>6}  {}",
                    recipe.id,
                    title,
                    minutes,
                    recipe.aggregate_likes,
                    recipe.badges().join(", ")
                );
            }
            println!("\nTotal: {} recipe(s)", food_recipe.results.len());
        }
    }
    Ok(())
}
