use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::SqlitePool;

use super::CacheError;
use crate::models::FoodRecipe;

/// Primary key of the one cached row. Every insert targets it.
pub const RECIPES_ROW_ID: i64 = 0;

/// The cached copy of the last successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipesEntity {
    id: i64,
    pub food_recipe: FoodRecipe,
}

impl RecipesEntity {
    pub fn new(food_recipe: FoodRecipe) -> Self {
        Self {
            id: RECIPES_ROW_ID,
            food_recipe,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

#[derive(sqlx::FromRow)]
struct RecipesRow {
    id: i64,
    food_recipe: String,
}

impl TryFrom<RecipesRow> for RecipesEntity {
    type Error = CacheError;

    fn try_from(row: RecipesRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            food_recipe: serde_json::from_str(&row.food_recipe)?,
        })
    }
}

#[derive(Clone)]
pub struct RecipesRepository {
    pool: SqlitePool,
}

impl RecipesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores the entity, replacing whatever was cached before.
    pub async fn insert_recipes(&self, entity: &RecipesEntity) -> Result<(), CacheError> {
        let json = serde_json::to_string(&entity.food_recipe)?;

        sqlx::query("INSERT OR REPLACE INTO recipes_table (id, food_recipe) VALUES (?, ?)")
            .bind(entity.id)
            .bind(&json)
            .execute(&self.pool)
            .await?;

        tracing::debug!(recipes = entity.food_recipe.results.len(), "Cached recipes");
        Ok(())
    }

    /// Lazily streams the cached rows. Call again to start over.
    pub fn read_recipes(&self) -> BoxStream<'_, Result<RecipesEntity, CacheError>> {
        sqlx::query_as::<_, RecipesRow>("SELECT id, food_recipe FROM recipes_table ORDER BY id")
            .fetch(&self.pool)
            .map(|row| RecipesEntity::try_from(row?))
            .boxed()
    }

    pub async fn read_all(&self) -> Result<Vec<RecipesEntity>, CacheError> {
        self.read_recipes().try_collect().await
    }
}
