use serde::{Deserialize, Serialize};

use super::ingredient::ExtendedIngredient;

/// One recipe record from a `complexSearch` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<i32>,
    #[serde(default)]
    pub aggregate_likes: i32,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub very_healthy: bool,
    #[serde(default)]
    pub cheap: bool,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
}

impl Recipe {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: None,
            summary: None,
            ready_in_minutes: None,
            aggregate_likes: 0,
            vegan: false,
            vegetarian: false,
            gluten_free: false,
            dairy_free: false,
            very_healthy: false,
            cheap: false,
            source_name: None,
            source_url: None,
            extended_ingredients: Vec::new(),
        }
    }

    pub fn with_ready_in_minutes(mut self, minutes: i32) -> Self {
        self.ready_in_minutes = Some(minutes);
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<ExtendedIngredient>) -> Self {
        self.extended_ingredients = ingredients;
        self
    }

    /// Short diet badges shown next to the title.
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.vegan {
            badges.push("vegan");
        }
        if self.vegetarian {
            badges.push("vegetarian");
        }
        if self.gluten_free {
            badges.push("gluten free");
        }
        if self.dairy_free {
            badges.push("dairy free");
        }
        if self.very_healthy {
            badges.push("healthy");
        }
        if self.cheap {
            badges.push("cheap");
        }
        badges
    }
}

/// The payload of a recipe search: an ordered list of recipes.
///
/// A response without a `results` field deserializes to an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoodRecipe {
    #[serde(default)]
    pub results: Vec<Recipe>,
}

impl FoodRecipe {
    pub fn new(results: Vec<Recipe>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
