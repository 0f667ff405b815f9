mod diet_type;
mod food_recipe;
mod ingredient;
mod meal_type;

pub use diet_type::DietType;
pub use food_recipe::{FoodRecipe, Recipe};
pub use ingredient::ExtendedIngredient;
pub use meal_type::MealType;
