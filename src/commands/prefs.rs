use clap::{Args, Subcommand};
use std::sync::Arc;

use super::OutputFormat;
use tastybites::{Config, DataStoreRepository, DietType, MealAndDietType, MealType, RecipesViewModel};

#[derive(Args)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub command: PrefsSubcommand,
}

#[derive(Subcommand)]
pub enum PrefsSubcommand {
    /// Show the saved meal and diet type
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change the saved meal and/or diet type
    Set {
        /// Meal type (e.g. "main course", dessert, soup)
        #[arg(long)]
        meal_type: Option<MealType>,

        /// Diet type (e.g. "gluten free", vegan, paleo)
        #[arg(long)]
        diet_type: Option<DietType>,
    },
}

impl PrefsCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let data_store = Arc::new(DataStoreRepository::open(&config.data_dir.value).await?);

        match &self.command {
            PrefsSubcommand::Show { format } => {
                let selection = data_store.current_meal_and_diet_type();
                match format {
                    OutputFormat::Json => {
                        let value = serde_json::json!({
                            "selectedMealType": selection.selected_meal_type,
                            "selectedMealTypeId": selection.selected_meal_type_id,
                            "selectedDietType": selection.selected_diet_type,
                            "selectedDietTypeId": selection.selected_diet_type_id,
                            "backOnline": data_store.current_back_online(),
                        });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    }
                    OutputFormat::Text => {
                        println!("Meal type:   {}", selection.selected_meal_type);
                        println!("Diet type:   {}", selection.selected_diet_type);
                        println!(
                            "Back online: {}",
                            if data_store.current_back_online() {
                                "pending"
                            } else {
                                "no"
                            }
                        );
                    }
                }
                Ok(())
            }

            PrefsSubcommand::Set {
                meal_type,
                diet_type,
            } => {
                if meal_type.is_none() && diet_type.is_none() {
                    return Err("Nothing to change: pass --meal-type and/or --diet-type".into());
                }

                let mut selection = data_store.current_meal_and_diet_type();
                apply_selection(&mut selection, *meal_type, *diet_type);

                let view_model = RecipesViewModel::from_config(Arc::clone(&data_store), config);
                view_model.save_meal_and_diet_type(selection.clone()).await?;

                println!(
                    "Saved meal type '{}' and diet type '{}'",
                    selection.selected_meal_type, selection.selected_diet_type
                );
                Ok(())
            }
        }
    }
}

fn apply_selection(
    selection: &mut MealAndDietType,
    meal_type: Option<MealType>,
    diet_type: Option<DietType>,
) {
    if let Some(meal_type) = meal_type {
        selection.selected_meal_type = meal_type.to_string();
        selection.selected_meal_type_id = meal_type.id();
    }
    if let Some(diet_type) = diet_type {
        selection.selected_diet_type = diet_type.to_string();
        selection.selected_diet_type_id = diet_type.id();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_selection_keeps_unset_fields() {
        let mut selection = MealAndDietType::new(MealType::Soup, DietType::Vegan);
        apply_selection(&mut selection, Some(MealType::Salad), None);

        assert_eq!(selection.selected_meal_type, "salad");
        assert_eq!(selection.selected_meal_type_id, MealType::Salad.id());
        assert_eq!(selection.selected_diet_type, "vegan");
        assert_eq!(selection.selected_diet_type_id, DietType::Vegan.id());
    }
}
