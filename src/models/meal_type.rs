use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dish types accepted by the `type` search parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[serde(rename = "main course")]
    MainCourse,
    #[serde(rename = "side dish")]
    SideDish,
    Dessert,
    Appetizer,
    Salad,
    Bread,
    Breakfast,
    Soup,
    Beverage,
    Sauce,
    Marinade,
    Fingerfood,
    Snack,
    Drink,
}

impl MealType {
    pub const ALL: [MealType; 14] = [
        MealType::MainCourse,
        MealType::SideDish,
        MealType::Dessert,
        MealType::Appetizer,
        MealType::Salad,
        MealType::Bread,
        MealType::Breakfast,
        MealType::Soup,
        MealType::Beverage,
        MealType::Sauce,
        MealType::Marinade,
        MealType::Fingerfood,
        MealType::Snack,
        MealType::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::MainCourse => "main course",
            MealType::SideDish => "side dish",
            MealType::Dessert => "dessert",
            MealType::Appetizer => "appetizer",
            MealType::Salad => "salad",
            MealType::Bread => "bread",
            MealType::Breakfast => "breakfast",
            MealType::Soup => "soup",
            MealType::Beverage => "beverage",
            MealType::Sauce => "sauce",
            MealType::Marinade => "marinade",
            MealType::Fingerfood => "fingerfood",
            MealType::Snack => "snack",
            MealType::Drink => "drink",
        }
    }

    /// Selection id stored next to the name in preferences.
    pub fn id(&self) -> i32 {
        MealType::ALL
            .iter()
            .position(|t| t == self)
            .map(|i| i as i32)
            .unwrap_or(0)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        MealType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = MealType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Invalid meal type '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_display() {
        assert_eq!(format!("{}", MealType::MainCourse), "main course");
        assert_eq!(format!("{}", MealType::Fingerfood), "fingerfood");
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(
            MealType::from_str("main course").unwrap(),
            MealType::MainCourse
        );
        assert_eq!(MealType::from_str("SIDE-DISH").unwrap(), MealType::SideDish);
        assert_eq!(MealType::from_str("Soup").unwrap(), MealType::Soup);
    }

    #[test]
    fn test_meal_type_from_str_invalid() {
        assert!(MealType::from_str("brunch").is_err());
        assert!(MealType::from_str("").is_err());
    }

    #[test]
    fn test_meal_type_ids_follow_list_order() {
        assert_eq!(MealType::MainCourse.id(), 0);
        assert_eq!(MealType::Dessert.id(), 2);
        assert_eq!(MealType::Drink.id(), 13);
    }

    #[test]
    fn test_meal_type_json() {
        let json = serde_json::to_string(&MealType::MainCourse).unwrap();
        assert_eq!(json, "\"main course\"");

        let parsed: MealType = serde_json::from_str("\"dessert\"").unwrap();
        assert_eq!(parsed, MealType::Dessert);
    }
}
