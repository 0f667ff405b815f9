use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diets accepted by the `diet` search parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietType {
    #[serde(rename = "gluten free")]
    GlutenFree,
    #[serde(rename = "ketogenic")]
    Ketogenic,
    #[serde(rename = "vegetarian")]
    Vegetarian,
    #[serde(rename = "lacto-vegetarian")]
    LactoVegetarian,
    #[serde(rename = "ovo-vegetarian")]
    OvoVegetarian,
    #[serde(rename = "vegan")]
    Vegan,
    #[serde(rename = "pescetarian")]
    Pescetarian,
    #[serde(rename = "paleo")]
    Paleo,
    #[serde(rename = "primal")]
    Primal,
    #[serde(rename = "low fodmap")]
    LowFodmap,
    #[serde(rename = "whole30")]
    Whole30,
}

impl DietType {
    pub const ALL: [DietType; 11] = [
        DietType::GlutenFree,
        DietType::Ketogenic,
        DietType::Vegetarian,
        DietType::LactoVegetarian,
        DietType::OvoVegetarian,
        DietType::Vegan,
        DietType::Pescetarian,
        DietType::Paleo,
        DietType::Primal,
        DietType::LowFodmap,
        DietType::Whole30,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::GlutenFree => "gluten free",
            DietType::Ketogenic => "ketogenic",
            DietType::Vegetarian => "vegetarian",
            DietType::LactoVegetarian => "lacto-vegetarian",
            DietType::OvoVegetarian => "ovo-vegetarian",
            DietType::Vegan => "vegan",
            DietType::Pescetarian => "pescetarian",
            DietType::Paleo => "paleo",
            DietType::Primal => "primal",
            DietType::LowFodmap => "low fodmap",
            DietType::Whole30 => "whole30",
        }
    }

    /// Selection id stored next to the name in preferences.
    pub fn id(&self) -> i32 {
        DietType::ALL
            .iter()
            .position(|t| t == self)
            .map(|i| i as i32)
            .unwrap_or(0)
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let normalized = wanted.replace(['-', '_'], " ");
        DietType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted || t.as_str().replace('-', " ") == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = DietType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Invalid diet type '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}
