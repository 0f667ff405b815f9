use serde::{Deserialize, Serialize};
use std::fmt;

/// An ingredient line as returned with `fillIngredients=true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    pub consistency: Option<String>,
    pub image: Option<String>,
    pub original: Option<String>,
}

impl ExtendedIngredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            consistency: None,
            image: None,
            original: None,
        }
    }
}

impl fmt::Display for ExtendedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(original) = &self.original {
            return write!(f, "{}", original);
        }
        if self.unit.is_empty() {
            write!(f, "{} {}", self.amount, self.name)
        } else {
            write!(f, "{} {} {}", self.amount, self.unit, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_display() {
        let ingredient = ExtendedIngredient::new("flour", 2.5, "cups");
        assert_eq!(format!("{}", ingredient), "2.5 cups flour");
    }

    #[test]
    fn test_ingredient_display_no_unit() {
        let ingredient = ExtendedIngredient::new("eggs", 3.0, "");
        assert_eq!(format!("{}", ingredient), "3 eggs");
    }

    #[test]
    fn test_ingredient_display_prefers_original_line() {
        let mut ingredient = ExtendedIngredient::new("butter", 1.0, "tbsp");
        ingredient.original = Some("1 tbsp unsalted butter, softened".to_string());
        assert_eq!(format!("{}", ingredient), "1 tbsp unsalted butter, softened");
    }

    #[test]
    fn test_ingredient_from_api_json() {
        let json = r#"{
            "id": 20081,
            "name": "flour",
            "amount": 2.0,
            "unit": "cups",
            "consistency": "SOLID",
            "image": "flour.png",
            "original": "2 cups all-purpose flour"
        }"#;
        let parsed: ExtendedIngredient = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.amount, 2.0);
        assert_eq!(parsed.consistency.as_deref(), Some("SOLID"));
    }
}
