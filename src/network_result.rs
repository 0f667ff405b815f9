//! Classification of search responses into the state shown to observers.

use crate::models::FoodRecipe;
use crate::remote::RecipesResponse;

/// The three-state wrapper exposed to observers of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResult<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> NetworkResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, NetworkResult::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            NetworkResult::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            NetworkResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Every way a recipe request can fail, with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeErrorKind {
    #[error("No Internet")]
    NoInternet,

    #[error("TimeOut")]
    Timeout,

    #[error("API Key Limited")]
    QuotaExceeded,

    #[error("Not authorized")]
    Unauthorized,

    #[error("Recipes Not Found")]
    NotFound,

    #[error("No Recipes Found")]
    TransportFailure,

    #[error("{0}")]
    GenericServerError(String),
}

impl<T> From<RecipeErrorKind> for NetworkResult<T> {
    fn from(kind: RecipeErrorKind) -> Self {
        NetworkResult::Error(kind.to_string())
    }
}

/// Classifies a search response.
///
/// Checks run in a fixed order: timeout, quota, authorization, empty
/// results, success, and finally the raw status message.
pub fn handle_food_recipes_response(response: RecipesResponse) -> NetworkResult<FoodRecipe> {
    classify(response).unwrap_or_else(NetworkResult::from)
}

fn classify(response: RecipesResponse) -> Result<NetworkResult<FoodRecipe>, RecipeErrorKind> {
    if response.message.contains("timeout") {
        return Err(RecipeErrorKind::Timeout);
    }
    if response.status == 402 {
        return Err(RecipeErrorKind::QuotaExceeded);
    }
    if response.status == 401 {
        return Err(RecipeErrorKind::Unauthorized);
    }
    if response.body.as_ref().is_some_and(FoodRecipe::is_empty) {
        return Err(RecipeErrorKind::NotFound);
    }

    let successful = response.is_successful();
    match response.body {
        Some(food_recipe) if successful => Ok(NetworkResult::Success(food_recipe)),
        // 2xx with nothing to show
        None if successful => Err(RecipeErrorKind::NotFound),
        _ => Err(RecipeErrorKind::GenericServerError(response.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;

    fn payload() -> FoodRecipe {
        FoodRecipe::new(vec![Recipe::new(1, "Pad Thai"), Recipe::new(2, "Ramen")])
    }

    #[test]
    fn test_timeout_wins_over_everything() {
        let cases = [
            RecipesResponse::new(200, "timeout", Some(payload())),
            RecipesResponse::new(402, "connection timeout", None),
            RecipesResponse::new(401, "read timeout", Some(FoodRecipe::default())),
        ];
        for response in cases {
            assert_eq!(
                handle_food_recipes_response(response),
                NetworkResult::Error("TimeOut".to_string())
            );
        }
    }

    #[test]
    fn test_capitalized_timeout_reason_uses_status_message() {
        let cases = [
            (504, "Gateway Timeout"),
            (408, "Request Timeout"),
        ];
        for (status, reason) in cases {
            let response = RecipesResponse::new(status, reason, None);
            assert_eq!(
                handle_food_recipes_response(response),
                NetworkResult::Error(reason.to_string())
            );
        }
    }

    #[test]
    fn test_quota_exceeded_even_with_body() {
        let response = RecipesResponse::new(402, "Payment Required", Some(payload()));
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Error("API Key Limited".to_string())
        );
    }

    #[test]
    fn test_unauthorized() {
        let response = RecipesResponse::new(401, "Unauthorized", None);
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Error("Not authorized".to_string())
        );
    }

    #[test]
    fn test_empty_results_not_found() {
        let response = RecipesResponse::new(200, "OK", Some(FoodRecipe::default()));
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Error("Recipes Not Found".to_string())
        );
    }

    #[test]
    fn test_success_passes_payload_through() {
        let response = RecipesResponse::new(200, "OK", Some(payload()));
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Success(payload())
        );
    }

    #[test]
    fn test_success_without_body_is_not_found() {
        let response = RecipesResponse::new(204, "No Content", None);
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Error("Recipes Not Found".to_string())
        );
    }

    #[test]
    fn test_other_errors_use_status_message() {
        let response = RecipesResponse::new(500, "Internal Server Error", None);
        assert_eq!(
            handle_food_recipes_response(response),
            NetworkResult::Error("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_error_kind_messages() {
        assert_eq!(RecipeErrorKind::NoInternet.to_string(), "No Internet");
        assert_eq!(
            RecipeErrorKind::TransportFailure.to_string(),
            "No Recipes Found"
        );
        assert_eq!(
            RecipeErrorKind::GenericServerError("Bad Gateway".into()).to_string(),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_accessors() {
        let loading: NetworkResult<FoodRecipe> = NetworkResult::Loading;
        assert!(loading.is_loading());
        assert!(loading.data().is_none());

        let error: NetworkResult<FoodRecipe> = RecipeErrorKind::NotFound.into();
        assert_eq!(error.message(), Some("Recipes Not Found"));
    }
}
