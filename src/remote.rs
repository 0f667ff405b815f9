//! HTTP access to the recipe search API.
//!
//! [`RemoteDataSource`] issues one `GET /recipes/complexSearch` per call and
//! hands back the status line together with the decoded body. It never
//! retries and never interprets the status; that is the job of
//! [`handle_food_recipes_response`](crate::network_result::handle_food_recipes_response).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::Config;
use crate::models::FoodRecipe;

/// Path of the search endpoint, relative to the configured base URL.
pub const COMPLEX_SEARCH_PATH: &str = "/recipes/complexSearch";

// Query parameter names understood by the search endpoint
pub const QUERY_SEARCH: &str = "query";
pub const QUERY_NUMBER: &str = "number";
pub const QUERY_API_KEY: &str = "apiKey";
pub const QUERY_TYPE: &str = "type";
pub const QUERY_DIET: &str = "diet";
pub const QUERY_ADD_RECIPE_INFORMATION: &str = "addRecipeInformation";
pub const QUERY_FILL_INGREDIENTS: &str = "fillIngredients";

/// Query parameters for one search, keyed by parameter name.
pub type Queries = BTreeMap<String, String>;

/// Errors that prevent a response from being produced at all.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode recipes response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The raw outcome of a search request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipesResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP reason phrase (e.g. "Payment Required")
    pub message: String,
    /// Decoded body; only present for 2xx responses with content
    pub body: Option<FoodRecipe>,
}

impl RecipesResponse {
    pub fn new(status: u16, message: impl Into<String>, body: Option<FoodRecipe>) -> Self {
        Self {
            status,
            message: message.into(),
            body,
        }
    }

    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for the recipe search endpoint.
#[derive(Clone, Debug)]
pub struct RemoteDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteDataSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.value.clone(),
            Duration::from_secs(config.request_timeout_secs.value),
        )
    }

    /// Full URL of the search endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            COMPLEX_SEARCH_PATH
        )
    }

    /// Performs the search.
    ///
    /// Non-2xx responses are returned as `Ok` with no body. Only transport
    /// failures and undecodable 2xx bodies produce an `Err`.
    pub async fn get_recipes(&self, queries: &Queries) -> Result<RecipesResponse, FetchError> {
        let url = self.endpoint();
        tracing::debug!(url = %url, params = queries.len(), "Requesting recipes");

        let response = self.client.get(&url).query(queries).send().await?;

        let status = response.status();
        // reqwest does not expose the reason phrase the server sent
        let message = status.canonical_reason().unwrap_or_default().to_string();

        let body = if status.is_success() {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                None
            } else {
                Some(serde_json::from_slice::<FoodRecipe>(&bytes)?)
            }
        } else {
            None
        };

        tracing::debug!(status = status.as_u16(), "Recipes request finished");

        Ok(RecipesResponse {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: &str) -> RemoteDataSource {
        RemoteDataSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let remote = source("https://api.spoonacular.com/");
        assert_eq!(
            remote.endpoint(),
            "https://api.spoonacular.com/recipes/complexSearch"
        );
    }

    #[test]
    fn test_is_successful() {
        assert!(RecipesResponse::new(200, "OK", None).is_successful());
        assert!(RecipesResponse::new(204, "No Content", None).is_successful());
        assert!(!RecipesResponse::new(402, "Payment Required", None).is_successful());
        assert!(!RecipesResponse::new(500, "Internal Server Error", None).is_successful());
    }

    #[tokio::test]
    async fn test_get_recipes_sends_queries_and_decodes_body() {
        let app = Router::new().route(
            "/recipes/complexSearch",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let title = format!(
                    "{} / {}",
                    params.get("type").cloned().unwrap_or_default(),
                    params.get("diet").cloned().unwrap_or_default()
                );
                Json(FoodRecipe::new(vec![Recipe::new(1, title)]))
            }),
        );
        let base_url = serve(app).await;

        let mut queries = Queries::new();
        queries.insert(QUERY_TYPE.to_string(), "main course".to_string());
        queries.insert(QUERY_DIET.to_string(), "gluten free".to_string());

        let response = source(&base_url).get_recipes(&queries).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.message, "OK");
        let body = response.body.unwrap();
        assert_eq!(body.results[0].title, "main course / gluten free");
    }

    #[tokio::test]
    async fn test_error_status_has_no_body() {
        let app = Router::new().route(
            "/recipes/complexSearch",
            get(|| async { (StatusCode::PAYMENT_REQUIRED, "quota exhausted") }),
        );
        let base_url = serve(app).await;

        let response = source(&base_url).get_recipes(&Queries::new()).await.unwrap();
        assert_eq!(response.status, 402);
        assert_eq!(response.message, "Payment Required");
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_error() {
        let app = Router::new().route("/recipes/complexSearch", get(|| async { "not json" }));
        let base_url = serve(app).await;

        let result = source(&base_url).get_recipes(&Queries::new()).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = source(&format!("http://{}", addr))
            .get_recipes(&Queries::new())
            .await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
