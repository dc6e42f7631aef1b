//! JSON read API over published articles.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inkwell_articles::{get_published_articles, lookup_article_by_slug, ArticleLookup};
use inkwell_types::{FullArticle, ListArticle};
use std::sync::Arc;
use thiserror::Error;

use crate::AppState;

/// Errors returned by the JSON API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Handler for `GET /api/articles`.
///
/// Always answers `200`; an unreachable database yields an empty array.
pub async fn list_articles_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<ListArticle>> {
    Json(get_published_articles(state.articles.as_ref()).await)
}

/// Handler for `GET /api/articles/{slug}`.
pub async fn get_article_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<FullArticle>, ApiError> {
    match lookup_article_by_slug(state.articles.as_ref(), &slug).await {
        ArticleLookup::Found(article) => Ok(Json(article)),
        ArticleLookup::NotFound | ArticleLookup::Invalid => {
            Err(ApiError::NotFound(format!("article \"{slug}\" not found")))
        }
        ArticleLookup::Unavailable => Err(ApiError::Unavailable(
            "article store is unavailable".to_string(),
        )),
    }
}
