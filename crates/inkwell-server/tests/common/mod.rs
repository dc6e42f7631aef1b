#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use inkwell_articles::{ArticleSource, FullArticleRow, ListArticleRow, SourceError};
use inkwell_server::config::SiteConfig;
use inkwell_server::{app, AppState};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

/// In-memory article source. `None` simulates a pool that cannot hand out
/// connections.
#[derive(Default)]
pub struct FakeSource {
    pub list: Option<Vec<ListArticleRow>>,
    pub detail: Option<Vec<FullArticleRow>>,
}

impl FakeSource {
    pub fn empty() -> Self {
        Self {
            list: Some(Vec::new()),
            detail: Some(Vec::new()),
        }
    }

    pub fn down() -> Self {
        Self::default()
    }

    pub fn with_list(list: Vec<ListArticleRow>) -> Self {
        Self {
            list: Some(list),
            ..Self::empty()
        }
    }

    pub fn with_detail(detail: Vec<FullArticleRow>) -> Self {
        Self {
            detail: Some(detail),
            ..Self::empty()
        }
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn published_articles(&self) -> Result<Vec<ListArticleRow>, SourceError> {
        self.list
            .clone()
            .ok_or(SourceError::Unavailable(sqlx::Error::PoolTimedOut))
    }

    async fn published_article_by_slug(
        &self,
        _slug: &str,
    ) -> Result<Vec<FullArticleRow>, SourceError> {
        self.detail
            .clone()
            .ok_or(SourceError::Unavailable(sqlx::Error::PoolTimedOut))
    }
}

pub fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub fn list_row(id: i32, title: &str, slug: &str, date: &str) -> ListArticleRow {
    ListArticleRow {
        id: Some(id),
        title: s(title),
        slug: s(slug),
        description: s("A short description."),
        publish_date: s(date),
        author_first_name: s("John"),
        author_last_name: s("Doe"),
    }
}

pub fn full_row(id: i32, title: &str) -> FullArticleRow {
    FullArticleRow {
        id: Some(id),
        title: s(title),
        description: s("A short description."),
        content: s("<p>Full article body.</p>"),
        publish_date: s("2024-03-05"),
        author_first_name: s("John"),
        author_last_name: s("Doe"),
        author_email: s("john.doe@example.com"),
    }
}

pub fn test_app(source: FakeSource) -> Router {
    let site = SiteConfig {
        name: "Inkwell".to_string(),
        url: "https://blog.example.com".to_string(),
        ..SiteConfig::default()
    };
    app(AppState::new(Arc::new(source), site))
}

/// Sends a GET request and returns the status and body text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
