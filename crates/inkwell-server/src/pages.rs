//! Server-rendered HTML pages.

use askama::Template;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::DateTime;
use inkwell_articles::{get_published_articles, lookup_article_by_slug, ArticleLookup};
use inkwell_types::{FullArticle, ListArticle};
use std::sync::Arc;

use crate::seo::PageMeta;
use crate::AppState;

const UNKNOWN_AUTHOR: &str = "Unknown";
const UNKNOWN_DATE: &str = "Unknown date";
const NO_DESCRIPTION: &str = "No description available.";

/// One card on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub date_label: String,
    pub description: String,
}

impl From<&ListArticle> for ArticleCard {
    fn from(article: &ListArticle) -> Self {
        let description = if article.description.trim().is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            article.description.clone()
        };
        Self {
            id: article.id,
            slug: article.slug.clone(),
            title: article.title.clone(),
            author: article
                .author_name()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            publish_date: article.publish_date.clone(),
            date_label: date_label(&article.publish_date),
            description,
        }
    }
}

/// Formats an ISO-8601 timestamp as e.g. `Mar 5, 2024`.
pub fn date_label(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| UNKNOWN_DATE.to_string())
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    meta: PageMeta,
}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogTemplate {
    meta: PageMeta,
    cards: Vec<ArticleCard>,
}

#[derive(Template)]
#[template(path = "article.html")]
struct ArticleTemplate {
    meta: PageMeta,
    article: FullArticle,
    author: String,
    date_label: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    meta: PageMeta,
    heading: &'static str,
    message: &'static str,
}

fn render<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page template");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

fn not_found(meta: PageMeta, heading: &'static str, message: &'static str) -> Response {
    render(
        &NotFoundTemplate {
            meta,
            heading,
            message,
        },
        StatusCode::NOT_FOUND,
    )
}

/// Handler for `GET /`.
pub async fn home_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    render(
        &HomeTemplate {
            meta: PageMeta::home(&state.site),
        },
        StatusCode::OK,
    )
}

/// Handler for `GET /blog`.
///
/// An empty listing, including one caused by a database failure, is a 404.
pub async fn blog_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let articles = get_published_articles(state.articles.as_ref()).await;
    if articles.is_empty() {
        return not_found(
            PageMeta::not_found(&state.site),
            "No articles yet",
            "There are no published articles to show right now.",
        );
    }

    let cards = articles.iter().map(ArticleCard::from).collect();
    render(
        &BlogTemplate {
            meta: PageMeta::blog_list(&state.site),
            cards,
        },
        StatusCode::OK,
    )
}

/// Handler for `GET /blog/{slug}`.
pub async fn article_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match lookup_article_by_slug(state.articles.as_ref(), &slug).await {
        ArticleLookup::Found(article) => {
            let author = article
                .author_name()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
            let date_label = date_label(&article.publish_date);
            render(
                &ArticleTemplate {
                    meta: PageMeta::article(&state.site, &slug, &article),
                    article,
                    author,
                    date_label,
                },
                StatusCode::OK,
            )
        }
        ArticleLookup::NotFound | ArticleLookup::Invalid | ArticleLookup::Unavailable => {
            not_found(
                PageMeta::article_not_found(&state.site),
                "Article Not Found",
                "The article you are looking for does not exist or is no longer published.",
            )
        }
    }
}

/// Fallback for unknown routes.
pub async fn fallback_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    not_found(
        PageMeta::not_found(&state.site),
        "Page Not Found",
        "There is nothing at this address.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_article() -> ListArticle {
        ListArticle {
            id: 3,
            title: "Mindful Living".to_string(),
            slug: "mindful-living".to_string(),
            description: "Slow down.".to_string(),
            publish_date: "2024-03-05T00:00:00.000Z".to_string(),
            author_first_name: Some("Ada".to_string()),
            author_last_name: Some("Lovelace".to_string()),
        }
    }

    #[test]
    fn card_copies_article_fields() {
        let card = ArticleCard::from(&list_article());
        assert_eq!(card.slug, "mindful-living");
        assert_eq!(card.author, "Ada Lovelace");
        assert_eq!(card.date_label, "Mar 5, 2024");
        assert_eq!(card.description, "Slow down.");
    }

    #[test]
    fn card_fills_display_fallbacks() {
        let article = ListArticle {
            description: String::new(),
            publish_date: "not a date".to_string(),
            author_first_name: None,
            author_last_name: None,
            ..list_article()
        };
        let card = ArticleCard::from(&article);
        assert_eq!(card.author, "Unknown");
        assert_eq!(card.date_label, "Unknown date");
        assert_eq!(card.description, "No description available.");
    }

    #[test]
    fn date_label_handles_offsets() {
        assert_eq!(date_label("2023-12-31T23:30:00.000Z"), "Dec 31, 2023");
        assert_eq!(date_label(""), "Unknown date");
    }

    #[test]
    fn article_template_keeps_content_html() {
        let article = FullArticle {
            id: 1,
            title: "Fish & Chips".to_string(),
            description: "Crisp.".to_string(),
            content: "<p>Hello <em>world</em></p>".to_string(),
            publish_date: "2024-03-05T00:00:00.000Z".to_string(),
            author_first_name: Some("Ada".to_string()),
            author_last_name: None,
            author_email: None,
        };
        let site = crate::config::SiteConfig::default();
        let html = ArticleTemplate {
            meta: PageMeta::article(&site, "fish-and-chips", &article),
            author: "Ada".to_string(),
            date_label: date_label(&article.publish_date),
            article,
        }
        .render()
        .unwrap();

        assert!(html.contains("<p>Hello <em>world</em></p>"));
        assert!(html.contains("<h1>Fish &#38; Chips</h1>"));
        assert!(!html.contains("Fish & Chips"));
        assert!(html.contains("Mar 5, 2024"));
    }
}
