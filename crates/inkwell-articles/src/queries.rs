//! The list and detail read paths.

use inkwell_types::{FullArticle, ListArticle};

use crate::fields::{
    apply_full_article_defaults, apply_list_article_defaults, normalize_date,
    validate_full_article_fields,
};
use crate::source::ArticleSource;

/// Outcome of a detail lookup.
///
/// Pages treat every variant except `Found` as a 404; the JSON API and
/// logs use the variant to tell a missing article from a broken database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleLookup {
    /// Exactly one valid published article matched.
    Found(FullArticle),
    /// No published article has this slug.
    NotFound,
    /// A row matched but is missing required fields or has a bad date.
    Invalid,
    /// The data source failed.
    Unavailable,
}

impl ArticleLookup {
    /// Collapses the lookup to the article, if one was found.
    pub fn into_option(self) -> Option<FullArticle> {
        match self {
            Self::Found(article) => Some(article),
            Self::NotFound | Self::Invalid | Self::Unavailable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Fetches all published articles, newest first.
///
/// Rows with missing fields are kept and filled with defaults. If the
/// source fails for any reason the error is logged and an empty list is
/// returned.
pub async fn get_published_articles<S>(source: &S) -> Vec<ListArticle>
where
    S: ArticleSource + ?Sized,
{
    match source.published_articles().await {
        Ok(rows) => {
            tracing::debug!(count = rows.len(), "fetched published articles");
            rows.into_iter().map(apply_list_article_defaults).collect()
        }
        Err(e) => {
            tracing::error!(error = %e, "error fetching published articles");
            Vec::new()
        }
    }
}

/// Looks up one published article by slug.
///
/// The slug is used verbatim, including the empty string. The first
/// returned row must pass full validation (id, title, content and publish
/// date present, date parseable) to count as `Found`.
pub async fn lookup_article_by_slug<S>(source: &S, slug: &str) -> ArticleLookup
where
    S: ArticleSource + ?Sized,
{
    let rows = match source.published_article_by_slug(slug).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(slug, error = %e, "error fetching article by slug");
            return ArticleLookup::Unavailable;
        }
    };

    let Some(row) = rows.into_iter().next() else {
        tracing::debug!(slug, "no published article for slug");
        return ArticleLookup::NotFound;
    };

    let context = format!("article for slug \"{slug}\"");
    if let Err(e) = validate_full_article_fields(&row, &context) {
        tracing::error!(slug, error = %e, "rejecting invalid article record");
        return ArticleLookup::Invalid;
    }

    if let Some(Err(e)) = row.publish_date.as_deref().map(normalize_date) {
        tracing::error!(slug, error = %e, "rejecting article with unparseable publish date");
        return ArticleLookup::Invalid;
    }

    ArticleLookup::Found(apply_full_article_defaults(row))
}

/// Looks up one published article by slug, collapsing every failure to
/// `None`.
///
/// Callers cannot distinguish a missing article from a database error or a
/// corrupt row; use [`lookup_article_by_slug`] for that.
pub async fn get_article_by_slug<S>(source: &S, slug: &str) -> Option<FullArticle>
where
    S: ArticleSource + ?Sized,
{
    lookup_article_by_slug(source, slug).await.into_option()
}
