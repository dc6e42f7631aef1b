//! Data-access seam between the read paths and PostgreSQL.

use async_trait::async_trait;
use inkwell_db::DbPool;

use crate::error::SourceError;
use crate::fields::{FullArticleRow, ListArticleRow, LIST_PUBLISHED_SQL, PUBLISHED_BY_SLUG_SQL};

/// Something that can fetch raw article rows.
///
/// Implementations perform exactly one round trip per call and do not
/// retry. The server uses [`PgArticleSource`]; tests substitute fakes.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// All published articles joined with their authors, ordered by publish
    /// date descending, then by id.
    async fn published_articles(&self) -> Result<Vec<ListArticleRow>, SourceError>;

    /// At most one published article whose slug equals `slug` exactly.
    async fn published_article_by_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<FullArticleRow>, SourceError>;
}

/// [`ArticleSource`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgArticleSource {
    pool: DbPool,
}

impl PgArticleSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ArticleSource for PgArticleSource {
    async fn published_articles(&self) -> Result<Vec<ListArticleRow>, SourceError> {
        let rows = sqlx::query_as::<_, ListArticleRow>(LIST_PUBLISHED_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn published_article_by_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<FullArticleRow>, SourceError> {
        let rows = sqlx::query_as::<_, FullArticleRow>(PUBLISHED_BY_SLUG_SQL)
            .bind(slug)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
