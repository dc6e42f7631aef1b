//! Article read paths for the Inkwell blog.
//!
//! Two queries compose over the `authors`/`articles` schema:
//!
//! | Query | Shape | On failure |
//! |-------|-------|------------|
//! | [`get_published_articles`] | `Vec<ListArticle>`, newest first | empty list |
//! | [`lookup_article_by_slug`] | [`ArticleLookup`] | `NotFound` / `Invalid` / `Unavailable` |
//!
//! Both go through an injected [`ArticleSource`], so the server passes a
//! pool-backed [`PgArticleSource`] and tests pass an in-memory fake. Raw
//! rows pass through the shared helpers in [`fields`], which fill in
//! defaults for missing columns and canonicalize publish dates.
//!
//! Neither query returns an error to its caller. Failures are logged and
//! collapse to an empty list or an absent article; the tagged
//! [`ArticleLookup`] keeps the failure category for callers that want it.

mod error;
pub mod fields;
mod queries;
mod source;

pub use error::{ArticleError, SourceError};
pub use fields::{FullArticleRow, ListArticleRow};
pub use queries::{get_article_by_slug, get_published_articles, lookup_article_by_slug, ArticleLookup};
pub use source::{ArticleSource, PgArticleSource};
