//! Projections, defaults and validation shared by both read paths.
//!
//! The column lists, the article/author join and the published filter are
//! written once here and spliced into the queries with `concat!`, so the
//! list and detail paths cannot drift apart.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use inkwell_types::{FullArticle, ListArticle, DEFAULT_SLUG, DEFAULT_TITLE};
use serde::Serialize;

use crate::error::ArticleError;

macro_rules! base_columns {
    () => {
        "a.id, a.title, a.description, \
         to_char(a.publish_date, 'YYYY-MM-DD') AS publish_date, \
         au.first_name AS author_first_name, au.last_name AS author_last_name"
    };
}

macro_rules! list_columns {
    () => {
        concat!(base_columns!(), ", a.slug")
    };
}

macro_rules! full_columns {
    () => {
        concat!(base_columns!(), ", a.content, au.email AS author_email")
    };
}

macro_rules! article_author_join {
    () => {
        "FROM articles a LEFT JOIN authors au ON a.author_id = au.id"
    };
}

macro_rules! published_filter {
    () => {
        "a.is_published = true"
    };
}

/// Columns projected for the listing page.
pub const LIST_ARTICLE_COLUMNS: &str = list_columns!();

/// Columns projected for the detail page.
pub const FULL_ARTICLE_COLUMNS: &str = full_columns!();

/// Join from each article to its (possibly missing) author.
pub const ARTICLE_AUTHOR_JOIN: &str = article_author_join!();

/// All published articles, newest first; equal dates fall back to `id`.
pub const LIST_PUBLISHED_SQL: &str = concat!(
    "SELECT ",
    list_columns!(),
    " ",
    article_author_join!(),
    " WHERE ",
    published_filter!(),
    " ORDER BY a.publish_date DESC, a.id ASC"
);

/// One published article by slug (`$1`).
pub const PUBLISHED_BY_SLUG_SQL: &str = concat!(
    "SELECT ",
    full_columns!(),
    " ",
    article_author_join!(),
    " WHERE a.slug = $1 AND ",
    published_filter!(),
    " LIMIT 1"
);

/// Raw list-shape row as returned by the database, before defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListArticleRow {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub publish_date: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

/// Raw full-shape row as returned by the database, before defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FullArticleRow {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub publish_date: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_email: Option<String>,
}

/// Fields every article row must carry to be shown on its own.
pub trait ArticleRecord: Serialize {
    fn id(&self) -> Option<i32>;
    fn title(&self) -> Option<&str>;
    fn publish_date(&self) -> Option<&str>;
}

impl ArticleRecord for ListArticleRow {
    fn id(&self) -> Option<i32> {
        self.id
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn publish_date(&self) -> Option<&str> {
        self.publish_date.as_deref()
    }
}

impl ArticleRecord for FullArticleRow {
    fn id(&self) -> Option<i32> {
        self.id
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn publish_date(&self) -> Option<&str> {
        self.publish_date.as_deref()
    }
}

/// Converts a publish date to ISO-8601 with millisecond precision in UTC.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC), PostgreSQL
/// `timestamptz` text, and bare `YYYY-MM-DD` dates (UTC midnight).
///
/// # Errors
///
/// Returns `ArticleError::InvalidDate` if no format matches.
pub fn normalize_date(value: &str) -> Result<String, ArticleError> {
    let value = value.trim();

    let instant = if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        dt.with_timezone(&Utc)
    } else if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        dt.with_timezone(&Utc)
    } else if let Some(naive) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        naive.and_utc()
    } else if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| ArticleError::InvalidDate(value.to_string()))?
            .and_utc()
    } else {
        return Err(ArticleError::InvalidDate(value.to_string()));
    };

    Ok(format_instant(instant))
}

/// The current instant in canonical form.
pub fn now_iso() -> String {
    format_instant(Utc::now())
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Treats an empty string the same as a missing value.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn publish_date_or_now(value: Option<String>) -> String {
    match present(value) {
        Some(raw) => normalize_date(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unparseable publish date, using current time");
            now_iso()
        }),
        None => now_iso(),
    }
}

/// Fills missing list-shape fields with fixed defaults.
///
/// id → `0`, title → `"Untitled"`, slug → `"untitled"`, description → `""`,
/// publish date → now. Author names stay `None`.
pub fn apply_list_article_defaults(row: ListArticleRow) -> ListArticle {
    ListArticle {
        id: row.id.unwrap_or(0),
        title: present(row.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        slug: present(row.slug).unwrap_or_else(|| DEFAULT_SLUG.to_string()),
        description: row.description.unwrap_or_default(),
        publish_date: publish_date_or_now(row.publish_date),
        author_first_name: row.author_first_name,
        author_last_name: row.author_last_name,
    }
}

/// Fills missing full-shape fields with fixed defaults.
///
/// Same rules as [`apply_list_article_defaults`]; content → `""`, author
/// email stays `None`.
pub fn apply_full_article_defaults(row: FullArticleRow) -> FullArticle {
    FullArticle {
        id: row.id.unwrap_or(0),
        title: present(row.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: row.description.unwrap_or_default(),
        content: row.content.unwrap_or_default(),
        publish_date: publish_date_or_now(row.publish_date),
        author_first_name: row.author_first_name,
        author_last_name: row.author_last_name,
        author_email: row.author_email,
    }
}

fn record_json<R: Serialize>(row: &R) -> String {
    serde_json::to_string(row).unwrap_or_else(|_| "<unserializable>".to_string())
}

/// Rejects a row whose id, title or publish date is unset, empty or zero.
///
/// # Errors
///
/// Returns `ArticleError::InvalidRecord` carrying `context` and the row.
pub fn validate_article_fields<R: ArticleRecord>(row: &R, context: &str) -> Result<(), ArticleError> {
    let missing_id = row.id().map_or(true, |id| id == 0);
    let missing_title = row.title().map_or(true, str::is_empty);
    let missing_date = row.publish_date().map_or(true, str::is_empty);

    if missing_id || missing_title || missing_date {
        return Err(ArticleError::InvalidRecord {
            context: context.to_string(),
            record: record_json(row),
        });
    }
    Ok(())
}

/// [`validate_article_fields`] plus a non-empty body.
///
/// # Errors
///
/// Returns `ArticleError::InvalidRecord` or `ArticleError::MissingContent`.
pub fn validate_full_article_fields(row: &FullArticleRow, context: &str) -> Result<(), ArticleError> {
    validate_article_fields(row, context)?;
    if row.content.as_deref().map_or(true, str::is_empty) {
        return Err(ArticleError::MissingContent {
            context: context.to_string(),
            record: record_json(row),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_date() {
        assert_eq!(
            normalize_date("2025-01-01").unwrap(),
            "2025-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn normalize_keeps_canonical_values() {
        for value in ["2025-12-31T23:59:59.999Z", "2025-06-15T12:30:00.000Z"] {
            assert_eq!(normalize_date(value).unwrap(), value);
        }
    }

    #[test]
    fn normalize_converts_offsets_to_utc() {
        assert_eq!(
            normalize_date("2025-03-01T02:00:00+02:00").unwrap(),
            "2025-03-01T00:00:00.000Z"
        );
        assert_eq!(
            normalize_date("2025-03-01 02:00:00+02").unwrap(),
            "2025-03-01T00:00:00.000Z"
        );
    }

    #[test]
    fn normalize_reads_naive_datetimes_as_utc() {
        assert_eq!(
            normalize_date("2025-03-01 08:15:30.5").unwrap(),
            "2025-03-01T08:15:30.500Z"
        );
        assert_eq!(
            normalize_date("2025-03-01T08:15:30").unwrap(),
            "2025-03-01T08:15:30.000Z"
        );
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(matches!(
            normalize_date("not a date"),
            Err(ArticleError::InvalidDate(_))
        ));
        assert!(normalize_date("2025-02-30").is_err());
    }

    #[test]
    fn list_sql_joins_filters_and_orders() {
        assert!(LIST_PUBLISHED_SQL.contains(ARTICLE_AUTHOR_JOIN));
        assert!(LIST_PUBLISHED_SQL.contains(LIST_ARTICLE_COLUMNS));
        assert!(LIST_PUBLISHED_SQL.contains("a.is_published = true"));
        assert!(LIST_PUBLISHED_SQL.ends_with("ORDER BY a.publish_date DESC, a.id ASC"));
        assert!(!LIST_ARTICLE_COLUMNS.contains("content"));
    }

    #[test]
    fn detail_sql_filters_by_slug_with_limit() {
        assert!(PUBLISHED_BY_SLUG_SQL.contains(ARTICLE_AUTHOR_JOIN));
        assert!(PUBLISHED_BY_SLUG_SQL.contains(FULL_ARTICLE_COLUMNS));
        assert!(PUBLISHED_BY_SLUG_SQL.contains("a.slug = $1 AND a.is_published = true"));
        assert!(PUBLISHED_BY_SLUG_SQL.ends_with("LIMIT 1"));
        assert!(FULL_ARTICLE_COLUMNS.contains("au.email AS author_email"));
        assert!(!FULL_ARTICLE_COLUMNS.contains("a.slug"));
    }

    #[test]
    fn validation_error_carries_row() {
        let row = ListArticleRow {
            id: Some(3),
            title: Some("Kept".to_string()),
            ..ListArticleRow::default()
        };
        let err = validate_article_fields(&row, "listing").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid listing record: "), "got {msg}");
        assert!(msg.contains("\"title\":\"Kept\""));
        assert!(msg.contains("\"publishDate\":null"));
    }

    #[test]
    fn zero_id_fails_validation() {
        let row = ListArticleRow {
            id: Some(0),
            title: Some("t".to_string()),
            publish_date: Some("2025-01-01".to_string()),
            ..ListArticleRow::default()
        };
        assert!(validate_article_fields(&row, "article").is_err());
    }

    #[test]
    fn full_validation_requires_content() {
        let row = FullArticleRow {
            id: Some(1),
            title: Some("t".to_string()),
            publish_date: Some("2025-01-01".to_string()),
            content: Some(String::new()),
            ..FullArticleRow::default()
        };
        let err = validate_full_article_fields(&row, "article").unwrap_err();
        assert!(matches!(err, ArticleError::MissingContent { .. }));
        assert!(err.to_string().contains("missing content"));
    }

    #[test]
    fn full_defaults_leave_author_fields_unset() {
        let article = apply_full_article_defaults(FullArticleRow::default());
        assert_eq!(article.id, 0);
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.content, "");
        assert_eq!(article.author_email, None);
        assert_eq!(article.author_first_name, None);
    }

    #[test]
    fn empty_required_strings_take_defaults() {
        let article = apply_list_article_defaults(ListArticleRow {
            title: Some(String::new()),
            slug: Some(String::new()),
            description: Some(String::new()),
            ..ListArticleRow::default()
        });
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.slug, "untitled");
        assert_eq!(article.description, "");
    }
}
