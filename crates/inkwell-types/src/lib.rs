//! Shared types and constants for the Inkwell blog.
//!
//! This crate holds the article shapes handed to the presentation layer,
//! the insert shapes used by seeding, and the fallback values substituted
//! for missing columns. It has no database or HTTP dependencies so that
//! every other crate in the workspace can depend on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Title substituted when a row has no title.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Slug substituted when a row has no slug.
pub const DEFAULT_SLUG: &str = "untitled";

/// Reduced article projection used by the listing page.
///
/// Carries the slug (for linking) but no body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticle {
    /// Database ID, `0` when the source row had none.
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Canonical ISO-8601 timestamp with millisecond precision, UTC.
    pub publish_date: String,
    /// `None` when the article has no matching author row.
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

/// Complete article projection used by the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullArticle {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Article body as HTML.
    pub content: String,
    /// Canonical ISO-8601 timestamp with millisecond precision, UTC.
    pub publish_date: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_email: Option<String>,
}

impl FullArticle {
    /// Author display name, or `None` when both name parts are missing.
    pub fn author_name(&self) -> Option<String> {
        display_name(
            self.author_first_name.as_deref(),
            self.author_last_name.as_deref(),
        )
    }
}

impl ListArticle {
    /// Author display name, or `None` when both name parts are missing.
    pub fn author_name(&self) -> Option<String> {
        display_name(
            self.author_first_name.as_deref(),
            self.author_last_name.as_deref(),
        )
    }
}

fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Values for inserting an author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// Values for inserting an article row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub author_id: i32,
    pub publish_date: NaiveDate,
    pub is_published: bool,
}
