//! Error types for the article read paths.

/// A row failed validation or carried an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    /// `id`, `title` or `publishDate` is missing.
    #[error("invalid {context} record: {record}")]
    InvalidRecord {
        /// Label for the read path that rejected the row.
        context: String,
        /// The offending row, serialized as JSON.
        record: String,
    },

    /// The row has no body content.
    #[error("invalid {context} record - missing content: {record}")]
    MissingContent { context: String, record: String },

    /// A publish date could not be parsed.
    #[error("invalid publish date: {0:?}")]
    InvalidDate(String),
}

/// The data source could not produce rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No connection could be obtained.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// The query reached the database and failed there.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::Unavailable(err),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => Self::Malformed(err.to_string()),
            other => Self::Query(other),
        }
    }
}
