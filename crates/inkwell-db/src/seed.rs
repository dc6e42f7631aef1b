//! Demo data for a fresh database.
//!
//! [`seed`] wipes both tables and inserts a fixed set of authors and
//! articles inside one transaction, so running it twice leaves the same
//! shape of data behind. Titles are slugified for lookup; every fifth
//! article is left as an unpublished draft.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use inkwell_types::{NewArticle, NewAuthor};
use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

/// Full names of the seeded authors.
pub const SEED_AUTHORS: &[&str] = &[
    "Nedjma Benzekri",
    "Neha Arora",
    "Fibi Dalyop",
    "Maïte Karstanje",
    "Michell Montserrat Mor Andrade",
    "Aanuoluwapo Ayoola Oladeji",
];

/// Titles of the seeded articles.
pub const SEED_ARTICLES: &[&str] = &[
    "Mastering Productivity for Sustainable Success",
    "Ethics and Empathy in Modern Workplaces",
    "Understanding Productivity Rights in the Digital Era",
    "Balancing Technology and Human Potential",
    "Workplace Culture: The Heart of Productivity",
    "Empowering Teams with Purpose and Focus",
    "Atomic Habits and the Science of Change",
    "How to Stay Creative Under Pressure",
    "The Art of Minimalism",
    "The Future of Work and Learning",
];

/// Domain used for generated author emails.
pub const SEED_EMAIL_DOMAIN: &str = "wfdteam.example.com";

/// How far back seeded publish dates may reach.
const PUBLISH_WINDOW_YEARS: u32 = 10;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed lists are empty or would produce conflicting rows.
    #[error("invalid seed data: {0}")]
    InvalidData(String),

    /// The author insert returned no rows.
    #[error("no authors were inserted, aborting article seeding")]
    NoAuthorsInserted,

    /// A database statement failed.
    #[error("seed database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Counts reported after a successful seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub authors: usize,
    pub articles: usize,
    pub drafts: usize,
}

/// Body template picked from keywords in an article title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTemplate {
    Productivity,
    Workplace,
    Technology,
}

impl ContentTemplate {
    pub fn for_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if ["workplace", "culture", "empathy"]
            .iter()
            .any(|k| lower.contains(k))
        {
            Self::Workplace
        } else if ["technology", "digital", "balancing"]
            .iter()
            .any(|k| lower.contains(k))
        {
            Self::Technology
        } else {
            Self::Productivity
        }
    }

    /// Renders the HTML body for `title`.
    pub fn render(self, title: &str) -> String {
        match self {
            Self::Productivity => format!(
                "<p>In this comprehensive exploration of \"{title}\", we delve into the fundamental principles and practical applications that drive success in modern workplaces.</p>\n\
                 <p>The article examines how \"{title}\" intersects with contemporary challenges, offering actionable insights for professionals seeking to enhance their productivity and workplace effectiveness.</p>\n\
                 <p>Through detailed analysis and real-world examples, we demonstrate how implementing these strategies can lead to sustainable improvements in both individual and organizational performance.</p>"
            ),
            Self::Workplace => format!(
                "<p>This article explores \"{title}\" and its profound impact on organizational culture and employee well-being.</p>\n\
                 <p>We examine the key factors that contribute to successful workplace environments and how \"{title}\" can be leveraged to create more inclusive, productive, and fulfilling work experiences.</p>\n\
                 <p>The discussion includes practical strategies, case studies, and expert insights to help organizations implement these principles effectively.</p>"
            ),
            Self::Technology => format!(
                "<p>In \"{title}\", we investigate the intersection of technology and human potential in modern work environments.</p>\n\
                 <p>This exploration covers emerging trends and strategic approaches for leveraging technology to enhance productivity while maintaining human-centric values.</p>\n\
                 <p>We provide actionable guidance for organizations looking to balance technological advancement with sustainable, people-focused workplace practices.</p>"
            ),
        }
    }
}

/// Description template picked from keywords in an article title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionTemplate {
    Default,
    Workplace,
    Technology,
}

impl DescriptionTemplate {
    pub fn for_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("workplace") || lower.contains("culture") {
            Self::Workplace
        } else if lower.contains("technology") || lower.contains("digital") {
            Self::Technology
        } else {
            Self::Default
        }
    }

    pub fn render(self, title: &str) -> String {
        match self {
            Self::Default => format!(
                "A deep dive into \"{title}\", exploring its themes and impact on modern productivity."
            ),
            Self::Workplace => format!(
                "An exploration of \"{title}\" and its role in shaping positive workplace cultures."
            ),
            Self::Technology => format!(
                "Understanding \"{title}\" in the context of technological advancement and human potential."
            ),
        }
    }
}

/// Lowercases `title` and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Splits a full name into first name and the remaining words.
pub fn parse_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Builds `first.last@domain`, lowercased with whitespace removed.
pub fn generate_email(first_name: &str, last_name: &str, domain: &str) -> String {
    let local: String = format!("{first_name}.{last_name}")
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{local}@{domain}")
}

/// Picks a uniformly random instant in `[start, end]`, with `end` clamped
/// to the current time.
pub fn random_date<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let end = end.min(Utc::now());
    if end <= start {
        return end;
    }
    let span_ms = (end - start).num_milliseconds();
    start + Duration::milliseconds(rng.gen_range(0..=span_ms))
}

/// Checks that both lists are non-empty and that no two titles share a slug.
pub fn validate_seed_data(authors: &[&str], articles: &[&str]) -> Result<(), SeedError> {
    if authors.is_empty() {
        return Err(SeedError::InvalidData(
            "seed authors data is empty".to_string(),
        ));
    }
    if articles.is_empty() {
        return Err(SeedError::InvalidData(
            "seed articles data is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for title in articles {
        let slug = slugify(title);
        if !seen.insert(slug.clone()) {
            return Err(SeedError::InvalidData(format!(
                "duplicate article slug '{slug}' from title \"{title}\""
            )));
        }
    }
    Ok(())
}

/// Author rows for `names`.
pub fn build_authors(names: &[&str], domain: &str) -> Vec<NewAuthor> {
    names
        .iter()
        .map(|name| {
            let (first_name, last_name) = parse_name(name);
            let email = generate_email(&first_name, &last_name, domain);
            NewAuthor {
                first_name,
                last_name,
                email: Some(email),
            }
        })
        .collect()
}

/// Article rows for `titles`, assigned to `author_ids` round-robin.
///
/// # Errors
///
/// Returns `SeedError::NoAuthorsInserted` if `author_ids` is empty.
pub fn build_articles<R: Rng + ?Sized>(
    titles: &[&str],
    author_ids: &[i32],
    rng: &mut R,
) -> Result<Vec<NewArticle>, SeedError> {
    if author_ids.is_empty() {
        return Err(SeedError::NoAuthorsInserted);
    }

    let now = Utc::now();
    let window_start = now
        .checked_sub_months(Months::new(12 * PUBLISH_WINDOW_YEARS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let articles = titles
        .iter()
        .enumerate()
        .map(|(idx, title)| NewArticle {
            title: title.to_string(),
            slug: slugify(title),
            description: DescriptionTemplate::for_title(title).render(title),
            content: ContentTemplate::for_title(title).render(title),
            author_id: author_ids[idx % author_ids.len()],
            publish_date: to_database_date(random_date(rng, window_start, now)),
            is_published: idx % 5 != 0,
        })
        .collect();

    Ok(articles)
}

fn to_database_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Replaces all authors and articles with the built-in demo set.
///
/// # Errors
///
/// Returns `SeedError::InvalidData` before touching the database if the
/// seed lists are unusable, or `SeedError::Database` if any statement
/// fails (the transaction is rolled back).
pub async fn seed(pool: &PgPool) -> Result<SeedSummary, SeedError> {
    validate_seed_data(SEED_AUTHORS, SEED_ARTICLES)?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM articles").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM authors").execute(&mut *tx).await?;

    let mut author_ids = Vec::with_capacity(SEED_AUTHORS.len());
    for author in build_authors(SEED_AUTHORS, SEED_EMAIL_DOMAIN) {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO authors (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.email)
        .fetch_one(&mut *tx)
        .await?;
        author_ids.push(id);
    }

    let articles = build_articles(SEED_ARTICLES, &author_ids, &mut rand::thread_rng())?;
    for article in &articles {
        sqlx::query(
            "INSERT INTO articles
                (title, slug, description, content, author_id, publish_date, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.description)
        .bind(&article.content)
        .bind(article.author_id)
        .bind(article.publish_date)
        .bind(article.is_published)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        authors: author_ids.len(),
        articles: articles.len(),
        drafts: articles.iter().filter(|a| !a.is_published).count(),
    };
    tracing::info!(
        authors = summary.authors,
        articles = summary.articles,
        drafts = summary.drafts,
        "seeded database"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(
            slugify("Workplace Culture: The Heart of Productivity"),
            "workplace-culture-the-heart-of-productivity"
        );
        assert_eq!(slugify("  --Hello, World!--  "), "hello-world");
        assert_eq!(slugify("AI in 2025"), "ai-in-2025");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Maïte's Café"), "ma-te-s-caf");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn parse_name_keeps_multi_word_last_names() {
        assert_eq!(
            parse_name("Michell Montserrat Mor Andrade"),
            ("Michell".to_string(), "Montserrat Mor Andrade".to_string())
        );
        assert_eq!(parse_name("Cher"), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn generate_email_strips_whitespace() {
        assert_eq!(
            generate_email("Michell", "Montserrat Mor Andrade", "example.com"),
            "michell.montserratmorandrade@example.com"
        );
    }

    #[test]
    fn templates_follow_title_keywords() {
        assert_eq!(
            ContentTemplate::for_title("Ethics and Empathy in Modern Workplaces"),
            ContentTemplate::Workplace
        );
        assert_eq!(
            ContentTemplate::for_title("Balancing Technology and Human Potential"),
            ContentTemplate::Technology
        );
        assert_eq!(
            ContentTemplate::for_title("The Art of Minimalism"),
            ContentTemplate::Productivity
        );
        // "empathy" selects the workplace body but not the workplace description.
        assert_eq!(
            ContentTemplate::for_title("Empathy at Home"),
            ContentTemplate::Workplace
        );
        assert_eq!(
            DescriptionTemplate::for_title("Empathy at Home"),
            DescriptionTemplate::Default
        );
        assert_eq!(
            DescriptionTemplate::for_title("Balancing Act"),
            DescriptionTemplate::Default
        );
    }

    #[test]
    fn rendered_templates_mention_title() {
        let body = ContentTemplate::Technology.render("From Mars to Metaverse");
        assert!(body.starts_with("<p>"));
        assert!(body.contains("\"From Mars to Metaverse\""));

        let desc = DescriptionTemplate::Default.render("Why Stories Matter");
        assert!(desc.contains("\"Why Stories Matter\""));
    }

    #[test]
    fn validate_rejects_empty_lists() {
        assert!(matches!(
            validate_seed_data(&[], &["A"]),
            Err(SeedError::InvalidData(_))
        ));
        assert!(matches!(
            validate_seed_data(&["A B"], &[]),
            Err(SeedError::InvalidData(_))
        ));
    }

    #[test]
    fn validate_rejects_colliding_slugs() {
        let err = validate_seed_data(&["A B"], &["Hello World", "hello, world!"]).unwrap_err();
        assert!(err.to_string().contains("hello-world"));
    }

    #[test]
    fn builtin_seed_data_is_valid() {
        validate_seed_data(SEED_AUTHORS, SEED_ARTICLES).expect("built-in seed data should be valid");
    }

    #[test]
    fn random_date_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = Utc::now() - Duration::days(30);
        let end = Utc::now() + Duration::days(30);

        for _ in 0..100 {
            let date = random_date(&mut rng, start, end);
            assert!(date >= start);
            assert!(date <= Utc::now(), "end should be clamped to now");
        }
    }

    #[test]
    fn build_articles_assigns_authors_and_drafts() {
        let mut rng = StdRng::seed_from_u64(42);
        let articles = build_articles(SEED_ARTICLES, &[10, 20, 30], &mut rng).unwrap();

        assert_eq!(articles.len(), SEED_ARTICLES.len());
        assert_eq!(articles[0].author_id, 10);
        assert_eq!(articles[1].author_id, 20);
        assert_eq!(articles[3].author_id, 10);

        let drafts: Vec<usize> = articles
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_published)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(drafts, vec![0, 5]);

        let today = Utc::now().date_naive();
        assert!(articles.iter().all(|a| a.publish_date <= today));
        assert_eq!(articles[4].slug, "workplace-culture-the-heart-of-productivity");
    }

    #[test]
    fn build_articles_without_authors_is_an_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = build_articles(SEED_ARTICLES, &[], &mut rng).unwrap_err();
        assert!(matches!(err, SeedError::NoAuthorsInserted));
    }

    #[test]
    fn build_authors_splits_names() {
        let authors = build_authors(&["Neha Arora"], "example.com");
        assert_eq!(
            authors,
            vec![NewAuthor {
                first_name: "Neha".to_string(),
                last_name: "Arora".to_string(),
                email: Some("neha.arora@example.com".to_string()),
            }]
        );
    }
}
