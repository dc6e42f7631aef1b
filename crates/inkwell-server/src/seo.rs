//! Page metadata: titles, descriptions, canonical URLs and social tags.

use inkwell_types::FullArticle;

use crate::config::SiteConfig;

const BLOG_LIST_TITLE: &str = "Published Articles";
const BLOG_LIST_DESCRIPTION: &str = "Browse all published articles on our blog. Discover insights, \
     stories, and articles from our community of writers.";
const ARTICLE_NOT_FOUND_TITLE: &str = "Article Not Found";
const PAGE_NOT_FOUND_TITLE: &str = "Page Not Found";

/// Everything the base layout needs to fill `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Full `<title>` text.
    pub title: String,
    /// Title used for OpenGraph and Twitter cards, without the site suffix.
    pub social_title: String,
    pub description: String,
    pub canonical_url: String,
    pub image_url: String,
    pub site_name: String,
    pub keywords: String,
    pub twitter_handle: Option<String>,
    /// OpenGraph object type: `website` or `article`.
    pub og_type: &'static str,
    pub robots: &'static str,
}

impl PageMeta {
    fn base(site: &SiteConfig) -> Self {
        Self {
            title: site.name.clone(),
            social_title: site.name.clone(),
            description: site.description.clone(),
            canonical_url: site.url.clone(),
            image_url: absolute_url(site, &site.og_image),
            site_name: site.name.clone(),
            keywords: site.keywords.join(", "),
            twitter_handle: site.twitter_handle.clone(),
            og_type: "website",
            robots: "index, follow",
        }
    }

    /// Builds metadata for a named page under `path`.
    ///
    /// A missing or empty description falls back to the site description.
    pub fn page(site: &SiteConfig, title: &str, description: Option<&str>, path: &str) -> Self {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&site.description);
        Self {
            title: page_title(site, title),
            social_title: title.to_string(),
            description: description.to_string(),
            canonical_url: absolute_url(site, path),
            ..Self::base(site)
        }
    }

    pub fn home(site: &SiteConfig) -> Self {
        Self::base(site)
    }

    pub fn blog_list(site: &SiteConfig) -> Self {
        Self::page(site, BLOG_LIST_TITLE, Some(BLOG_LIST_DESCRIPTION), "/blog")
    }

    pub fn article(site: &SiteConfig, slug: &str, article: &FullArticle) -> Self {
        Self {
            og_type: "article",
            ..Self::page(
                site,
                &article.title,
                Some(&article.description),
                &format!("/blog/{slug}"),
            )
        }
    }

    pub fn article_not_found(site: &SiteConfig) -> Self {
        Self {
            title: page_title(site, ARTICLE_NOT_FOUND_TITLE),
            social_title: ARTICLE_NOT_FOUND_TITLE.to_string(),
            robots: "noindex",
            ..Self::base(site)
        }
    }

    pub fn not_found(site: &SiteConfig) -> Self {
        Self {
            title: page_title(site, PAGE_NOT_FOUND_TITLE),
            social_title: PAGE_NOT_FOUND_TITLE.to_string(),
            robots: "noindex",
            ..Self::base(site)
        }
    }
}

fn page_title(site: &SiteConfig, title: &str) -> String {
    format!("{title} | {}", site.name)
}

/// Joins `path` onto the site URL unless it is already absolute.
fn absolute_url(site: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = site.url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
