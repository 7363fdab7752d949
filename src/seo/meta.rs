//! Meta and link tag construction.
//!
//! [`SeoMetadata`] is the per-page input; [`build_meta_tags`] and
//! [`build_link_tags`] turn it into the concrete tags a `<head>` carries,
//! filling Open Graph and Twitter fields from the primary values when no
//! override is set and absolutizing every URL against the site origin.

use crate::config::SiteConfig;
use crate::types::Lang;
use serde::Serialize;
use tracing::debug;

pub const TITLE_MAX: usize = 60;
pub const DESCRIPTION_MAX: usize = 160;

pub const INDEX_FOLLOW: &str = "index,follow";
pub const NOINDEX_FOLLOW: &str = "noindex,follow";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    #[default]
    Website,
    Article,
    Profile,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
            OgType::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCard {
    Summary,
    #[default]
    SummaryLargeImage,
    App,
    Player,
}

impl TwitterCard {
    pub fn as_str(self) -> &'static str {
        match self {
            TwitterCard::Summary => "summary",
            TwitterCard::SummaryLargeImage => "summary_large_image",
            TwitterCard::App => "app",
            TwitterCard::Player => "player",
        }
    }
}

/// A hreflang alternate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

impl AlternateLink {
    pub fn new(hreflang: &str, href: &str) -> Self {
        Self {
            hreflang: hreflang.to_string(),
            href: href.to_string(),
        }
    }
}

/// SEO input for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    /// `Some(false)` renders the title as-is; otherwise the site name is
    /// appended.
    pub title_template: Option<bool>,
    pub keywords: Vec<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<OgType>,
    pub og_url: Option<String>,
    pub twitter_card: Option<TwitterCard>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub canonical: Option<String>,
    pub lang: Option<Lang>,
    pub alternate_links: Vec<AlternateLink>,
    pub robots: Option<String>,
}

/// Fully resolved meta tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTags {
    pub title: String,
    /// What goes in `<title>`, after templating.
    pub document_title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_type: OgType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    pub og_site_name: String,
    pub og_locale: String,
    pub twitter_card: TwitterCard,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_creator: Option<String>,
    pub robots: String,
}

/// A `<link>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTag {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

/// Shorten `text` to at most `max` characters, ending in `...`.
///
/// Cuts at a word boundary when one lies within the last 30% of the limit,
/// otherwise hard-cuts.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max.saturating_sub(3)).collect();
    let cut = truncated
        .rfind(' ')
        .filter(|&pos| pos > 0 && truncated[..pos].chars().count() as f64 > max as f64 * 0.7);
    let out = match cut {
        Some(pos) => format!("{}...", &truncated[..pos]),
        None => format!("{truncated}..."),
    };
    debug!(from = text.chars().count(), to = out.chars().count(), "truncated text");
    out
}

pub fn truncate_title(title: &str) -> String {
    truncate_text(title, TITLE_MAX)
}

pub fn truncate_description(description: &str) -> String {
    truncate_text(description, DESCRIPTION_MAX)
}

pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Resolve `path` against `origin` unless it is already absolute.
pub fn absolute_url(path: &str, origin: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Absolutize and drop a trailing slash, keeping a bare `/`.
pub fn normalize_canonical(url: &str, origin: &str) -> String {
    let mut normalized = url.trim().to_string();
    if !normalized.starts_with("http") {
        normalized = absolute_url(&normalized, origin);
    }
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Resolve every meta tag for a page.
pub fn build_meta_tags(metadata: &SeoMetadata, config: &SiteConfig) -> MetaTags {
    let origin = config.origin();
    let title = metadata.title.clone();
    let description = metadata.description.clone();

    let og_image = absolute_url(
        metadata
            .og_image
            .as_deref()
            .unwrap_or(&config.site.default_og_image),
        origin,
    );
    let twitter_image = metadata
        .twitter_image
        .as_deref()
        .map(|img| absolute_url(img, origin))
        .unwrap_or_else(|| og_image.clone());
    let canonical = metadata
        .canonical
        .as_deref()
        .map(|c| normalize_canonical(c, origin));

    let og_title = metadata.og_title.clone().unwrap_or_else(|| title.clone());
    let og_description = metadata
        .og_description
        .clone()
        .unwrap_or_else(|| description.clone());
    let twitter_title = metadata
        .twitter_title
        .clone()
        .or_else(|| metadata.og_title.clone())
        .unwrap_or_else(|| title.clone());
    let twitter_description = metadata
        .twitter_description
        .clone()
        .or_else(|| metadata.og_description.clone())
        .unwrap_or_else(|| description.clone());

    let document_title = if metadata.title_template == Some(false) {
        title.clone()
    } else {
        format!("{title} | {}", config.site.name)
    };

    MetaTags {
        document_title,
        keywords: metadata.keywords.clone(),
        og_title,
        og_description,
        og_image,
        og_type: metadata.og_type.unwrap_or_default(),
        og_url: metadata.og_url.clone().or(canonical),
        og_site_name: config.site.name.clone(),
        og_locale: metadata.lang.unwrap_or_default().og_locale().to_string(),
        twitter_card: metadata.twitter_card.unwrap_or_default(),
        twitter_title,
        twitter_description,
        twitter_image,
        twitter_site: config.site.twitter_handle.clone(),
        twitter_creator: config.site.twitter_handle.clone(),
        robots: metadata
            .robots
            .clone()
            .unwrap_or_else(|| INDEX_FOLLOW.to_string()),
        title,
        description,
    }
}

/// Canonical link first, then one alternate per hreflang entry.
pub fn build_link_tags(metadata: &SeoMetadata, config: &SiteConfig) -> Vec<LinkTag> {
    let origin = config.origin();
    let mut links = Vec::with_capacity(metadata.alternate_links.len() + 1);
    if let Some(canonical) = &metadata.canonical {
        links.push(LinkTag {
            rel: "canonical".to_string(),
            href: normalize_canonical(canonical, origin),
            hreflang: None,
        });
    }
    links.extend(metadata.alternate_links.iter().map(|alt| LinkTag {
        rel: "alternate".to_string(),
        href: absolute_url(&alt.href, origin),
        hreflang: Some(alt.hreflang.clone()),
    }));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.url = "https://me.dev".into();
        config.site.name = "Jane Doe".into();
        config.site.twitter_handle = Some("@jane".into());
        config
    }

    // =========================================================================
    // truncate_text
    // =========================================================================

    #[test]
    fn sixty_char_title_is_untouched() {
        let title = "a".repeat(60);
        assert_eq!(truncate_title(&title), title);
    }

    #[test]
    fn sixty_one_char_title_is_truncated() {
        let title = "a".repeat(61);
        let out = truncate_title(&title);
        assert!(out.chars().count() <= 60);
        assert!(out.ends_with("..."));
        assert_eq!(out, format!("{}...", "a".repeat(57)));
    }

    #[test]
    fn truncation_prefers_late_word_boundary() {
        // Space at index 50 of a 57-char prefix: beyond 70% of 60.
        let text = format!("{} {}", "a".repeat(50), "b".repeat(20));
        assert_eq!(truncate_text(&text, 60), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn truncation_ignores_early_word_boundary() {
        // Space at index 10: too far back, so hard cut.
        let text = format!("{} {}", "a".repeat(10), "b".repeat(60));
        let out = truncate_text(&text, 60);
        assert_eq!(out.chars().count(), 60);
        assert!(out.starts_with("aaaaaaaaaa b"));
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "م".repeat(61);
        assert_eq!(truncate_text(&text, 60).chars().count(), 60);
    }

    // =========================================================================
    // URLs
    // =========================================================================

    #[test]
    fn absolute_url_variants() {
        assert_eq!(absolute_url("/blog", "https://me.dev"), "https://me.dev/blog");
        assert_eq!(absolute_url("blog", "https://me.dev/"), "https://me.dev/blog");
        assert_eq!(absolute_url("https://x.y/z", "https://me.dev"), "https://x.y/z");
    }

    #[test]
    fn canonical_drops_trailing_slash() {
        assert_eq!(
            normalize_canonical("/blog/", "https://me.dev"),
            "https://me.dev/blog"
        );
        assert_eq!(
            normalize_canonical(" https://me.dev/ ", "https://me.dev"),
            "https://me.dev"
        );
        assert_eq!(normalize_canonical("/", "https://me.dev"), "https://me.dev");
    }

    // =========================================================================
    // build_meta_tags
    // =========================================================================

    #[test]
    fn meta_tags_fall_back_to_primary_values() {
        let meta = SeoMetadata {
            title: "Post".into(),
            description: "About it".into(),
            ..Default::default()
        };
        let tags = build_meta_tags(&meta, &config());
        assert_eq!(tags.og_title, "Post");
        assert_eq!(tags.twitter_description, "About it");
        assert_eq!(tags.og_image, "https://me.dev/images/og/default.png");
        assert_eq!(tags.twitter_image, tags.og_image);
        assert_eq!(tags.og_type, OgType::Website);
        assert_eq!(tags.twitter_card, TwitterCard::SummaryLargeImage);
        assert_eq!(tags.robots, "index,follow");
        assert_eq!(tags.og_locale, "en_US");
        assert_eq!(tags.og_site_name, "Jane Doe");
        assert_eq!(tags.twitter_site.as_deref(), Some("@jane"));
        assert_eq!(tags.document_title, "Post | Jane Doe");
        assert_eq!(tags.og_url, None);
    }

    #[test]
    fn twitter_falls_back_through_og_overrides() {
        let meta = SeoMetadata {
            title: "T".into(),
            description: "D".into(),
            og_title: Some("OG T".into()),
            og_description: Some("OG D".into()),
            lang: Some(Lang::Ar),
            canonical: Some("/ar/blog/x".into()),
            ..Default::default()
        };
        let tags = build_meta_tags(&meta, &config());
        assert_eq!(tags.twitter_title, "OG T");
        assert_eq!(tags.twitter_description, "OG D");
        assert_eq!(tags.og_locale, "ar_SA");
        assert_eq!(tags.og_url.as_deref(), Some("https://me.dev/ar/blog/x"));
    }

    #[test]
    fn disabled_title_template_keeps_title() {
        let meta = SeoMetadata {
            title: "Home".into(),
            title_template: Some(false),
            ..Default::default()
        };
        assert_eq!(build_meta_tags(&meta, &config()).document_title, "Home");
    }

    // =========================================================================
    // build_link_tags
    // =========================================================================

    #[test]
    fn link_tags_canonical_then_alternates() {
        let meta = SeoMetadata {
            canonical: Some("/blog/x".into()),
            alternate_links: vec![
                AlternateLink::new("en", "/blog/x"),
                AlternateLink::new("ar", "https://me.dev/ar/blog/x"),
            ],
            ..Default::default()
        };
        let links = build_link_tags(&meta, &config());
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].rel, "canonical");
        assert_eq!(links[0].hreflang, None);
        assert_eq!(links[1].href, "https://me.dev/blog/x");
        assert_eq!(links[2].hreflang.as_deref(), Some("ar"));
    }

    #[test]
    fn no_canonical_no_alternates_no_links() {
        assert!(build_link_tags(&SeoMetadata::default(), &config()).is_empty());
    }
}
