//! Shared content types.
//!
//! Everything downstream of the content store works on [`ContentDocument`]:
//! a tagged sum over blog posts and case studies that share a
//! [`DocumentBase`]. Documents are read-only once loaded; the derived
//! artifacts (read time, excerpt, SEO metadata, JSON-LD) are computed from
//! them per render and never written back.
//!
//! Field names serialize in camelCase so that equality filters and sort keys
//! use the same names as the frontmatter (`featuredImage`, `sameAs`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported content language.
///
/// English is the default locale and is served without a path prefix;
/// Arabic routes live under `/ar/`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    /// All supported languages, default first.
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }

    /// Text direction for the `dir` html attribute.
    pub fn direction(self) -> &'static str {
        match self {
            Lang::En => "ltr",
            Lang::Ar => "rtl",
        }
    }

    /// Open Graph locale tag.
    pub fn og_locale(self) -> &'static str {
        match self {
            Lang::En => "en_US",
            Lang::Ar => "ar_SA",
        }
    }

    /// Classify a route by its language marker: any path carrying an `/ar/`
    /// segment (or starting with `ar/`) is Arabic, everything else English.
    pub fn from_path(path: &str) -> Lang {
        if path.contains("/ar/") || path.starts_with("ar/") || path == "/ar" {
            Lang::Ar
        } else {
            Lang::En
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ar" => Ok(Lang::Ar),
            other => Err(format!("unsupported language `{other}` (expected en or ar)")),
        }
    }
}

/// The two content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "case-study")]
    CaseStudy,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Blog, ContentKind::CaseStudy];

    /// Directory name under `content/` (also the route segment).
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::CaseStudy => "case-studies",
        }
    }

    /// Section label used in breadcrumbs.
    pub fn section_label(self) -> &'static str {
        match self {
            ContentKind::Blog => "Blog",
            ContentKind::CaseStudy => "Case Studies",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Blog => f.write_str("blog"),
            ContentKind::CaseStudy => f.write_str("case-study"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(ContentKind::Blog),
            "case-study" | "case-studies" => Ok(ContentKind::CaseStudy),
            other => Err(format!("unknown content type `{other}`")),
        }
    }
}

/// A node of the parsed markdown tree.
///
/// Text nodes have `type = "text"` and a `value`; element nodes carry an
/// html-like `tag` (`p`, `h2`, `pre`, `code`, ...) and children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn root(children: Vec<ContentNode>) -> Self {
        Self {
            kind: "root".to_string(),
            children,
            ..Default::default()
        }
    }

    pub fn element(tag: &str, children: Vec<ContentNode>) -> Self {
        Self {
            kind: "element".to_string(),
            tag: Some(tag.to_string()),
            children,
            ..Default::default()
        }
    }

    pub fn text(value: &str) -> Self {
        Self {
            kind: "text".to_string(),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Optional SEO overrides authored in frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoFrontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub noindex: bool,
}

/// Fields shared by every content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBase {
    /// Stable identifier (content fingerprint for filesystem documents).
    pub id: String,
    /// Route, e.g. `/blog/2026/my-post` or `/ar/blog/2026/my-post`.
    pub path: String,
    /// Filename without extension; drafts start with `_`.
    pub stem: String,
    pub title: String,
    /// ISO-8601 date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Routes of this document's translations.
    #[serde(default)]
    pub same_as: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoFrontmatter>,
    #[serde(default, skip_serializing)]
    pub body: Option<ContentNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub base: DocumentBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    #[serde(flatten)]
    pub base: DocumentBase,
    pub client: String,
    pub role: String,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// A blog post or a case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentDocument {
    #[serde(rename = "blog")]
    BlogPost(BlogPost),
    #[serde(rename = "case-study")]
    CaseStudy(CaseStudy),
}

impl ContentDocument {
    pub fn base(&self) -> &DocumentBase {
        match self {
            ContentDocument::BlogPost(p) => &p.base,
            ContentDocument::CaseStudy(c) => &c.base,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentDocument::BlogPost(_) => ContentKind::Blog,
            ContentDocument::CaseStudy(_) => ContentKind::CaseStudy,
        }
    }

    pub fn path(&self) -> &str {
        &self.base().path
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn date(&self) -> &str {
        &self.base().date
    }

    pub fn lang(&self) -> Lang {
        self.base().lang
    }

    pub fn tags(&self) -> &[String] {
        &self.base().tags
    }

    /// The parsed `date`, if it is a valid calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date(), "%Y-%m-%d").ok()
    }

    /// Whether the document carries a draft marker in its stem or path.
    pub fn is_draft(&self) -> bool {
        let base = self.base();
        crate::naming::is_draft_stem(&base.stem) || crate::naming::is_draft_path(&base.path)
    }

    /// Look up a serialized field by its camelCase name.
    ///
    /// Used by equality filters and sort keys; `type` resolves to the
    /// content kind tag.
    pub fn field(&self, name: &str) -> Option<serde_json::Value> {
        serde_json::to_value(self)
            .ok()?
            .get(name)
            .cloned()
            .filter(|v| !v.is_null())
    }
}
