//! Schema.org JSON-LD builders.
//!
//! Every schema serializes with `@context` and `@type`. Relative image and
//! breadcrumb URLs are resolved against the site origin; optional fields are
//! omitted rather than emitted empty.

use super::meta::absolute_url;
use crate::config::SiteConfig;
use crate::head::HeadSink;
use crate::locale::switch_locale_path;
use crate::metadata;
use crate::types::{ContentDocument, ContentKind};
use serde::Serialize;

const CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

impl PersonRef {
    fn new(name: &str) -> Self {
        Self {
            kind: "Person",
            name: name.to_string(),
        }
    }
}

/// One image URL or several.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaImage {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<SchemaImage>,
    pub author: PersonRef,
    pub date_published: String,
    pub date_modified: String,
    pub publisher: PersonRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeWorkSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub author: PersonRef,
    pub date_published: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    /// 1-indexed.
    pub position: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbListSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

/// Any JSON-LD object this module builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredData {
    Article(ArticleSchema),
    CreativeWork(CreativeWorkSchema),
    Person(PersonSchema),
    BreadcrumbList(BreadcrumbListSchema),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleInput {
    pub headline: String,
    pub description: Option<String>,
    pub author: String,
    pub date_published: String,
    /// Defaults to `date_published`.
    pub date_modified: Option<String>,
    pub images: Vec<String>,
    pub keywords: Vec<String>,
}

pub fn article(input: &ArticleInput, origin: &str) -> StructuredData {
    let mut images: Vec<String> = input
        .images
        .iter()
        .map(|img| absolute_url(img, origin))
        .collect();
    let image = match images.len() {
        0 => None,
        1 => images.pop().map(SchemaImage::Single),
        _ => Some(SchemaImage::Many(images)),
    };
    StructuredData::Article(ArticleSchema {
        context: CONTEXT,
        kind: "BlogPosting",
        headline: input.headline.clone(),
        description: input.description.clone().filter(|d| !d.is_empty()),
        image,
        author: PersonRef::new(&input.author),
        date_published: input.date_published.clone(),
        date_modified: input
            .date_modified
            .clone()
            .unwrap_or_else(|| input.date_published.clone()),
        publisher: PersonRef::new(&input.author),
        keywords: input.keywords.clone(),
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreativeWorkInput {
    pub name: String,
    /// Falls back to `name` when blank.
    pub description: Option<String>,
    pub author: String,
    pub date_published: String,
    pub keywords: Vec<String>,
    pub about: Option<String>,
}

pub fn creative_work(input: &CreativeWorkInput) -> StructuredData {
    let description = metadata::resolve(&[input.description.as_deref(), Some(input.name.as_str())])
        .unwrap_or_default();
    StructuredData::CreativeWork(CreativeWorkSchema {
        context: CONTEXT,
        kind: "CreativeWork",
        name: input.name.clone(),
        description,
        author: PersonRef::new(&input.author),
        date_published: input.date_published.clone(),
        keywords: input.keywords.clone(),
        about: input.about.clone().filter(|a| !a.is_empty()),
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonInput {
    pub name: String,
    pub description: Option<String>,
    pub job_title: Option<String>,
    pub url: Option<String>,
    pub same_as: Vec<String>,
    pub image: Option<String>,
}

pub fn person(input: &PersonInput, origin: &str) -> StructuredData {
    StructuredData::Person(PersonSchema {
        context: CONTEXT,
        kind: "Person",
        name: input.name.clone(),
        description: input.description.clone(),
        job_title: input.job_title.clone(),
        url: input.url.clone(),
        same_as: input.same_as.clone(),
        image: input.image.as_deref().map(|img| absolute_url(img, origin)),
    })
}

/// A breadcrumb label and optional link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub url: Option<String>,
}

impl Crumb {
    pub fn new(name: &str, url: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            url: url.map(String::from),
        }
    }
}

/// The last crumb is the current page and never carries a link.
pub fn breadcrumbs(items: &[Crumb], origin: &str) -> StructuredData {
    let last = items.len().saturating_sub(1);
    let item_list_element = items
        .iter()
        .enumerate()
        .map(|(i, crumb)| ListItem {
            kind: "ListItem",
            position: i + 1,
            name: crumb.name.clone(),
            item: crumb
                .url
                .as_deref()
                .filter(|_| i < last)
                .map(|url| absolute_url(url, origin)),
        })
        .collect();
    StructuredData::BreadcrumbList(BreadcrumbListSchema {
        context: CONTEXT,
        kind: "BreadcrumbList",
        item_list_element,
    })
}

fn content_breadcrumbs(doc: &ContentDocument, origin: &str) -> StructuredData {
    let lang = doc.lang();
    let kind = doc.kind();
    let home = switch_locale_path("/", lang);
    let section = switch_locale_path(&format!("/{}", kind.dir_name()), lang);
    breadcrumbs(
        &[
            Crumb::new("Home", Some(&home)),
            Crumb::new(kind.section_label(), Some(&section)),
            Crumb::new(doc.title(), None),
        ],
        origin,
    )
}

/// Article plus Home / Blog / title breadcrumbs.
pub fn blog_post_structured_data(doc: &ContentDocument, config: &SiteConfig) -> Vec<StructuredData> {
    let base = doc.base();
    let input = ArticleInput {
        headline: base.title.clone(),
        description: Some(metadata::resolve_description(doc)),
        author: base.author.clone().unwrap_or_else(|| config.site.author.clone()),
        date_published: base.date.clone(),
        date_modified: base.updated_at.clone(),
        images: base.featured_image.iter().cloned().collect(),
        keywords: base.tags.clone(),
    };
    vec![
        article(&input, config.origin()),
        content_breadcrumbs(doc, config.origin()),
    ]
}

/// CreativeWork plus Home / Case Studies / title breadcrumbs.
pub fn case_study_structured_data(
    doc: &ContentDocument,
    config: &SiteConfig,
) -> Vec<StructuredData> {
    let base = doc.base();
    let about = match doc {
        ContentDocument::CaseStudy(cs) => Some(cs.role.clone()),
        ContentDocument::BlogPost(_) => None,
    };
    let input = CreativeWorkInput {
        name: base.title.clone(),
        description: base.excerpt.clone(),
        author: base.author.clone().unwrap_or_else(|| config.site.author.clone()),
        date_published: base.date.clone(),
        keywords: base.tags.clone(),
        about,
    };
    vec![
        creative_work(&input),
        content_breadcrumbs(doc, config.origin()),
    ]
}

/// The schemas for a document page, by kind.
pub fn document_structured_data(doc: &ContentDocument, config: &SiteConfig) -> Vec<StructuredData> {
    match doc.kind() {
        ContentKind::Blog => blog_post_structured_data(doc, config),
        ContentKind::CaseStudy => case_study_structured_data(doc, config),
    }
}

/// Serialize one schema into one JSON-LD script. No deduplication.
pub fn emit(schema: &StructuredData, sink: &mut dyn HeadSink) -> Result<(), serde_json::Error> {
    sink.script(&serde_json::to_string(schema)?);
    Ok(())
}
