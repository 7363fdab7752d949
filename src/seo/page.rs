//! Page-level SEO entry points.
//!
//! [`use_seo`] is the one function that writes to a [`HeadSink`]; the
//! content and homepage variants only assemble [`SeoMetadata`] and delegate.

use super::meta::{
    AlternateLink, INDEX_FOLLOW, MetaTags, NOINDEX_FOLLOW, OgType, SeoMetadata, build_link_tags,
    build_meta_tags, truncate_description, truncate_title,
};
use crate::config::SiteConfig;
use crate::head::HeadSink;
use crate::metadata;
use crate::seo::meta::absolute_url;
use crate::types::{ContentDocument, Lang};

/// Apply page metadata: truncate, resolve tags, and hand them to `sink`.
///
/// Emits meta tags, then `<html>` attributes when a language is set, then
/// canonical/alternate links when there are any. Returns the resolved tags.
pub fn use_seo(metadata: &SeoMetadata, config: &SiteConfig, sink: &mut dyn HeadSink) -> MetaTags {
    let processed = SeoMetadata {
        title: truncate_title(&metadata.title),
        description: truncate_description(&metadata.description),
        ..metadata.clone()
    };

    let tags = build_meta_tags(&processed, config);
    sink.meta(&tags);
    if let Some(lang) = processed.lang {
        sink.html_attrs(lang);
    }
    let links = build_link_tags(&processed, config);
    if !links.is_empty() {
        sink.links(&links);
    }
    tags
}

/// Options for [`content_seo`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSeoOptions {
    pub og_type: Option<OgType>,
    /// Defaults to the document's own path.
    pub canonical: Option<String>,
    /// Defaults to [`same_as_alternates`].
    pub alternate_links: Option<Vec<AlternateLink>>,
}

/// The metadata [`content_seo`] applies for a document.
pub fn content_metadata(
    doc: &ContentDocument,
    options: &ContentSeoOptions,
    config: &SiteConfig,
) -> SeoMetadata {
    let robots = if metadata::is_noindex(doc) {
        NOINDEX_FOLLOW
    } else {
        INDEX_FOLLOW
    };
    SeoMetadata {
        title: metadata::resolve_title(doc),
        description: metadata::resolve_description(doc),
        keywords: metadata::resolve_keywords(doc),
        og_image: metadata::resolve_og_image(doc),
        og_type: options.og_type,
        canonical: Some(
            options
                .canonical
                .clone()
                .unwrap_or_else(|| doc.path().to_string()),
        ),
        lang: Some(doc.lang()),
        alternate_links: options
            .alternate_links
            .clone()
            .unwrap_or_else(|| same_as_alternates(doc, config.origin())),
        robots: Some(robots.to_string()),
        ..Default::default()
    }
}

/// SEO for a blog post or case study page.
pub fn content_seo(
    doc: &ContentDocument,
    options: &ContentSeoOptions,
    config: &SiteConfig,
    sink: &mut dyn HeadSink,
) -> MetaTags {
    use_seo(&content_metadata(doc, options, config), config, sink)
}

/// Options for [`homepage_seo`]. Unset fields come from `[site]` config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomepageOptions {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub lang: Option<Lang>,
}

pub fn homepage_metadata(options: &HomepageOptions, config: &SiteConfig) -> SeoMetadata {
    let site = &config.site;
    let name = options.name.as_deref().unwrap_or(&site.name);
    let tagline = options.tagline.as_deref().unwrap_or(&site.tagline);
    SeoMetadata {
        title: format!("{name} | {tagline}"),
        description: options
            .description
            .clone()
            .unwrap_or_else(|| site.description.clone()),
        title_template: Some(false),
        og_type: Some(OgType::Profile),
        og_image: Some(
            options
                .image
                .clone()
                .unwrap_or_else(|| site.default_og_image.clone()),
        ),
        lang: Some(options.lang.unwrap_or(site.default_locale)),
        canonical: Some(site.url.clone()),
        ..Default::default()
    }
}

/// SEO for the homepage: `"{name} | {tagline}"`, untemplated, profile type.
pub fn homepage_seo(
    options: &HomepageOptions,
    config: &SiteConfig,
    sink: &mut dyn HeadSink,
) -> MetaTags {
    use_seo(&homepage_metadata(options, config), config, sink)
}

/// `en`, `ar`, and an `x-default` pointing at English.
pub fn locale_alternates(path_en: &str, path_ar: &str, origin: &str) -> Vec<AlternateLink> {
    let en = absolute_url(path_en, origin);
    vec![
        AlternateLink::new("en", &en),
        AlternateLink::new("ar", &absolute_url(path_ar, origin)),
        AlternateLink::new("x-default", &en),
    ]
}

/// The document itself plus one alternate per translation, at most one per
/// language.
pub fn same_as_alternates(doc: &ContentDocument, origin: &str) -> Vec<AlternateLink> {
    let mut seen = vec![doc.lang()];
    let mut links = vec![AlternateLink::new(
        doc.lang().code(),
        &absolute_url(doc.path(), origin),
    )];
    for path in &doc.base().same_as {
        let lang = Lang::from_path(path);
        if seen.contains(&lang) {
            continue;
        }
        seen.push(lang);
        links.push(AlternateLink::new(lang.code(), &absolute_url(path, origin)));
    }
    links
}
