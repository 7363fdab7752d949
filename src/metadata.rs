//! Page metadata resolution.
//!
//! Every SEO field of a content page has more than one possible source. The
//! author can override it under `seo:` in frontmatter, the document has its
//! own display fields, and the site config has defaults.
//!
//! ## Resolution priority
//!
//! Each field is resolved independently. The first non-empty value wins:
//!
//! - **Title**: `seo.title` → `title`
//! - **Description**: `seo.description` → `excerpt` → `description` → `""`
//! - **OG image**: `seo.ogImage` → `featuredImage` → site default
//!
//! A whitespace-only value counts as empty, so a blank override in
//! frontmatter falls through instead of producing an empty tag.

use crate::types::ContentDocument;

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-blank value, trimmed.
///
/// ```text
/// title:       resolve(&[seo_title, title])
/// description: resolve(&[seo_description, excerpt, description])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .map(String::from)
        .next()
}

pub fn resolve_title(doc: &ContentDocument) -> String {
    let base = doc.base();
    let seo_title = base.seo.as_ref().and_then(|s| s.title.as_deref());
    resolve(&[seo_title, Some(base.title.as_str())]).unwrap_or_default()
}

pub fn resolve_description(doc: &ContentDocument) -> String {
    let base = doc.base();
    let seo_description = base.seo.as_ref().and_then(|s| s.description.as_deref());
    resolve(&[
        seo_description,
        base.excerpt.as_deref(),
        base.description.as_deref(),
    ])
    .unwrap_or_default()
}

/// The page's own OG image, if it has one. Callers add the site default.
pub fn resolve_og_image(doc: &ContentDocument) -> Option<String> {
    let base = doc.base();
    let seo_image = base.seo.as_ref().and_then(|s| s.og_image.as_deref());
    resolve(&[seo_image, base.featured_image.as_deref()])
}

pub fn resolve_keywords(doc: &ContentDocument) -> Vec<String> {
    doc.base()
        .seo
        .as_ref()
        .map(|s| s.keywords.clone())
        .unwrap_or_default()
}

pub fn is_noindex(doc: &ContentDocument) -> bool {
    doc.base().seo.as_ref().is_some_and(|s| s.noindex)
}
