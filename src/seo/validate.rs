//! Soft SEO validation.
//!
//! Validators never panic and never return `Err`. Hard problems land in
//! `errors` and flip `success`; advisories land in `warnings` and leave
//! `success` alone. Length checks count characters, not bytes.

use super::meta::{DESCRIPTION_MAX, TITLE_MAX};
use crate::types::{ContentDocument, Lang, SeoFrontmatter};
use serde::Serialize;
use std::fmt;

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;
const OG_MIN_WIDTH: u32 = 600;
const OG_MIN_HEIGHT: u32 = 315;
const TITLE_MIN: usize = 30;
const DESCRIPTION_MIN: usize = 120;
const KEYWORDS_MAX: usize = 10;
const ALT_MAX: usize = 125;

/// One finding, tied to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<FieldIssue>,
    pub warnings: Vec<FieldIssue>,
}

impl<T> ValidationResult<T> {
    fn from_parts(data: Option<T>, errors: Vec<FieldIssue>, warnings: Vec<FieldIssue>) -> Self {
        Self {
            success: errors.is_empty(),
            data,
            errors,
            warnings,
        }
    }

    fn absorb<U>(&mut self, other: ValidationResult<U>) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.success = self.errors.is_empty();
    }
}

fn check_length(
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) -> ValidationResult<String> {
    if value.trim().is_empty() {
        return ValidationResult::from_parts(
            None,
            vec![FieldIssue::new(field, format!("{label} is required"))],
            Vec::new(),
        );
    }

    let length = value.chars().count();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    if length > max {
        errors.push(FieldIssue::new(
            field,
            format!(
                "{label} is {length} characters (max {max}). It will be truncated in search results."
            ),
        ));
    }
    if length < min {
        warnings.push(FieldIssue::new(
            field,
            format!("{label} is {length} characters. Recommended: {min}-{max} for optimal SEO."),
        ));
    } else if length <= max {
        warnings.push(FieldIssue::new(
            field,
            format!("{label} length ({length} chars) is optimal for search results."),
        ));
    }
    ValidationResult::from_parts(Some(value.to_string()), errors, warnings)
}

pub fn validate_title(title: &str) -> ValidationResult<String> {
    check_length("title", "Title", title, TITLE_MIN, TITLE_MAX)
}

pub fn validate_description(description: &str) -> ValidationResult<String> {
    check_length(
        "description",
        "Description",
        description,
        DESCRIPTION_MIN,
        DESCRIPTION_MAX,
    )
}

/// OG image dimensions. Only ever warns.
pub fn validate_og_image_dimensions(width: u32, height: u32) -> ValidationResult<(u32, u32)> {
    let mut warnings = Vec::new();
    if width != OG_IMAGE_WIDTH || height != OG_IMAGE_HEIGHT {
        warnings.push(FieldIssue::new(
            "ogImage",
            format!(
                "Image dimensions are {width}x{height}. Recommended: {OG_IMAGE_WIDTH}x{OG_IMAGE_HEIGHT} (1.91:1 ratio) for optimal display on social platforms."
            ),
        ));
    }

    let recommended = f64::from(OG_IMAGE_WIDTH) / f64::from(OG_IMAGE_HEIGHT);
    if height == 0 {
        warnings.push(FieldIssue::new("ogImage", "Image height is zero."));
    } else {
        let ratio = f64::from(width) / f64::from(height);
        if (ratio - recommended).abs() > 0.1 {
            warnings.push(FieldIssue::new(
                "ogImage",
                format!(
                    "Image aspect ratio is {ratio:.2}:1. Recommended: 1.91:1 to prevent cropping on social platforms."
                ),
            ));
        }
    }

    if width < OG_MIN_WIDTH || height < OG_MIN_HEIGHT {
        warnings.push(FieldIssue::new(
            "ogImage",
            format!(
                "Image dimensions are below minimum recommended size ({OG_MIN_WIDTH}x{OG_MIN_HEIGHT}). Some platforms may not display the image."
            ),
        ));
    }
    ValidationResult::from_parts(Some((width, height)), Vec::new(), warnings)
}

/// The `seo:` frontmatter block. Only fields that are set get checked.
pub fn validate_frontmatter(seo: &SeoFrontmatter) -> ValidationResult<SeoFrontmatter> {
    let mut result = ValidationResult::from_parts(Some(seo.clone()), Vec::new(), Vec::new());
    if let Some(title) = seo.title.as_deref().filter(|t| !t.is_empty()) {
        result.absorb(prefixed(validate_title(title), "seo."));
    }
    if let Some(description) = seo.description.as_deref().filter(|d| !d.is_empty()) {
        result.absorb(prefixed(validate_description(description), "seo."));
    }
    if seo.keywords.len() > KEYWORDS_MAX {
        result.warnings.push(FieldIssue::new(
            "seo.keywords",
            format!(
                "{} keywords provided. Recommended: 3-7 keywords for focused SEO.",
                seo.keywords.len()
            ),
        ));
    }
    if seo.noindex {
        result.warnings.push(FieldIssue::new(
            "seo.noindex",
            "Content is marked as noindex. It will not appear in search results.",
        ));
    }
    result
}

fn prefixed<T>(mut result: ValidationResult<T>, prefix: &str) -> ValidationResult<T> {
    for issue in result.errors.iter_mut().chain(result.warnings.iter_mut()) {
        issue.field = format!("{prefix}{}", issue.field);
    }
    result
}

/// Image attributes checked by [`validate_image_seo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCheck<'a> {
    pub src: &'a str,
    pub alt: Option<&'a str>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub fn validate_image_seo(image: &ImageCheck<'_>) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let alt = image.alt.unwrap_or_default();
    if alt.trim().is_empty() {
        errors.push(FieldIssue::new(
            "alt",
            "Alt text is required for accessibility and SEO",
        ));
    }
    let has_size = |v: Option<u32>| v.is_some_and(|n| n > 0);
    if !has_size(image.width) || !has_size(image.height) {
        errors.push(FieldIssue::new(
            "dimensions",
            "Image width and height are required to prevent layout shift",
        ));
    }
    let alt_len = alt.chars().count();
    if alt_len > ALT_MAX {
        warnings.push(FieldIssue::new(
            "alt",
            format!(
                "Alt text is {alt_len} characters. Recommended: under {ALT_MAX} characters for screen readers."
            ),
        ));
    }
    ValidationResult::from_parts(None, errors, warnings)
}

fn require(errors: &mut Vec<FieldIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldIssue::new(field, format!("{field} is required")));
    }
}

/// Each `sameAs` entry must point at another language, at most once per
/// language.
fn check_same_as(doc: &ContentDocument, warnings: &mut Vec<FieldIssue>) {
    let mut seen = vec![doc.lang()];
    for path in &doc.base().same_as {
        let lang = Lang::from_path(path);
        if lang == doc.lang() {
            warnings.push(FieldIssue::new(
                "sameAs",
                format!("'{path}' is in the document's own language ({lang})"),
            ));
        } else if seen.contains(&lang) {
            warnings.push(FieldIssue::new(
                "sameAs",
                format!("'{path}' is a second translation for {lang}"),
            ));
        } else {
            seen.push(lang);
        }
    }
}

/// Structural checks for a loaded document.
///
/// Errors: blank title, unparseable date, and for case studies the required
/// `client`, `role`, `timeline`, `featuredImage` and non-empty `tags`.
/// Warnings: missing excerpt, inconsistent `sameAs` entries, and for case
/// studies missing testimonial or metrics. The `seo:` block, when present, is validated too.
pub fn validate_document(doc: &ContentDocument) -> ValidationResult<()> {
    let base = doc.base();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require(&mut errors, "title", &base.title);
    if doc.parsed_date().is_none() {
        errors.push(FieldIssue::new(
            "date",
            format!("'{}' is not a valid YYYY-MM-DD date", base.date),
        ));
    }
    if base.excerpt.as_deref().is_none_or(|e| e.trim().is_empty()) {
        warnings.push(FieldIssue::new(
            "excerpt",
            "No excerpt; descriptions will fall back to the body",
        ));
    }

    check_same_as(doc, &mut warnings);

    if let ContentDocument::CaseStudy(cs) = doc {
        require(&mut errors, "client", &cs.client);
        require(&mut errors, "role", &cs.role);
        require(&mut errors, "timeline", &cs.timeline);
        require(
            &mut errors,
            "featuredImage",
            base.featured_image.as_deref().unwrap_or_default(),
        );
        if base.tags.is_empty() {
            errors.push(FieldIssue::new("tags", "at least one tag is required"));
        }
        if cs.testimonial.is_none() {
            warnings.push(FieldIssue::new("testimonial", "No testimonial"));
        }
        if cs.metrics.is_empty() {
            warnings.push(FieldIssue::new("metrics", "No metrics"));
        }
    }

    let mut result = ValidationResult::from_parts(None, errors, warnings);
    if let Some(seo) = &base.seo {
        result.absorb(validate_frontmatter(seo));
    }
    result
}

impl ContentDocument {
    /// See [`validate_document`].
    pub fn validate(&self) -> ValidationResult<()> {
        validate_document(self)
    }
}
