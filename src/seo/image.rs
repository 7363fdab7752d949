//! Image helpers for social cards and responsive markup.

use super::validate::{ImageCheck, OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH, validate_image_seo};
use crate::metadata;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

pub use super::meta::is_absolute_url;

/// Widths emitted by [`generate_srcset`] when none are given.
pub const SRCSET_WIDTHS: [u32; 6] = [640, 750, 828, 1080, 1200, 1920];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
}

/// `seo.ogImage` → `featuredImage` → `default_image`, first non-blank.
pub fn resolve_og_image(
    seo_og_image: Option<&str>,
    featured_image: Option<&str>,
    default_image: &str,
) -> String {
    metadata::resolve(&[seo_og_image, featured_image])
        .unwrap_or_else(|| default_image.to_string())
}

/// Fill missing dimensions with the OG defaults and log validation issues.
///
/// Never fails: errors are logged at warn, advisories at debug.
pub fn build_image_metadata(
    src: &str,
    alt: &str,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<ImageFormat>,
) -> ImageMetadata {
    let image = ImageMetadata {
        src: src.to_string(),
        alt: alt.to_string(),
        width: width.filter(|w| *w > 0).unwrap_or(OG_IMAGE_WIDTH),
        height: height.filter(|h| *h > 0).unwrap_or(OG_IMAGE_HEIGHT),
        format,
    };

    let result = validate_image_seo(&ImageCheck {
        src: &image.src,
        alt: Some(&image.alt),
        width: Some(image.width),
        height: Some(image.height),
    });
    for issue in &result.errors {
        warn!(src = %image.src, "image: {issue}");
    }
    for issue in &result.warnings {
        debug!(src = %image.src, "image: {issue}");
    }
    image
}

/// `base-{w}{ext} {w}w` for each width, comma-separated.
///
/// The extension is taken from the final path segment only, so dots in
/// directory names are left alone.
pub fn generate_srcset(src: &str, widths: &[u32]) -> String {
    let file_start = src.rfind('/').map_or(0, |i| i + 1);
    let (base, ext) = match src[file_start..].rfind('.') {
        Some(dot) => src.split_at(file_start + dot),
        None => (src, ""),
    };
    widths
        .iter()
        .map(|w| format!("{base}-{w}{ext} {w}w"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Readable alt text from a filename: extension dropped, `-`/`_` become
/// spaces, each word capitalized.
///
/// ```text
/// /images/hero-banner_v2.png  →  "Hero Banner V2"
/// ```
pub fn alt_text_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
