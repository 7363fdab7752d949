//! Slugs, content file paths, and routes.
//!
//! Content lives under `content/` in one of two layouts, both accepted
//! everywhere a file is mapped to a route:
//!
//! ```text
//! content/blog/2026/my-post.md            → /blog/2026/my-post
//! content/blog/2026/my-post.ar.md         → /ar/blog/2026/my-post
//! content/blog/ar/2026/my-post.md         → /ar/blog/2026/my-post
//! content/case-studies/acme.md            → /case-studies/acme
//! content/case-studies/ar/acme.md         → /ar/case-studies/acme
//! ```
//!
//! New files are always written in the flat layout (language suffix on the
//! filename), which is what [`resolve_file_path`] returns.
//!
//! ## Drafts
//!
//! A leading underscore marks a draft, either on the filename stem
//! (`_draft-my-post.md`) or on any directory segment. Drafts still map to a
//! route so the store can hold them, but they never reach a published set.

use crate::types::{ContentKind, Lang};
use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("static regex"));

/// Turn a title into a URL slug.
///
/// - `"Building Type-Safe APIs with TypeScript"` → `"building-type-safe-apis-with-typescript"`
/// - `"  Hello,   World!  "` → `"hello-world"`
/// - `"--Edge--Case--"` → `"edge-case"`
///
/// Word characters are Unicode-aware, so Arabic titles keep their letters.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RUNS.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Filename extension for a language: `.ar.md` or `.md`.
pub fn content_extension(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => ".ar.md",
        Lang::En => ".md",
    }
}

/// Relative path (from the workspace root) of a new content file.
///
/// Blog posts are bucketed by the first four characters of `date`.
pub fn resolve_file_path(kind: ContentKind, slug: &str, date: &str, lang: Lang) -> String {
    let ext = content_extension(lang);
    match kind {
        ContentKind::Blog => {
            let year: String = date.chars().take(4).collect();
            format!("content/blog/{year}/{slug}{ext}")
        }
        ContentKind::CaseStudy => format!("content/case-studies/{slug}{ext}"),
    }
}

/// Outcome of a duplicate-slug scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DuplicateCheck {
    pub exists: bool,
    /// Path of the first match, relative to the workspace root.
    pub file_path: Option<String>,
}

impl DuplicateCheck {
    fn found(path: String) -> Self {
        Self {
            exists: true,
            file_path: Some(path),
        }
    }
}

/// Look for an existing file using `slug`, published or draft.
///
/// Blog posts are searched in every year directory, case studies in the
/// flat directory. For each location the published name is tried before the
/// `_draft-` name, and English before Arabic. A missing content directory
/// means no duplicate.
pub fn check_duplicate_slug(slug: &str, kind: ContentKind, workspace_root: &Path) -> DuplicateCheck {
    let patterns = [slug.to_string(), format!("_draft-{slug}")];
    let section = workspace_root.join("content").join(kind.dir_name());

    let buckets: Vec<String> = match kind {
        ContentKind::Blog => {
            let Ok(entries) = std::fs::read_dir(&section) else {
                return DuplicateCheck::default();
            };
            let mut years: Vec<String> = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            years.sort();
            years
        }
        ContentKind::CaseStudy => vec![String::new()],
    };

    for bucket in &buckets {
        let dir = if bucket.is_empty() {
            section.clone()
        } else {
            section.join(bucket)
        };
        for pattern in &patterns {
            for lang in Lang::ALL {
                let file_name = format!("{pattern}{}", content_extension(lang));
                if dir.join(&file_name).is_file() {
                    let mut rel = format!("content/{}", kind.dir_name());
                    if !bucket.is_empty() {
                        rel.push('/');
                        rel.push_str(bucket);
                    }
                    return DuplicateCheck::found(format!("{rel}/{file_name}"));
                }
            }
        }
    }
    DuplicateCheck::default()
}

pub fn is_draft_stem(stem: &str) -> bool {
    stem.starts_with('_')
}

/// True when any `/`-separated segment of `path` starts with `_`.
pub fn is_draft_path(path: &str) -> bool {
    path.split('/').any(is_draft_stem)
}

/// A content file mapped to its public route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoute {
    pub route: String,
    pub lang: Lang,
    /// Filename without language suffix and extension.
    pub stem: String,
}

/// Map a markdown file, given relative to `content/{kind}/`, to its route.
///
/// Returns `None` for non-markdown files and for paths that fit neither
/// layout.
pub fn route_for_content_file(kind: ContentKind, rel: &Path) -> Option<ContentRoute> {
    let segments: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    let (file, dirs) = segments.split_last()?;
    let base = file.strip_suffix(".md")?;

    let (dir_lang, dirs) = match dirs.split_first() {
        Some((first, rest)) if *first == "en" => (Some(Lang::En), rest),
        Some((first, rest)) if *first == "ar" => (Some(Lang::Ar), rest),
        _ => (None, dirs),
    };
    let (stem, suffix_lang) = match base.strip_suffix(".ar") {
        Some(stem) => (stem, Lang::Ar),
        None => (base, Lang::En),
    };
    let lang = dir_lang.unwrap_or(suffix_lang);
    if stem.is_empty() {
        return None;
    }

    let tail = match (kind, dirs) {
        (ContentKind::Blog, [year]) => format!("{year}/{stem}"),
        (ContentKind::CaseStudy, []) => stem.to_string(),
        _ => return None,
    };
    let prefix = if lang == Lang::Ar { "/ar" } else { "" };
    Some(ContentRoute {
        route: format!("{prefix}/{}/{tail}", kind.dir_name()),
        lang,
        stem: stem.to_string(),
    })
}
