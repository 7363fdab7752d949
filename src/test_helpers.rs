//! Shared test utilities.
//!
//! Document builders with sensible defaults, a store that always fails, a
//! navigator that records pushes, and a small on-disk content tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = MemoryStore::new(vec![
//!     blog_post("/blog/2026/a", "A", "2026-01-01", Lang::En),
//!     with_same_as(blog_post("/ar/blog/2026/a", "أ", "2026-01-01", Lang::Ar), &["/blog/2026/a"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::locale::Navigator;
use crate::store::{ContentStore, StoreError};
use crate::types::{
    BlogPost, CaseStudy, ContentDocument, ContentKind, DocumentBase, Lang,
};

// =========================================================================
// Document builders
// =========================================================================

fn base(path: &str, title: &str, date: &str, lang: Lang) -> DocumentBase {
    let stem = path.rsplit('/').next().unwrap_or_default().to_string();
    DocumentBase {
        id: path.to_string(),
        path: path.to_string(),
        stem,
        title: title.to_string(),
        date: date.to_string(),
        lang,
        ..Default::default()
    }
}

pub fn blog_post(path: &str, title: &str, date: &str, lang: Lang) -> ContentDocument {
    ContentDocument::BlogPost(BlogPost {
        base: base(path, title, date, lang),
    })
}

/// A case study with every required field filled in.
pub fn case_study(path: &str, title: &str, date: &str, lang: Lang) -> ContentDocument {
    let mut base = base(path, title, date, lang);
    base.tags = vec!["design".to_string()];
    base.featured_image = Some("/images/case.png".to_string());
    ContentDocument::CaseStudy(CaseStudy {
        base,
        client: "Acme".to_string(),
        role: "Lead".to_string(),
        timeline: "3 months".to_string(),
        ..Default::default()
    })
}

pub fn with_same_as(mut doc: ContentDocument, same_as: &[&str]) -> ContentDocument {
    base_mut(&mut doc).same_as = same_as.iter().map(|s| s.to_string()).collect();
    doc
}

pub fn with_tags(mut doc: ContentDocument, tags: &[&str]) -> ContentDocument {
    base_mut(&mut doc).tags = tags.iter().map(|s| s.to_string()).collect();
    doc
}

pub fn base_mut(doc: &mut ContentDocument) -> &mut DocumentBase {
    match doc {
        ContentDocument::BlogPost(p) => &mut p.base,
        ContentDocument::CaseStudy(c) => &mut c.base,
    }
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn paths(docs: &[ContentDocument]) -> Vec<&str> {
    docs.iter().map(|d| d.path()).collect()
}

// =========================================================================
// Collaborator doubles
// =========================================================================

/// A store whose every call fails.
pub struct FailingStore;

impl ContentStore for FailingStore {
    fn all(&self, _kind: ContentKind) -> Result<Vec<ContentDocument>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

/// Records every navigation request.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub pushed: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn push(&mut self, url: &str) {
        self.pushed.push(url.to_string());
    }
}

// =========================================================================
// On-disk content
// =========================================================================

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

pub fn markdown(title: &str, date: &str, extra: &str, body: &str) -> String {
    format!("---\ntitle: \"{title}\"\ndate: \"{date}\"\n{extra}---\n\n{body}\n")
}

/// A small bilingual content tree in both layouts, with one draft.
///
/// ```text
/// content/blog/2026/first.md         (en)
/// content/blog/2026/first.ar.md      (ar, sameAs first)
/// content/blog/2025/older.md         (en)
/// content/blog/2026/_draft-wip.md    (draft)
/// content/blog/ar/2026/only-ar.md    (ar, language-directory layout)
/// content/case-studies/acme.md       (en case study)
/// ```
pub fn content_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        root,
        "content/blog/2026/first.md",
        &markdown(
            "First Post",
            "2026-01-10",
            "tags: [rust, seo]\nsameAs: [\"/ar/blog/2026/first\"]\n",
            "## Intro\n\nHello from the first post.",
        ),
    );
    write_file(
        root,
        "content/blog/2026/first.ar.md",
        &markdown(
            "المقالة الأولى",
            "2026-01-10",
            "lang: ar\nsameAs: [\"/blog/2026/first\"]\n",
            "مرحبا بكم.",
        ),
    );
    write_file(
        root,
        "content/blog/2025/older.md",
        &markdown("Older Post", "2025-11-02", "tags: [rust]\n", "Older text."),
    );
    write_file(
        root,
        "content/blog/2026/_draft-wip.md",
        &markdown("Work in progress", "2026-02-01", "", "Not yet."),
    );
    write_file(
        root,
        "content/blog/ar/2026/only-ar.md",
        &markdown("فقط بالعربية", "2026-03-01", "", "نص."),
    );
    write_file(
        root,
        "content/case-studies/acme.md",
        &markdown(
            "Acme Redesign",
            "2025-06-01",
            "client: Acme\nrole: Lead Designer\ntimeline: 6 months\ntags: [design]\nfeaturedImage: /images/acme.png\nfeatured: true\norder: 1\n",
            "Case study body.",
        ),
    );
    tmp
}
