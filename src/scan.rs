//! Filesystem-backed content store.
//!
//! Loads every markdown file under `content/blog/` and
//! `content/case-studies/` into memory, once, and serves queries from that
//! snapshot.
//!
//! ## Directory Structure
//!
//! ```text
//! site/                               # Workspace root
//! ├── config.toml                     # Site configuration (optional)
//! └── content/
//!     ├── blog/
//!     │   ├── 2026/
//!     │   │   ├── my-post.md          # /blog/2026/my-post
//!     │   │   ├── my-post.ar.md       # /ar/blog/2026/my-post
//!     │   │   └── _draft-next.md      # draft, loaded but never published
//!     │   └── ar/2026/other.md        # /ar/blog/2026/other
//!     └── case-studies/
//!         ├── acme.md                 # /case-studies/acme
//!         └── acme.ar.md              # /ar/case-studies/acme
//! ```
//!
//! See [`naming`](crate::naming) for the full route mapping.
//!
//! ## Frontmatter
//!
//! Each file starts with a YAML block. `title` and `date` are required and a
//! file without them fails the load. Field names are camelCase
//! (`featuredImage`, `sameAs`, `updatedAt`). A file's language comes from its
//! location; a conflicting `lang` field is logged and ignored.
//!
//! ## Body
//!
//! The markdown body is parsed with pulldown-cmark into a [`ContentNode`]
//! tree with html-like tags (`p`, `h2`, `pre`, `code`, `li`, ...), which is
//! what excerpt extraction and read-time estimation walk.
//!
//! Files are parsed in parallel; load order is the sorted path order.

use crate::naming::{self, ContentRoute};
use crate::store::{ContentStore, StoreError};
use crate::types::{
    BlogPost, CaseStudy, ContentDocument, ContentKind, ContentNode, DocumentBase, Lang, Metric,
    SeoFrontmatter, Testimonial,
};
use gray_matter::engine::YAML;
use gray_matter::{Matter, ParsedEntity};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use rayon::prelude::*;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid frontmatter in {0}: {1}")]
    Frontmatter(PathBuf, String),
    #[error("Missing required field `{1}` in {0}")]
    MissingField(PathBuf, &'static str),
}

/// Frontmatter as authored. Everything except `title` and `date` is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Frontmatter {
    title: Option<String>,
    date: Option<String>,
    lang: Option<Lang>,
    tags: Vec<String>,
    excerpt: Option<String>,
    description: Option<String>,
    featured_image: Option<String>,
    author: Option<String>,
    updated_at: Option<String>,
    same_as: Vec<String>,
    seo: Option<SeoFrontmatter>,
    client: Option<String>,
    role: Option<String>,
    timeline: Option<String>,
    testimonial: Option<Testimonial>,
    metrics: Vec<Metric>,
    featured: bool,
    order: Option<i64>,
}

/// An in-memory snapshot of the content directory.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    docs: Vec<ContentDocument>,
}

impl FsStore {
    /// Load `root/content/`. Missing collection directories are empty.
    pub fn load(root: &Path) -> Result<Self, ScanError> {
        let content = root.join("content");
        let mut files = Vec::new();
        for kind in ContentKind::ALL {
            files.extend(collect_files(&content.join(kind.dir_name()), kind)?);
        }

        let docs = files
            .par_iter()
            .map(|(kind, route, path)| load_document(&content, *kind, route, path))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = docs.len(), root = %root.display(), "loaded content");
        Ok(Self { docs })
    }

    pub fn documents(&self) -> &[ContentDocument] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl ContentStore for FsStore {
    fn all(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, StoreError> {
        Ok(self
            .docs
            .iter()
            .filter(|d| d.kind() == kind)
            .cloned()
            .collect())
    }
}

fn collect_files(
    dir: &Path,
    kind: ContentKind,
) -> Result<Vec<(ContentKind, ContentRoute, PathBuf)>, ScanError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "content directory missing");
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let rel = path.strip_prefix(dir).unwrap_or(path);
        if rel
            .to_string_lossy()
            .split(['/', '\\'])
            .any(|s| s.starts_with('.'))
        {
            continue;
        }
        match naming::route_for_content_file(kind, rel) {
            Some(route) => files.push((kind, route, path.to_path_buf())),
            None => debug!(path = %path.display(), "skipping file outside content layout"),
        }
    }
    Ok(files)
}

fn load_document(
    content_dir: &Path,
    kind: ContentKind,
    route: &ContentRoute,
    path: &Path,
) -> Result<ContentDocument, ScanError> {
    let raw = std::fs::read_to_string(path)?;
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<Frontmatter> = matter
        .parse(&raw)
        .map_err(|e| ScanError::Frontmatter(path.to_path_buf(), e.to_string()))?;
    let fm = parsed.data.unwrap_or_default();

    let title = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ScanError::MissingField(path.to_path_buf(), "title"))?;
    let date = fm
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ScanError::MissingField(path.to_path_buf(), "date"))?;
    if let Some(lang) = fm.lang
        && lang != route.lang
    {
        warn!(path = %path.display(), declared = %lang, located = %route.lang, "frontmatter lang disagrees with file location");
    }

    let rel = path.strip_prefix(content_dir).unwrap_or(path);
    let base = DocumentBase {
        id: document_id(rel, &raw),
        path: route.route.clone(),
        stem: route.stem.clone(),
        title,
        date,
        lang: route.lang,
        tags: fm.tags,
        excerpt: fm.excerpt,
        description: fm.description,
        featured_image: fm.featured_image,
        author: fm.author,
        updated_at: fm.updated_at,
        same_as: fm.same_as,
        seo: fm.seo,
        body: Some(markdown_to_tree(&parsed.content)),
    };

    Ok(match kind {
        ContentKind::Blog => ContentDocument::BlogPost(BlogPost { base }),
        ContentKind::CaseStudy => ContentDocument::CaseStudy(CaseStudy {
            base,
            client: fm.client.unwrap_or_default(),
            role: fm.role.unwrap_or_default(),
            timeline: fm.timeline.unwrap_or_default(),
            testimonial: fm.testimonial,
            metrics: fm.metrics,
            featured: fm.featured,
            order: fm.order,
        }),
    })
}

/// SHA-256 over the relative path and file contents, hex encoded.
pub fn document_id(rel: &Path, contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rel.to_string_lossy().as_bytes());
    hasher.update(b"\0");
    hasher.update(contents.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn element_name(tag: &Tag) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => match level {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        },
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Link { .. } => "a",
        Tag::Image { .. } => "img",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        _ => "div",
    }
}

/// Parse a markdown body into a content tree.
///
/// Fenced and indented code blocks become `pre > code`; inline code becomes
/// `code`. Line breaks become single spaces and raw HTML is dropped.
pub fn markdown_to_tree(markdown: &str) -> ContentNode {
    let mut stack = vec![ContentNode::root(Vec::new())];

    fn close(stack: &mut Vec<ContentNode>) {
        if stack.len() > 1
            && let Some(node) = stack.pop()
            && let Some(parent) = stack.last_mut()
        {
            parent.children.push(node);
        }
    }

    fn append(stack: &mut [ContentNode], node: ContentNode) {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => {
                stack.push(ContentNode::element(element_name(&tag), Vec::new()));
                if matches!(tag, Tag::CodeBlock(_)) {
                    stack.push(ContentNode::element("code", Vec::new()));
                }
            }
            Event::End(end) => {
                if matches!(end, TagEnd::CodeBlock) {
                    close(&mut stack);
                }
                close(&mut stack);
            }
            Event::Text(text) => append(&mut stack, ContentNode::text(&text)),
            Event::Code(code) => append(
                &mut stack,
                ContentNode::element("code", vec![ContentNode::text(&code)]),
            ),
            Event::SoftBreak | Event::HardBreak => append(&mut stack, ContentNode::text(" ")),
            Event::Rule => append(&mut stack, ContentNode::element("hr", Vec::new())),
            _ => {}
        }
    }
    while stack.len() > 1 {
        close(&mut stack);
    }
    stack.pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{content_tree, markdown, paths, write_file};
    use tempfile::TempDir;

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_finds_both_layouts_and_kinds() {
        let tmp = content_tree();
        let store = FsStore::load(tmp.path()).unwrap();
        let blog = store.all(ContentKind::Blog).unwrap();
        let mut routes = paths(&blog);
        routes.sort();
        assert_eq!(
            routes,
            [
                "/ar/blog/2026/first",
                "/ar/blog/2026/only-ar",
                "/blog/2025/older",
                "/blog/2026/_draft-wip",
                "/blog/2026/first",
            ]
        );
        assert_eq!(store.all(ContentKind::CaseStudy).unwrap().len(), 1);
    }

    #[test]
    fn missing_content_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(FsStore::load(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn frontmatter_fields_are_mapped() {
        let tmp = content_tree();
        let store = FsStore::load(tmp.path()).unwrap();
        let first = store
            .documents()
            .iter()
            .find(|d| d.path() == "/blog/2026/first")
            .unwrap();
        assert_eq!(first.title(), "First Post");
        assert_eq!(first.date(), "2026-01-10");
        assert_eq!(first.lang(), Lang::En);
        assert_eq!(first.tags(), ["rust", "seo"]);
        assert_eq!(first.base().same_as, ["/ar/blog/2026/first"]);
        assert_eq!(first.base().stem, "first");
        assert_eq!(first.base().id.len(), 64);
    }

    #[test]
    fn case_study_fields_are_mapped() {
        let tmp = content_tree();
        let store = FsStore::load(tmp.path()).unwrap();
        let ContentDocument::CaseStudy(cs) = &store.all(ContentKind::CaseStudy).unwrap()[0] else {
            panic!("expected a case study");
        };
        assert_eq!(cs.client, "Acme");
        assert_eq!(cs.role, "Lead Designer");
        assert!(cs.featured);
        assert_eq!(cs.order, Some(1));
        assert_eq!(cs.base.featured_image.as_deref(), Some("/images/acme.png"));
    }

    #[test]
    fn language_directory_sets_lang() {
        let tmp = content_tree();
        let store = FsStore::load(tmp.path()).unwrap();
        let doc = store
            .documents()
            .iter()
            .find(|d| d.path() == "/ar/blog/2026/only-ar")
            .unwrap();
        assert_eq!(doc.lang(), Lang::Ar);
    }

    #[test]
    fn drafts_are_loaded_and_marked() {
        let tmp = content_tree();
        let store = FsStore::load(tmp.path()).unwrap();
        let drafts: Vec<_> = store.documents().iter().filter(|d| d.is_draft()).collect();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].path(), "/blog/2026/_draft-wip");
    }

    #[test]
    fn missing_title_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "content/blog/2026/x.md",
            "---\ndate: \"2026-01-01\"\n---\nbody\n",
        );
        let err = FsStore::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingField(_, "title")));
    }

    #[test]
    fn missing_date_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "content/case-studies/x.md", "---\ntitle: X\n---\n");
        let err = FsStore::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingField(_, "date")));
    }

    #[test]
    fn stray_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "content/blog/README.md", "notes");
        write_file(tmp.path(), "content/blog/2026/.hidden.md", "x");
        write_file(tmp.path(), "content/blog/2026/image.png", "x");
        write_file(
            tmp.path(),
            "content/blog/2026/ok.md",
            &markdown("Ok", "2026-01-01", "", "Body"),
        );
        let store = FsStore::load(tmp.path()).unwrap();
        assert_eq!(paths(store.documents()), ["/blog/2026/ok"]);
    }

    #[test]
    fn ids_change_with_contents() {
        let a = document_id(Path::new("blog/2026/a.md"), "one");
        let b = document_id(Path::new("blog/2026/a.md"), "two");
        let c = document_id(Path::new("blog/2026/b.md"), "one");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, document_id(Path::new("blog/2026/a.md"), "one"));
    }

    // =========================================================================
    // markdown_to_tree
    // =========================================================================

    #[test]
    fn tree_has_paragraphs_and_headings() {
        let tree = markdown_to_tree("# Title\n\nSome *emphasis* here.\n");
        assert_eq!(tree.kind, "root");
        assert_eq!(tree.children[0].tag(), Some("h1"));
        let p = &tree.children[1];
        assert_eq!(p.tag(), Some("p"));
        assert_eq!(p.children[0].value.as_deref(), Some("Some "));
        assert_eq!(p.children[1].tag(), Some("em"));
    }

    #[test]
    fn code_block_is_pre_code() {
        let tree = markdown_to_tree("```rust\nfn main() {}\n```\n");
        let pre = &tree.children[0];
        assert_eq!(pre.tag(), Some("pre"));
        assert_eq!(pre.children[0].tag(), Some("code"));
        assert_eq!(pre.children[0].children[0].value.as_deref(), Some("fn main() {}\n"));
    }

    #[test]
    fn inline_code_and_breaks() {
        let tree = markdown_to_tree("use `cargo`\nnow\n");
        let p = &tree.children[0];
        assert_eq!(p.children[1].tag(), Some("code"));
        assert!(p.children.iter().any(|c| c.value.as_deref() == Some(" ")));
    }

    #[test]
    fn lists_map_to_ul_and_ol() {
        let tree = markdown_to_tree("- a\n- b\n\n1. one\n");
        assert_eq!(tree.children[0].tag(), Some("ul"));
        assert_eq!(tree.children[0].children.len(), 2);
        assert_eq!(tree.children[1].tag(), Some("ol"));
    }
}
