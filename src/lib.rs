//! # Simple Folio
//!
//! The content and SEO core of a bilingual (English/Arabic) portfolio site.
//! Markdown files with YAML frontmatter are the data source: each one is a
//! blog post or a case study, and its location decides its language and
//! route. Everything a page needs in its `<head>` (titles, descriptions,
//! Open Graph and Twitter tags, canonical and `hreflang` links, JSON-LD) is
//! derived from that content plus one site config.
//!
//! # Architecture: Load Once, Derive Per Page
//!
//! ```text
//! 1. Load      content/   →  FsStore        (frontmatter + parsed body tree)
//! 2. Narrow    FsStore    →  locale set     (active language, no drafts)
//! 3. Query     locale set →  page items     (sort, tag filter, pagination)
//! 4. Derive    item       →  read time, excerpt, slug, prev/next
//! 5. Describe  item       →  SeoMetadata + JSON-LD  →  HeadSink
//! ```
//!
//! Stages after the load are pure functions over in-memory documents, so
//! unit tests exercise them without touching the filesystem. Anything that
//! reads content goes through the [`store::ContentStore`] trait; the
//! [`store::MemoryStore`] and [`scan::FsStore`] implementations ship here.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Shared document types (`ContentDocument`, `Lang`, `ContentNode`) |
//! | [`scan`] | Filesystem store: walks `content/`, parses frontmatter and markdown |
//! | [`store`] | The `ContentStore` trait, query filters and sorting, `MemoryStore` |
//! | [`locale`] | Locale-scoped queries, translation lookup, language switching |
//! | [`query`] | Fluent query builder, previous/next navigation, tag filter |
//! | [`naming`] | Slugs, new-file paths, duplicate detection, file → route mapping |
//! | [`readtime`] | Read-time estimation with code weighting |
//! | [`cache`] | Bounded LRU + TTL cache for read-time results |
//! | [`excerpt`] | Listing excerpts from the parsed body |
//! | [`metadata`] | First-non-empty resolution of title, description, OG image |
//! | [`seo`] | Meta/link tags, page entry points, JSON-LD, validation, images |
//! | [`head`] | The `HeadSink` boundary and a Maud-rendered collecting head |
//! | [`sitemap`] | Sitemap entries with language alternates, XML rendering |
//! | [`routes`] | Prerender route discovery |
//! | [`generator`] | Frontmatter and markdown skeletons for new content, templates |
//! | [`config`] | `config.toml` loading, validation, merging with defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Path Decides the Language
//!
//! A file's language comes from where it lives (`ar/` directory or `.ar.md`
//! suffix), never from frontmatter alone. Routes, `hreflang` alternates and
//! locale filtering all agree because they read the same value. A
//! conflicting `lang` field is logged and ignored.
//!
//! ## Head Output Behind a Trait
//!
//! SEO builders never emit HTML. They hand resolved payloads to a
//! [`head::HeadSink`], which a web framework adapter can forward to its own
//! head manager. The bundled [`head::Head`] collects them and renders a
//! static fragment with [Maud](https://maud.lambda.xyz/), so interpolation
//! is escaped by construction.
//!
//! ## Soft Validation
//!
//! Content problems are findings, not failures. Validators return errors and
//! warnings side by side and never panic; a store that cannot be read
//! degrades to an empty list with the cause kept inspectable. Only the
//! `check` command turns validation errors into a non-zero exit.
//!
//! ## Drafts Stay Loaded
//!
//! A leading underscore marks a draft. Drafts are loaded like everything
//! else (so `scan` can list them) and filtered out by every published view:
//! locale queries, navigation, sitemaps and prerender routes.

pub mod cache;
pub mod config;
pub mod excerpt;
pub mod generator;
pub mod head;
pub mod locale;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod query;
pub mod readtime;
pub mod routes;
pub mod scan;
pub mod seo;
pub mod sitemap;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
