use clap::{Parser, Subcommand};
use simple_folio::generator::{self, RenderMode};
use simple_folio::head::Head;
use simple_folio::naming;
use simple_folio::output::{self, DocumentSummary};
use simple_folio::readtime::{ReadTimeEstimator, ReadTimeInput};
use simple_folio::scan::FsStore;
use simple_folio::seo::page::{ContentSeoOptions, HomepageOptions};
use simple_folio::seo::meta::OgType;
use simple_folio::seo::schema::{self, PersonInput};
use simple_folio::seo::{content_seo, homepage_seo};
use simple_folio::types::{
    BlogPost, CaseStudy, ContentDocument, ContentKind, DocumentBase, Lang,
};
use simple_folio::{config, excerpt, routes, sitemap};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Bilingual content and SEO pipeline for portfolio sites")]
#[command(long_about = "\
Bilingual content and SEO pipeline for portfolio sites

Content lives in markdown files with YAML frontmatter. English is served
without a prefix, Arabic under /ar/.

Content structure:

  site/
  ├── config.toml                    # Site config (optional)
  └── content/
      ├── blog/
      │   ├── 2026/
      │   │   ├── my-post.md         # /blog/2026/my-post
      │   │   ├── my-post.ar.md      # /ar/blog/2026/my-post
      │   │   └── _draft-next.md     # draft: loaded, never published
      │   └── ar/2026/other.md       # /ar/blog/2026/other
      └── case-studies/
          ├── acme.md                # /case-studies/acme
          └── ar/acme.md             # /ar/case-studies/acme

Metadata resolution (first non-empty wins):
  Title:       seo.title → title
  Description: seo.description → excerpt → description
  OG image:    seo.ogImage → featuredImage → site.default_og_image

Set RUST_LOG=debug for detailed logs.
Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root (holds config.toml and content/)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every document with its route, read time and excerpt
    Scan,
    /// Validate every document; fails if any has errors
    Check,
    /// Print the slug for a title
    Slug { title: String },
    /// Print the file path a new document would be written to
    Path {
        kind: ContentKind,
        title: String,
        #[arg(long, default_value = "en")]
        lang: Lang,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Report whether a slug is already in use
    CheckSlug { kind: ContentKind, slug: String },
    /// Print the <head> fragment for a route
    Meta { route: String },
    /// List every route a static build must prerender
    Routes,
    /// Print sitemap.xml
    Sitemap,
    /// Create a new document skeleton
    New {
        kind: ContentKind,
        title: String,
        #[arg(long, default_value = "en")]
        lang: Lang,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Template id (blog-default, blog-tutorial, case-study-default)
        #[arg(long)]
        template: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let root = cli.root.as_path();

    match cli.command {
        Command::Scan => {
            let config = config::load_config(root)?;
            let store = FsStore::load(root)?;
            let estimator = ReadTimeEstimator::new(config.read_time_cache());
            let options = config.read_time_options();
            let summaries: Vec<DocumentSummary> = store
                .documents()
                .iter()
                .map(|doc| DocumentSummary {
                    doc,
                    read_minutes: estimator.calculate(
                        &ReadTimeInput::Parsed {
                            id: &doc.base().id,
                            body: doc.base().body.as_ref(),
                        },
                        &options,
                    ),
                    excerpt: excerpt::excerpt(doc, config.excerpt.max_length),
                })
                .collect();
            output::print_scan_output(&summaries);
            println!("Read time: {}", estimator.cache().stats());
        }
        Command::Check => {
            config::load_config(root)?;
            let store = FsStore::load(root)?;
            let results: Vec<_> = store
                .documents()
                .iter()
                .map(|doc| (doc, doc.validate()))
                .collect();
            output::print_check_output(&results);
            let failed = results.iter().filter(|(_, r)| !r.success).count();
            if failed > 0 {
                return Err(format!("{failed} document(s) failed validation").into());
            }
        }
        Command::Slug { title } => {
            println!("{}", naming::generate_slug(&title));
        }
        Command::Path {
            kind,
            title,
            lang,
            date,
        } => {
            let slug = naming::generate_slug(&title);
            let date = date.unwrap_or_else(today);
            println!("{}", naming::resolve_file_path(kind, &slug, &date, lang));
        }
        Command::CheckSlug { kind, slug } => {
            let check = naming::check_duplicate_slug(&slug, kind, root);
            println!("{}", output::format_duplicate_check(&slug, &check));
        }
        Command::Meta { route } => {
            let config = config::load_config(root)?;
            let mut head = Head::default();
            let bare = simple_folio::locale::switch_locale_path(&route, Lang::En);
            if bare == "/" {
                let lang = Lang::from_path(&route);
                homepage_seo(
                    &HomepageOptions {
                        lang: Some(lang),
                        ..Default::default()
                    },
                    &config,
                    &mut head,
                );
                let person = schema::person(
                    &PersonInput {
                        name: config.site.author.clone(),
                        description: Some(config.site.description.clone()),
                        job_title: Some(config.site.tagline.clone()),
                        url: Some(config.site.url.clone()),
                        ..Default::default()
                    },
                    config.origin(),
                );
                schema::emit(&person, &mut head)?;
            } else {
                let store = FsStore::load(root)?;
                let doc = store
                    .documents()
                    .iter()
                    .find(|d| d.path() == route)
                    .ok_or_else(|| format!("no document at route {route}"))?;
                let options = ContentSeoOptions {
                    og_type: Some(OgType::Article),
                    ..Default::default()
                };
                content_seo(doc, &options, &config, &mut head);
                for data in schema::document_structured_data(doc, &config) {
                    schema::emit(&data, &mut head)?;
                }
            }
            output::print_head(&head);
        }
        Command::Routes => {
            output::print_routes(&routes::prerender_routes(root));
        }
        Command::Sitemap => {
            let config = config::load_config(root)?;
            let store = FsStore::load(root)?;
            let entries = sitemap::sitemap_entries(&store)?;
            print!("{}", sitemap::render_xml(&entries, config.origin()));
        }
        Command::New {
            kind,
            title,
            lang,
            date,
            template,
        } => {
            let config = config::load_config(root)?;
            let slug = naming::generate_slug(&title);
            let check = naming::check_duplicate_slug(&slug, kind, root);
            if check.exists {
                return Err(output::format_duplicate_check(&slug, &check).into());
            }

            let template_id = template.unwrap_or_else(|| generator::default_template(kind).into());
            let template = generator::template_by_id(&template_id)
                .ok_or_else(|| format!("unknown template `{template_id}`"))?;

            let date = date.unwrap_or_else(today);
            let rel = naming::resolve_file_path(kind, &slug, &date, lang);
            let base = DocumentBase {
                title,
                date,
                lang,
                author: Some(config.site.author.clone()),
                ..Default::default()
            };
            let doc = match kind {
                ContentKind::Blog => ContentDocument::BlogPost(BlogPost { base }),
                ContentKind::CaseStudy => ContentDocument::CaseStudy(CaseStudy {
                    base,
                    ..Default::default()
                }),
            };
            let contents = template.render(&doc, RenderMode::MetadataOnly, &BTreeMap::new())?;

            let path = root.join(&rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, contents)?;
            info!(path = %path.display(), template = %template.id, "created document");
            println!("{rel}");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
