//! The `<head>` injection boundary.
//!
//! SEO builders never write HTML themselves; they hand resolved payloads to a
//! [`HeadSink`]. A web framework adapter implements the trait to forward them
//! to its own head manager. [`Head`] is the bundled implementation: it
//! collects everything and renders a static `<head>` fragment with Maud,
//! which is what the CLI and the tests use.

use crate::seo::meta::{LinkTag, MetaTags};
use crate::types::Lang;
use maud::{Markup, PreEscaped, html};

/// Receives head payloads for one page render.
pub trait HeadSink {
    fn meta(&mut self, tags: &MetaTags);
    fn links(&mut self, links: &[LinkTag]);
    /// Sets `lang` and `dir` on the `<html>` element.
    fn html_attrs(&mut self, lang: Lang);
    /// One serialized JSON-LD object.
    fn script(&mut self, json_ld: &str);
}

/// Collects head payloads and renders them.
///
/// Later `meta` and `html_attrs` calls replace earlier ones; links and
/// scripts accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Head {
    pub meta: Option<MetaTags>,
    pub links: Vec<LinkTag>,
    pub lang: Option<Lang>,
    pub scripts: Vec<String>,
}

impl HeadSink for Head {
    fn meta(&mut self, tags: &MetaTags) {
        self.meta = Some(tags.clone());
    }

    fn links(&mut self, links: &[LinkTag]) {
        self.links.extend_from_slice(links);
    }

    fn html_attrs(&mut self, lang: Lang) {
        self.lang = Some(lang);
    }

    fn script(&mut self, json_ld: &str) {
        self.scripts.push(json_ld.to_string());
    }
}

impl Head {
    /// `lang="…" dir="…"` for the `<html>` element, or empty.
    pub fn html_attributes(&self) -> String {
        match self.lang {
            Some(lang) => format!(r#"lang="{}" dir="{}""#, lang.code(), lang.direction()),
            None => String::new(),
        }
    }

    /// Render the collected tags as a `<head>` fragment.
    pub fn render(&self) -> Markup {
        html! {
            @if let Some(m) = &self.meta {
                title { (m.document_title) }
                meta name="description" content=(m.description);
                @if !m.keywords.is_empty() {
                    meta name="keywords" content=(m.keywords.join(", "));
                }
                meta name="robots" content=(m.robots);
                meta property="og:title" content=(m.og_title);
                meta property="og:description" content=(m.og_description);
                meta property="og:image" content=(m.og_image);
                meta property="og:type" content=(m.og_type.as_str());
                @if let Some(url) = &m.og_url {
                    meta property="og:url" content=(url);
                }
                meta property="og:site_name" content=(m.og_site_name);
                meta property="og:locale" content=(m.og_locale);
                meta name="twitter:card" content=(m.twitter_card.as_str());
                meta name="twitter:title" content=(m.twitter_title);
                meta name="twitter:description" content=(m.twitter_description);
                meta name="twitter:image" content=(m.twitter_image);
                @if let Some(site) = &m.twitter_site {
                    meta name="twitter:site" content=(site);
                }
                @if let Some(creator) = &m.twitter_creator {
                    meta name="twitter:creator" content=(creator);
                }
            }
            @for l in &self.links {
                link rel=(l.rel) href=(l.href) hreflang=[l.hreflang.as_deref()];
            }
            @for json in &self.scripts {
                script type="application/ld+json" { (PreEscaped(json.replace("</", "<\\/"))) }
            }
        }
    }
}
