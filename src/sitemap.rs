//! Sitemap entries and `sitemap.xml` rendering.
//!
//! Section indexes are listed first, then every published blog post and
//! case study. Each content entry carries `hreflang` alternates: its own
//! language plus every path in `sameAs`.

use crate::seo::meta::absolute_url;
use crate::store::{ContentStore, Filter, StoreError, StoreQuery};
use crate::types::{ContentDocument, ContentKind, Lang};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapAlternate {
    pub lang: Lang,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<SitemapAlternate>,
}

fn section(loc: &str, priority: f32) -> SitemapEntry {
    SitemapEntry {
        loc: loc.to_string(),
        lastmod: None,
        changefreq: ChangeFreq::Weekly,
        priority,
        alternates: Vec::new(),
    }
}

/// The entry for one document. Blog posts are monthly at 0.8, case studies
/// yearly at 0.9.
pub fn document_entry(doc: &ContentDocument) -> SitemapEntry {
    let (changefreq, priority) = match doc.kind() {
        ContentKind::Blog => (ChangeFreq::Monthly, 0.8),
        ContentKind::CaseStudy => (ChangeFreq::Yearly, 0.9),
    };
    let mut alternates = vec![SitemapAlternate {
        lang: doc.lang(),
        href: doc.path().to_string(),
    }];
    alternates.extend(doc.base().same_as.iter().map(|path| SitemapAlternate {
        lang: Lang::from_path(path),
        href: path.clone(),
    }));
    SitemapEntry {
        loc: doc.path().to_string(),
        lastmod: Some(doc.date().to_string()).filter(|d| !d.is_empty()),
        changefreq,
        priority,
        alternates,
    }
}

/// All sitemap entries: `/`, `/blog`, `/case-studies`, then published
/// documents of both kinds in store order.
pub fn sitemap_entries(store: &dyn ContentStore) -> Result<Vec<SitemapEntry>, StoreError> {
    let mut entries = vec![
        section("/", 1.0),
        section("/blog", 0.9),
        section("/case-studies", 0.9),
    ];
    for kind in ContentKind::ALL {
        let docs = StoreQuery::new(kind)
            .filter(Filter::ExcludeDrafts)
            .apply(store.all(kind)?);
        debug!(%kind, count = docs.len(), "sitemap entries");
        entries.extend(docs.iter().map(document_entry));
    }
    Ok(entries)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `sitemap.xml` with absolute URLs and `xhtml:link` alternates.
pub fn render_xml(entries: &[SitemapEntry], origin: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&absolute_url(&entry.loc, origin))
        ));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        for alt in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                alt.lang,
                escape_xml(&absolute_url(&alt.href, origin))
            ));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::{FailingStore, blog_post, case_study, with_same_as};

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            with_same_as(
                blog_post("/blog/2026/a", "A", "2026-01-10", Lang::En),
                &["/ar/blog/2026/a"],
            ),
            blog_post("/blog/2026/_draft-b", "B", "2026-01-11", Lang::En),
            case_study("/ar/case-studies/x", "X", "2025-03-01", Lang::Ar),
        ])
    }

    #[test]
    fn sections_come_first() {
        let entries = sitemap_entries(&store()).unwrap();
        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            ["/", "/blog", "/case-studies", "/blog/2026/a", "/ar/case-studies/x"]
        );
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].changefreq, ChangeFreq::Weekly);
    }

    #[test]
    fn blog_and_case_study_frequencies() {
        let entries = sitemap_entries(&store()).unwrap();
        assert_eq!(entries[3].changefreq, ChangeFreq::Monthly);
        assert_eq!(entries[3].priority, 0.8);
        assert_eq!(entries[3].lastmod.as_deref(), Some("2026-01-10"));
        assert_eq!(entries[4].changefreq, ChangeFreq::Yearly);
        assert_eq!(entries[4].priority, 0.9);
    }

    #[test]
    fn alternates_include_self_and_same_as() {
        let entries = sitemap_entries(&store()).unwrap();
        let alts: Vec<_> = entries[3].alternates.iter().map(|a| (a.lang, a.href.as_str())).collect();
        assert_eq!(alts, [(Lang::En, "/blog/2026/a"), (Lang::Ar, "/ar/blog/2026/a")]);
        assert_eq!(entries[4].alternates[0].lang, Lang::Ar);
    }

    #[test]
    fn store_failure_propagates() {
        assert!(sitemap_entries(&FailingStore).is_err());
    }

    #[test]
    fn xml_has_absolute_urls_and_alternates() {
        let entries = sitemap_entries(&store()).unwrap();
        let xml = render_xml(&entries, "https://me.dev/");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://me.dev/</loc>"));
        assert!(xml.contains("<loc>https://me.dev/blog/2026/a</loc>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="ar" href="https://me.dev/ar/blog/2026/a"/>"#
        ));
        assert_eq!(xml.matches("<url>").count(), 5);
    }

    #[test]
    fn xml_escapes_special_characters() {
        let entry = SitemapEntry {
            loc: "/blog/a&b".into(),
            lastmod: None,
            changefreq: ChangeFreq::Monthly,
            priority: 0.8,
            alternates: Vec::new(),
        };
        let xml = render_xml(&[entry], "https://me.dev");
        assert!(xml.contains("/blog/a&amp;b"));
        assert!(!xml.contains("<lastmod>"));
    }
}
