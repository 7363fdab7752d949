//! Locale-aware content resolution.
//!
//! The active locale decides which documents a listing shows: only those
//! whose `lang` matches, and never drafts. Translations are linked through
//! each document's `sameAs` list; a path containing `/ar/` is the Arabic
//! sibling, anything else the English one.
//!
//! Store failures do not break a page. [`LocaleResolver::query_by_locale`]
//! returns them as an [`EmptyFallback`] so tests can inspect the cause, and
//! [`LocaleResolver::query_by_locale_or_empty`] degrades them to an empty
//! listing with a warning.

use crate::store::{ContentStore, Filter, StoreError, StoreQuery};
use crate::types::{ContentDocument, ContentKind, Lang};
use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

static LOCALIZED_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(en|ar)/\d{4}/").expect("static regex"));

/// A store query failed; the caller should render an empty listing.
#[derive(Error, Debug)]
#[error("content query failed, falling back to an empty list: {source}")]
pub struct EmptyFallback {
    #[source]
    pub source: StoreError,
}

impl EmptyFallback {
    pub fn into_documents(self) -> Vec<ContentDocument> {
        Vec::new()
    }
}

/// Resolves content for one active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleResolver {
    pub locale: Lang,
    /// Year used to build new content paths.
    pub year: i32,
}

impl LocaleResolver {
    /// Resolver for `locale` in the current UTC year.
    pub fn new(locale: Lang) -> Self {
        Self::with_year(locale, chrono::Utc::now().year())
    }

    pub fn with_year(locale: Lang, year: i32) -> Self {
        Self { locale, year }
    }

    /// `{locale}/{year}/{slug}`, unless `slug` is already localized.
    pub fn content_path(&self, slug: &str) -> String {
        if LOCALIZED_SLUG.is_match(slug) {
            return slug.to_string();
        }
        format!("{}/{}/{}", self.locale, self.year, slug)
    }

    /// Published documents of `kind` in the active locale, in store order.
    pub fn query_by_locale(
        &self,
        store: &dyn ContentStore,
        kind: ContentKind,
    ) -> Result<Vec<ContentDocument>, EmptyFallback> {
        let query = StoreQuery::new(kind)
            .filter(Filter::Eq(
                "lang".to_string(),
                serde_json::Value::String(self.locale.code().to_string()),
            ))
            .filter(Filter::ExcludeDrafts);
        let docs = store
            .query(&query)
            .map_err(|source| EmptyFallback { source })?;
        debug!(locale = %self.locale, %kind, count = docs.len(), "resolved content by locale");
        Ok(docs)
    }

    pub fn query_by_locale_or_empty(
        &self,
        store: &dyn ContentStore,
        kind: ContentKind,
    ) -> Vec<ContentDocument> {
        self.query_by_locale(store, kind).unwrap_or_else(|fallback| {
            warn!(locale = %self.locale, %kind, "{fallback}");
            fallback.into_documents()
        })
    }
}

fn translation_path(lang: Lang, doc: &ContentDocument) -> Option<&str> {
    doc.base()
        .same_as
        .iter()
        .map(String::as_str)
        .find(|p| Lang::from_path(p) == lang)
}

/// Whether `doc` links a translation in `lang`.
pub fn has_translation(lang: Lang, doc: &ContentDocument) -> bool {
    translation_path(lang, doc).is_some()
}

/// A language a document can be read in, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableLanguage {
    pub lang: Lang,
    pub path: String,
}

/// The document itself first, then one entry per `sameAs` path.
pub fn available_languages(doc: &ContentDocument) -> Vec<AvailableLanguage> {
    let mut langs = vec![AvailableLanguage {
        lang: doc.lang(),
        path: doc.path().to_string(),
    }];
    langs.extend(doc.base().same_as.iter().map(|p| AvailableLanguage {
        lang: Lang::from_path(p),
        path: p.clone(),
    }));
    langs
}

/// Where a language switch should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSwitch {
    /// Already in the requested language.
    Stay,
    Translation(String),
    /// No translation; the URL of the not-available page.
    NotAvailable(String),
}

pub fn switch_target(new_lang: Lang, doc: &ContentDocument) -> LanguageSwitch {
    if doc.lang() == new_lang {
        return LanguageSwitch::Stay;
    }
    match translation_path(new_lang, doc) {
        Some(path) => LanguageSwitch::Translation(path.to_string()),
        None => LanguageSwitch::NotAvailable(not_available_url(new_lang, doc.path())),
    }
}

/// `/not-available?lang={lang}&content={encoded path}`.
pub fn not_available_url(lang: Lang, content_path: &str) -> String {
    format!(
        "/not-available?lang={}&content={}",
        lang,
        encode_component(content_path)
    )
}

/// Percent-encode a URL query component (spaces as `%20`).
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Receives navigation requests at the routing boundary.
pub trait Navigator {
    fn push(&mut self, url: &str);
}

/// Navigate to the translation of `doc` in `new_lang`, or to the
/// not-available page. Does nothing if `doc` is already in `new_lang`.
pub fn switch_content_language(new_lang: Lang, doc: &ContentDocument, nav: &mut impl Navigator) {
    match switch_target(new_lang, doc) {
        LanguageSwitch::Stay => {}
        LanguageSwitch::Translation(url) | LanguageSwitch::NotAvailable(url) => nav.push(&url),
    }
}

/// The same route in another locale. English is unprefixed, every other
/// locale is prefixed with its code.
pub fn switch_locale_path(path: &str, lang: Lang) -> String {
    let bare = match path.strip_prefix("/ar") {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    };
    match lang {
        Lang::En => bare.to_string(),
        Lang::Ar if bare == "/" => "/ar".to_string(),
        Lang::Ar => format!("/ar{bare}"),
    }
}

/// Switch the site locale from a user-supplied code.
///
/// Unknown codes are logged and ignored. Returns the new locale when a
/// navigation was issued.
pub fn set_locale(code: &str, current_path: &str, nav: &mut impl Navigator) -> Option<Lang> {
    let lang = match code.parse::<Lang>() {
        Ok(lang) => lang,
        Err(e) => {
            warn!("{e}; staying on current locale");
            return None;
        }
    };
    nav.push(&switch_locale_path(current_path, lang));
    Some(lang)
}
