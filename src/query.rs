//! Listing queries, previous/next navigation, and tag filtering.
//!
//! [`ContentQuery`] is the builder every listing page goes through. It
//! always excludes drafts, whatever other filters are set, and sorts newest
//! first unless told otherwise.

use crate::locale::encode_component;
use crate::store::{ContentStore, Filter, SortDirection, SortSpec, StoreError, StoreQuery};
use crate::types::{ContentDocument, ContentKind, Lang};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    kind: ContentKind,
    wheres: Vec<(String, Value)>,
    sort: SortSpec,
    limit: Option<usize>,
    skip: usize,
}

impl ContentQuery {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            wheres: Vec::new(),
            sort: SortSpec::new("date", SortDirection::Desc),
            limit: None,
            skip: 0,
        }
    }

    /// Require `field == value`. Repeated calls are ANDed.
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.wheres.push((field.to_string(), value.into()));
        self
    }

    pub fn sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = SortSpec::new(field, direction);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// The store query this builder compiles to.
    pub fn to_store_query(&self) -> StoreQuery {
        let mut query = StoreQuery::new(self.kind).filter(Filter::ExcludeDrafts);
        for (field, value) in &self.wheres {
            query = query.filter(Filter::Eq(field.clone(), value.clone()));
        }
        query.sort = Some(self.sort.clone());
        query.skip = self.skip;
        query.limit = self.limit;
        query
    }

    pub fn fetch(&self, store: &dyn ContentStore) -> Result<Vec<ContentDocument>, StoreError> {
        store.query(&self.to_store_query())
    }
}

/// A previous/next link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentNavItem {
    pub title: String,
    pub path: String,
    pub date: String,
}

impl From<&ContentDocument> for ContentNavItem {
    fn from(doc: &ContentDocument) -> Self {
        Self {
            title: doc.title().to_string(),
            path: doc.path().to_string(),
            date: doc.date().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentNav {
    /// The closest older document.
    pub previous: Option<ContentNavItem>,
    /// The closest newer document.
    pub next: Option<ContentNavItem>,
}

/// Adjacent documents by date, optionally within one language.
///
/// Previous is the newest document dated strictly before `current`; next is
/// the oldest dated strictly after it. Both lookups run in parallel against
/// the same store.
pub fn navigation(
    store: &dyn ContentStore,
    kind: ContentKind,
    current: &ContentDocument,
    scope_lang: Option<Lang>,
) -> Result<ContentNav, StoreError> {
    let date = Value::String(current.date().to_string());
    let scoped = |query: StoreQuery| match scope_lang {
        Some(lang) => query.filter(Filter::Eq(
            "lang".to_string(),
            Value::String(lang.code().to_string()),
        )),
        None => query,
    };
    let older = scoped(
        StoreQuery::new(kind)
            .filter(Filter::ExcludeDrafts)
            .filter(Filter::Lt("date".to_string(), date.clone()))
            .sort("date", SortDirection::Desc)
            .limit(1),
    );
    let newer = scoped(
        StoreQuery::new(kind)
            .filter(Filter::ExcludeDrafts)
            .filter(Filter::Gt("date".to_string(), date))
            .sort("date", SortDirection::Asc)
            .limit(1),
    );

    let (previous, next) = rayon::join(|| store.query(&older), || store.query(&newer));
    Ok(ContentNav {
        previous: previous?.first().map(ContentNavItem::from),
        next: next?.first().map(ContentNavItem::from),
    })
}

/// Adjacent documents by position in an already-sorted list.
///
/// An unknown `current_path` yields no links.
pub fn navigation_by_index(items: &[ContentDocument], current_path: &str) -> ContentNav {
    let Some(idx) = items.iter().position(|d| d.path() == current_path) else {
        return ContentNav::default();
    };
    ContentNav {
        previous: idx
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .map(ContentNavItem::from),
        next: items.get(idx + 1).map(ContentNavItem::from),
    }
}

/// Tag filter state for a listing page, synced with a `?tag=` query param.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: Option<String>,
}

impl TagFilter {
    /// Restore state from the `tag` query parameter. Empty means none.
    pub fn from_query(tag: Option<&str>) -> Self {
        Self {
            selected: tag.filter(|t| !t.is_empty()).map(String::from),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a tag; selecting the active tag clears the filter.
    pub fn select(&mut self, tag: Option<&str>) {
        if self.selected.as_deref() == tag {
            self.selected = None;
        } else {
            self.selected = tag.map(String::from);
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// `?tag=...`, or empty when no tag is selected.
    pub fn query_string(&self) -> String {
        match &self.selected {
            Some(tag) => format!("?tag={}", encode_component(tag)),
            None => String::new(),
        }
    }

    /// Items carrying the selected tag, or all items.
    pub fn filtered<'a>(&self, items: &'a [ContentDocument]) -> Vec<&'a ContentDocument> {
        match &self.selected {
            Some(tag) => items.iter().filter(|d| d.tags().contains(tag)).collect(),
            None => items.iter().collect(),
        }
    }
}

/// Every tag used by `items`, sorted and deduplicated.
pub fn available_tags(items: &[ContentDocument]) -> Vec<String> {
    tag_counts(items).into_keys().collect()
}

pub fn tag_counts(items: &[ContentDocument]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in items.iter().flat_map(|d| d.tags()) {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::{FailingStore, blog_post, case_study, paths, with_tags};
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            blog_post("/blog/2026/jan", "Jan", "2026-01-15", Lang::En),
            blog_post("/blog/2025/dec", "Dec", "2025-12-01", Lang::En),
            blog_post("/ar/blog/2026/feb", "فبراير", "2026-02-01", Lang::Ar),
            blog_post("/blog/2026/_draft-x", "Draft", "2026-01-20", Lang::En),
            blog_post("/blog/2026/mar", "Mar", "2026-03-05", Lang::En),
        ])
    }

    // =========================================================================
    // ContentQuery
    // =========================================================================

    #[test]
    fn default_query_is_newest_first_without_drafts() {
        let docs = ContentQuery::new(ContentKind::Blog).fetch(&store()).unwrap();
        assert_eq!(
            paths(&docs),
            ["/blog/2026/mar", "/ar/blog/2026/feb", "/blog/2026/jan", "/blog/2025/dec"]
        );
    }

    #[test]
    fn where_eq_cannot_reveal_drafts() {
        let docs = ContentQuery::new(ContentKind::Blog)
            .where_eq("title", "Draft")
            .fetch(&store())
            .unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn where_clauses_are_anded() {
        let docs = ContentQuery::new(ContentKind::Blog)
            .where_eq("lang", "en")
            .where_eq("title", "Jan")
            .fetch(&store())
            .unwrap();
        assert_eq!(paths(&docs), ["/blog/2026/jan"]);
    }

    #[test]
    fn custom_sort_with_pagination() {
        let docs = ContentQuery::new(ContentKind::Blog)
            .sort("title", SortDirection::Asc)
            .skip(1)
            .limit(2)
            .fetch(&store())
            .unwrap();
        assert_eq!(paths(&docs), ["/blog/2026/jan", "/blog/2026/mar"]);
    }

    #[test]
    fn query_only_sees_its_collection() {
        let mut s = store();
        s.push(case_study("/case-studies/x", "X", "2026-01-01", Lang::En));
        let docs = ContentQuery::new(ContentKind::CaseStudy)
            .where_eq("featured", json!(false))
            .fetch(&s)
            .unwrap();
        assert_eq!(paths(&docs), ["/case-studies/x"]);
    }

    // =========================================================================
    // navigation
    // =========================================================================

    #[test]
    fn navigation_finds_adjacent_dates() {
        let s = store();
        let current = blog_post("/blog/2026/jan", "Jan", "2026-01-15", Lang::En);
        let nav = navigation(&s, ContentKind::Blog, &current, None).unwrap();
        assert_eq!(nav.previous.unwrap().path, "/blog/2025/dec");
        // The draft dated 2026-01-20 is skipped.
        assert_eq!(nav.next.unwrap().path, "/ar/blog/2026/feb");
    }

    #[test]
    fn navigation_scoped_to_language() {
        let s = store();
        let current = blog_post("/blog/2026/jan", "Jan", "2026-01-15", Lang::En);
        let nav = navigation(&s, ContentKind::Blog, &current, Some(Lang::En)).unwrap();
        assert_eq!(nav.next.unwrap().path, "/blog/2026/mar");
    }

    #[test]
    fn navigation_at_the_ends() {
        let s = store();
        let oldest = blog_post("/blog/2025/dec", "Dec", "2025-12-01", Lang::En);
        let nav = navigation(&s, ContentKind::Blog, &oldest, None).unwrap();
        assert!(nav.previous.is_none());
        assert!(nav.next.is_some());
    }

    #[test]
    fn navigation_propagates_store_errors() {
        let current = blog_post("/blog/2026/jan", "Jan", "2026-01-15", Lang::En);
        assert!(navigation(&FailingStore, ContentKind::Blog, &current, None).is_err());
    }

    #[test]
    fn navigation_by_index_uses_list_order() {
        let items = vec![
            blog_post("/a", "A", "2026-01-01", Lang::En),
            blog_post("/b", "B", "2026-01-02", Lang::En),
            blog_post("/c", "C", "2026-01-03", Lang::En),
        ];
        let nav = navigation_by_index(&items, "/b");
        assert_eq!(nav.previous.unwrap().path, "/a");
        assert_eq!(nav.next.unwrap().path, "/c");

        let first = navigation_by_index(&items, "/a");
        assert!(first.previous.is_none());
        assert_eq!(navigation_by_index(&items, "/missing"), ContentNav::default());
    }

    // =========================================================================
    // TagFilter
    // =========================================================================

    fn tagged() -> Vec<ContentDocument> {
        vec![
            with_tags(blog_post("/a", "A", "2026-01-01", Lang::En), &["rust", "seo"]),
            with_tags(blog_post("/b", "B", "2026-01-02", Lang::En), &["rust"]),
            blog_post("/c", "C", "2026-01-03", Lang::En),
        ]
    }

    #[test]
    fn tags_sorted_with_counts() {
        let items = tagged();
        assert_eq!(available_tags(&items), ["rust", "seo"]);
        let counts = tag_counts(&items);
        assert_eq!(counts["rust"], 2);
        assert_eq!(counts["seo"], 1);
    }

    #[test]
    fn select_filters_and_toggles() {
        let items = tagged();
        let mut filter = TagFilter::default();
        assert_eq!(filter.filtered(&items).len(), 3);

        filter.select(Some("seo"));
        assert_eq!(filter.filtered(&items).len(), 1);
        assert_eq!(filter.query_string(), "?tag=seo");

        filter.select(Some("seo"));
        assert_eq!(filter.selected(), None);
        assert_eq!(filter.query_string(), "");
    }

    #[test]
    fn filter_restored_from_query() {
        assert_eq!(TagFilter::from_query(Some("")), TagFilter::default());
        let mut filter = TagFilter::from_query(Some("rust"));
        assert_eq!(filter.selected(), Some("rust"));
        filter.clear();
        assert_eq!(filter.selected(), None);
    }

    #[test]
    fn query_string_encodes_tag() {
        let filter = TagFilter::from_query(Some("c++ & rust"));
        assert_eq!(filter.query_string(), "?tag=c%2B%2B%20%26%20rust");
    }
}
