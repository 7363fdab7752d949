//! The content store boundary.
//!
//! Everything above this module reads documents through [`ContentStore`]: a
//! synchronous, read-only, queryable collection of [`ContentDocument`]s per
//! [`ContentKind`]. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: a vector of documents, used by tests and by callers
//!   that assemble content themselves.
//! - [`FsStore`](crate::scan::FsStore): markdown files with YAML frontmatter
//!   loaded from a `content/` directory.
//!
//! Queries are deliberately small: field filters over the serialized
//! (camelCase) document, a single sort key, and skip/limit. Sorting is
//! stable, so documents with equal keys keep their load order. Skip is
//! applied before limit.

use crate::types::{ContentDocument, ContentKind};
use serde_json::Value;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// A predicate over a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value. For array fields, the array contains the value.
    Eq(String, Value),
    /// Field orders strictly before the value.
    Lt(String, Value),
    /// Field orders strictly after the value.
    Gt(String, Value),
    /// No underscore-prefixed stem or path segment.
    ExcludeDrafts,
}

impl Filter {
    pub fn matches(&self, doc: &ContentDocument) -> bool {
        match self {
            Filter::Eq(field, expected) => match doc.field(field) {
                Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
                Some(actual) => &actual == expected,
                None => expected.is_null(),
            },
            Filter::Lt(field, bound) => doc
                .field(field)
                .is_some_and(|v| compare_values(&v, bound) == Ordering::Less),
            Filter::Gt(field, bound) => doc
                .field(field)
                .is_some_and(|v| compare_values(&v, bound) == Ordering::Greater),
            Filter::ExcludeDrafts => !doc.is_draft(),
        }
    }
}

/// A query against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreQuery {
    pub kind: ContentKind,
    pub filters: Vec<Filter>,
    pub sort: Option<SortSpec>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl StoreQuery {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Run the query over an in-memory collection.
    pub fn apply(&self, docs: Vec<ContentDocument>) -> Vec<ContentDocument> {
        let mut docs: Vec<ContentDocument> = docs
            .into_iter()
            .filter(|d| d.kind() == self.kind)
            .filter(|d| self.filters.iter().all(|f| f.matches(d)))
            .collect();

        if let Some(sort) = &self.sort {
            let mut keyed: Vec<(Value, ContentDocument)> = docs
                .into_iter()
                .map(|d| (d.field(&sort.field).unwrap_or(Value::Null), d))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| {
                let ord = compare_values(a, b);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
            docs = keyed.into_iter().map(|(_, d)| d).collect();
        }

        let take = self.limit.unwrap_or(usize::MAX);
        docs.into_iter().skip(self.skip).take(take).collect()
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values: by type first (null lowest), then by value.
/// ISO dates compare correctly as strings.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Read-only access to the content collections.
pub trait ContentStore: Send + Sync {
    /// Every document of one kind, drafts included, in load order.
    fn all(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, StoreError>;

    fn query(&self, query: &StoreQuery) -> Result<Vec<ContentDocument>, StoreError> {
        Ok(query.apply(self.all(query.kind)?))
    }
}

/// A store over an owned vector of documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Vec<ContentDocument>,
}

impl MemoryStore {
    pub fn new(docs: Vec<ContentDocument>) -> Self {
        Self { docs }
    }

    pub fn push(&mut self, doc: ContentDocument) {
        self.docs.push(doc);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn all(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, StoreError> {
        Ok(self
            .docs
            .iter()
            .filter(|d| d.kind() == kind)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{blog_post, case_study, paths};
    use crate::types::Lang;
    use serde_json::json;

    fn sample() -> MemoryStore {
        MemoryStore::new(vec![
            blog_post("/blog/2026/b", "B", "2026-02-01", Lang::En),
            blog_post("/blog/2026/a", "A", "2026-01-01", Lang::En),
            blog_post("/ar/blog/2026/a", "أ", "2026-01-01", Lang::Ar),
            blog_post("/blog/2026/_draft-c", "C", "2026-03-01", Lang::En),
            case_study("/case-studies/x", "X", "2025-06-01", Lang::En),
        ])
    }

    // =========================================================================
    // MemoryStore
    // =========================================================================

    #[test]
    fn all_returns_one_kind_in_load_order() {
        let store = sample();
        let blog = store.all(ContentKind::Blog).unwrap();
        assert_eq!(
            paths(&blog),
            ["/blog/2026/b", "/blog/2026/a", "/ar/blog/2026/a", "/blog/2026/_draft-c"]
        );
        assert_eq!(store.all(ContentKind::CaseStudy).unwrap().len(), 1);
    }

    // =========================================================================
    // Filters
    // =========================================================================

    #[test]
    fn eq_filter_on_lang() {
        let q = StoreQuery::new(ContentKind::Blog).filter(Filter::Eq("lang".into(), json!("ar")));
        assert_eq!(paths(&sample().query(&q).unwrap()), ["/ar/blog/2026/a"]);
    }

    #[test]
    fn eq_filter_matches_array_membership() {
        let mut store = MemoryStore::default();
        let mut post = blog_post("/blog/2026/t", "T", "2026-01-01", Lang::En);
        if let ContentDocument::BlogPost(p) = &mut post {
            p.base.tags = vec!["rust".into(), "seo".into()];
        }
        store.push(post);
        let q = StoreQuery::new(ContentKind::Blog).filter(Filter::Eq("tags".into(), json!("seo")));
        assert_eq!(store.query(&q).unwrap().len(), 1);
    }

    #[test]
    fn lt_and_gt_compare_dates_as_strings() {
        let q = StoreQuery::new(ContentKind::Blog)
            .filter(Filter::Gt("date".into(), json!("2026-01-01")))
            .filter(Filter::Lt("date".into(), json!("2026-03-01")));
        assert_eq!(paths(&sample().query(&q).unwrap()), ["/blog/2026/b"]);
    }

    #[test]
    fn exclude_drafts() {
        let q = StoreQuery::new(ContentKind::Blog).filter(Filter::ExcludeDrafts);
        let found = sample().query(&q).unwrap();
        assert!(found.iter().all(|d| !d.is_draft()));
        assert_eq!(found.len(), 3);
    }

    // =========================================================================
    // Sort and pagination
    // =========================================================================

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let q = StoreQuery::new(ContentKind::Blog).sort("date", SortDirection::Asc);
        assert_eq!(
            paths(&sample().query(&q).unwrap()),
            ["/blog/2026/a", "/ar/blog/2026/a", "/blog/2026/b", "/blog/2026/_draft-c"]
        );
    }

    #[test]
    fn descending_sort_keeps_ties_in_load_order() {
        let q = StoreQuery::new(ContentKind::Blog).sort("date", SortDirection::Desc);
        assert_eq!(
            paths(&sample().query(&q).unwrap()),
            ["/blog/2026/_draft-c", "/blog/2026/b", "/blog/2026/a", "/ar/blog/2026/a"]
        );
    }

    #[test]
    fn skip_applies_before_limit() {
        let q = StoreQuery::new(ContentKind::Blog)
            .sort("date", SortDirection::Asc)
            .skip(1)
            .limit(2);
        assert_eq!(
            paths(&sample().query(&q).unwrap()),
            ["/ar/blog/2026/a", "/blog/2026/b"]
        );
    }

    #[test]
    fn missing_sort_field_sorts_lowest() {
        let mut with_order = case_study("/case-studies/o", "O", "2025-01-01", Lang::En);
        if let ContentDocument::CaseStudy(c) = &mut with_order {
            c.order = Some(2);
        }
        let store = MemoryStore::new(vec![
            with_order,
            case_study("/case-studies/n", "N", "2025-01-01", Lang::En),
        ]);
        let q = StoreQuery::new(ContentKind::CaseStudy).sort("order", SortDirection::Asc);
        assert_eq!(
            paths(&store.query(&q).unwrap()),
            ["/case-studies/n", "/case-studies/o"]
        );
    }

    #[test]
    fn compare_values_orders_numbers_numerically() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("2"), &json!("10")), Ordering::Greater);
        assert_eq!(compare_values(&Value::Null, &json!("a")), Ordering::Less);
    }
}
