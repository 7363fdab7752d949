//! Listing-card excerpts.
//!
//! An authored `excerpt` in frontmatter always wins. Otherwise the excerpt is
//! pulled from the parsed body: headings and code are skipped, and each
//! paragraph stops contributing once it has yielded a little over 50
//! characters, so the excerpt favours the opening of several paragraphs over
//! the whole of one long one.

use crate::types::{ContentDocument, ContentNode};

pub const DEFAULT_MAX_LENGTH: usize = 150;

/// Characters a paragraph may contribute before extraction moves on.
const PARAGRAPH_BUDGET: usize = 50;

/// Excerpt for a document, at most `max_len` characters plus an ellipsis.
pub fn excerpt(doc: &ContentDocument, max_len: usize) -> String {
    let base = doc.base();
    if let Some(authored) = &base.excerpt
        && !authored.trim().is_empty()
    {
        return authored.trim().to_string();
    }
    match &base.body {
        Some(body) => excerpt_from_tree(body, max_len),
        None => String::new(),
    }
}

/// Excerpt extracted from a parsed tree.
pub fn excerpt_from_tree(body: &ContentNode, max_len: usize) -> String {
    let text = plain_text(body);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_at_word(&text, max_len)
}

fn truncate_at_word(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}…", &truncated[..pos]),
        _ => format!("{truncated}…"),
    }
}

fn skipped(tag: Option<&str>) -> bool {
    match tag {
        Some("code" | "pre") => true,
        Some(t) => {
            let bytes = t.as_bytes();
            bytes.len() == 2 && bytes[0] == b'h' && (b'1'..=b'6').contains(&bytes[1])
        }
        None => false,
    }
}

fn plain_text(node: &ContentNode) -> String {
    if node.is_text() {
        return node.value.clone().unwrap_or_default();
    }
    if skipped(node.tag()) {
        return String::new();
    }
    let is_paragraph = node.tag() == Some("p");
    let mut text = String::new();
    for child in &node.children {
        let child_text = plain_text(child);
        if !child_text.is_empty() {
            text.push_str(&child_text);
            text.push(' ');
        }
        if is_paragraph && text.chars().count() > PARAGRAPH_BUDGET {
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::blog_post;
    use crate::types::Lang;

    fn doc_with(excerpt: Option<&str>, body: Option<ContentNode>) -> ContentDocument {
        let mut doc = blog_post("/blog/2026/a", "A", "2026-01-01", Lang::En);
        if let ContentDocument::BlogPost(p) = &mut doc {
            p.base.excerpt = excerpt.map(String::from);
            p.base.body = body;
        }
        doc
    }

    fn para(texts: &[&str]) -> ContentNode {
        ContentNode::element("p", texts.iter().map(|t| ContentNode::text(t)).collect())
    }

    // =========================================================================
    // Authored excerpts
    // =========================================================================

    #[test]
    fn authored_excerpt_wins_and_is_trimmed() {
        let long = "x ".repeat(200);
        let doc = doc_with(Some(&format!("  {long}  ")), Some(ContentNode::root(vec![para(&["body"])])));
        assert_eq!(excerpt(&doc, 150), long.trim());
    }

    #[test]
    fn blank_authored_excerpt_falls_back_to_body() {
        let doc = doc_with(Some("   "), Some(ContentNode::root(vec![para(&["From body."])])));
        assert_eq!(excerpt(&doc, 150), "From body.");
    }

    #[test]
    fn no_excerpt_and_no_body_is_empty() {
        assert_eq!(excerpt(&doc_with(None, None), 150), "");
    }

    // =========================================================================
    // Tree extraction
    // =========================================================================

    #[test]
    fn headings_and_code_are_skipped() {
        let body = ContentNode::root(vec![
            ContentNode::element("h1", vec![ContentNode::text("Title")]),
            ContentNode::element(
                "pre",
                vec![ContentNode::element("code", vec![ContentNode::text("let x = 1;")])],
            ),
            para(&["Intro text."]),
        ]);
        assert_eq!(excerpt_from_tree(&body, 150), "Intro text.");
    }

    #[test]
    fn paragraph_stops_after_budget() {
        let first = "a".repeat(60);
        let body = ContentNode::root(vec![para(&[&first, "dropped"]), para(&["kept"])]);
        assert_eq!(excerpt_from_tree(&body, 150), format!("{first} kept"));
    }

    #[test]
    fn whitespace_is_normalized() {
        let body = ContentNode::root(vec![para(&["  many \n\n spaces  "])]);
        assert_eq!(excerpt_from_tree(&body, 150), "many spaces");
    }

    // =========================================================================
    // Truncation
    // =========================================================================

    #[test]
    fn long_text_cut_at_last_space() {
        let body = ContentNode::root(vec![para(&["alpha beta gamma"])]);
        assert_eq!(excerpt_from_tree(&body, 12), "alpha beta…");
    }

    #[test]
    fn text_without_spaces_is_hard_cut() {
        let body = ContentNode::root(vec![para(&["abcdefghij"])]);
        assert_eq!(excerpt_from_tree(&body, 4), "abcd…");
    }

    #[test]
    fn text_within_limit_is_untouched() {
        let body = ContentNode::root(vec![para(&["short"])]);
        assert_eq!(excerpt_from_tree(&body, 5), "short");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = ContentNode::root(vec![para(&["مرحبا بالعالم الجميل"])]);
        assert_eq!(excerpt_from_tree(&body, 14), "مرحبا بالعالم…");
    }
}
