//! Read-time estimation.
//!
//! Minutes are derived from a word count at a fixed reading speed, with code
//! weighted heavier than prose: every word inside a fenced block or inline
//! code span counts `code_weight` times. The result is rounded up and never
//! below one minute.
//!
//! ```text
//! 1000 prose words @ 200 wpm            → 5 min
//!  200 prose words + 200 code words     → 400 + floor(200 × 0.5) = 500 words → 3 min
//! ```
//!
//! Results are memoized in the estimator's [`ReadTimeCache`].

use crate::cache::ReadTimeCache;
use crate::types::ContentNode;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A `---` block at the very start of the input only.
static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---[ \t]*\r?\n(?:[\s\S]*?\r?\n)?---[ \t]*(?:\r?\n)*").expect("static regex")
});
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("static regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(.*?\)").expect("static regex"));
static FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_`~\[\]()]").expect("static regex"));
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```|`[^`]+`").expect("static regex"));

/// Number of leading characters of raw input used as the cache key.
const RAW_KEY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ReadTimeOptions {
    /// Words per minute.
    pub wpm: u32,
    /// Multiplier applied to words inside code.
    pub code_weight: f64,
    /// Drop a leading `---` frontmatter block before counting.
    pub strip_frontmatter: bool,
}

impl Default for ReadTimeOptions {
    fn default() -> Self {
        Self {
            wpm: 200,
            code_weight: 1.5,
            strip_frontmatter: true,
        }
    }
}

/// What to estimate: raw markdown, or an already-parsed document.
#[derive(Debug, Clone, Copy)]
pub enum ReadTimeInput<'a> {
    Raw(&'a str),
    Parsed {
        id: &'a str,
        body: Option<&'a ContentNode>,
    },
}

impl ReadTimeInput<'_> {
    fn cache_key(&self) -> Option<String> {
        match self {
            ReadTimeInput::Raw(s) if s.is_empty() => None,
            ReadTimeInput::Raw(s) => Some(s.chars().take(RAW_KEY_CHARS).collect()),
            ReadTimeInput::Parsed { id, .. } if id.is_empty() => None,
            ReadTimeInput::Parsed { id, .. } => Some((*id).to_string()),
        }
    }

    fn text(&self) -> String {
        match self {
            ReadTimeInput::Raw(s) => (*s).to_string(),
            ReadTimeInput::Parsed { body, .. } => body.map(tree_text).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReadTimeEstimator {
    cache: ReadTimeCache,
}

impl ReadTimeEstimator {
    pub fn new(cache: ReadTimeCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ReadTimeCache {
        &self.cache
    }

    /// Estimated reading time in whole minutes (at least 1).
    pub fn calculate(&self, input: &ReadTimeInput<'_>, options: &ReadTimeOptions) -> u32 {
        let key = input.cache_key();
        if let Some(key) = &key
            && let Some(minutes) = self.cache.get(key)
        {
            debug!(key = %key.chars().take(32).collect::<String>(), minutes, "read time cache hit");
            return minutes;
        }

        let minutes = estimate(&input.text(), options);
        if let Some(key) = key {
            self.cache.insert(key, minutes);
        }
        minutes
    }
}

/// Uncached estimate over plain markdown text.
pub fn estimate(text: &str, options: &ReadTimeOptions) -> u32 {
    let text = if options.strip_frontmatter {
        FRONTMATTER.replace(text, "")
    } else {
        text.into()
    };
    if text.trim().is_empty() {
        return 1;
    }

    let plain = HTML_TAG.replace_all(&text, " ");
    let plain = IMAGE.replace_all(&plain, "");
    let plain = LINK.replace_all(&plain, "$1");
    let plain = FORMATTING.replace_all(&plain, " ");
    let mut words = plain.split_whitespace().count() as u64;

    let code_words: usize = CODE_SPAN
        .find_iter(&text)
        .map(|m| m.as_str().trim_matches('`').split_whitespace().count())
        .sum();
    let extra = (code_words as f64 * (options.code_weight - 1.0)).floor();
    if extra > 0.0 {
        words += extra as u64;
    }

    let wpm = u64::from(options.wpm.max(1));
    words.div_ceil(wpm).max(1) as u32
}

/// Concatenate the text values of a parsed tree, space-separated.
pub fn tree_text(node: &ContentNode) -> String {
    if node.is_text() {
        return node.value.clone().unwrap_or_default();
    }
    let mut out = String::new();
    for child in &node.children {
        out.push_str(&tree_text(child));
        out.push(' ');
    }
    out
}
