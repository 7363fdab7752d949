//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml      # Overrides stock defaults (optional)
//! └── content/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "https://example.com"           # Origin for absolute URLs
//! name = "Portfolio"                    # og:site_name, titles, JSON-LD
//! tagline = "Designer & Developer"      # Homepage title suffix
//! description = "Portfolio showcasing work and insights"
//! author = "Site Author"                # Default article author
//! default_og_image = "/images/og/default.png"
//! default_locale = "en"
//! # twitter_handle = "@handle"
//!
//! [read_time]
//! wpm = 200
//! code_weight = 1.5
//! strip_frontmatter = true
//! cache_capacity = 100
//! cache_ttl_secs = 3600
//!
//! [excerpt]
//! max_length = 150
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::cache::ReadTimeCache;
use crate::readtime::ReadTimeOptions;
use crate::types::Lang;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and defaults used by the SEO builders.
    pub site: SiteSection,
    /// Read-time estimation and its cache.
    pub read_time: ReadTimeConfig,
    /// Auto-generated excerpts.
    pub excerpt: ExcerptConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.site.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.url must start with http:// or https:// (got `{url}`)"
            )));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if let Some(handle) = &self.site.twitter_handle
            && !handle.starts_with('@')
        {
            return Err(ConfigError::Validation(
                "site.twitter_handle must start with @".into(),
            ));
        }
        if self.read_time.wpm == 0 {
            return Err(ConfigError::Validation("read_time.wpm must be positive".into()));
        }
        if self.read_time.code_weight < 1.0 {
            return Err(ConfigError::Validation(
                "read_time.code_weight must be at least 1.0".into(),
            ));
        }
        if self.read_time.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "read_time.cache_capacity must be positive".into(),
            ));
        }
        if self.excerpt.max_length == 0 {
            return Err(ConfigError::Validation(
                "excerpt.max_length must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Site origin without a trailing slash, e.g. `https://example.com`.
    pub fn origin(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    pub fn read_time_options(&self) -> ReadTimeOptions {
        ReadTimeOptions {
            wpm: self.read_time.wpm,
            code_weight: self.read_time.code_weight,
            strip_frontmatter: self.read_time.strip_frontmatter,
        }
    }

    /// A fresh cache sized from `[read_time]`.
    pub fn read_time_cache(&self) -> ReadTimeCache {
        ReadTimeCache::new(
            self.read_time.cache_capacity,
            Duration::from_secs(self.read_time.cache_ttl_secs),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub url: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub twitter_handle: Option<String>,
    /// Used when a page has neither an OG override nor a featured image.
    pub default_og_image: String,
    pub default_locale: Lang,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            name: "Portfolio".to_string(),
            tagline: "Designer & Developer".to_string(),
            description: "Portfolio showcasing work and insights".to_string(),
            author: "Site Author".to_string(),
            twitter_handle: None,
            default_og_image: "/images/og/default.png".to_string(),
            default_locale: Lang::En,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadTimeConfig {
    pub wpm: u32,
    pub code_weight: f64,
    pub strip_frontmatter: bool,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
}

impl Default for ReadTimeConfig {
    fn default() -> Self {
        let options = ReadTimeOptions::default();
        Self {
            wpm: options.wpm,
            code_weight: options.code_weight,
            strip_frontmatter: options.strip_frontmatter,
            cache_capacity: crate::cache::DEFAULT_CAPACITY,
            cache_ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcerptConfig {
    pub max_length: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            max_length: crate::excerpt::DEFAULT_MAX_LENGTH,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Public origin. Relative paths in canonical, hreflang, OG and JSON-LD
# URLs are resolved against it.
url = "https://example.com"

# Used for og:site_name and the homepage title ("{name} | {tagline}").
name = "Portfolio"
tagline = "Designer & Developer"

# Homepage meta description.
description = "Portfolio showcasing work and insights"

# Author for articles that don't name one.
author = "Site Author"

# Emitted as twitter:site and twitter:creator. Must start with @.
# twitter_handle = "@handle"

# OG image for pages with no override and no featured image.
default_og_image = "/images/og/default.png"

# Unprefixed locale ("en" or "ar").
default_locale = "en"

# ---------------------------------------------------------------------------
# Read time
# ---------------------------------------------------------------------------
[read_time]
# Reading speed in words per minute.
wpm = 200

# Words inside code count this many times (1.0 = same as prose).
code_weight = 1.5

# Ignore a leading --- frontmatter block when counting.
strip_frontmatter = true

# Memoization cache: max entries and entry lifetime.
cache_capacity = 100
cache_ttl_secs = 3600

# ---------------------------------------------------------------------------
# Excerpts
# ---------------------------------------------------------------------------
[excerpt]
# Maximum characters of an auto-generated excerpt (before the ellipsis).
max_length = 150
"##
}
