//! Search and social metadata.
//!
//! | Module | Role |
//! |--------|------|
//! | [`meta`] | Meta/link tag building, truncation, URL absolutization |
//! | [`page`] | `use_seo` and the content/homepage entry points |
//! | [`schema`] | Schema.org JSON-LD builders |
//! | [`validate`] | Soft validation with errors and warnings |
//! | [`image`] | OG image resolution, srcset, alt-text fallback |

pub mod image;
pub mod meta;
pub mod page;
pub mod schema;
pub mod validate;

pub use page::{content_seo, homepage_seo, use_seo};
