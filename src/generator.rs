//! New content files: frontmatter and markdown skeletons.
//!
//! [`build_frontmatter`] serializes a document's metadata to the YAML block
//! the scanner reads back. The `render_*` functions add a body, either from
//! supplied section text ([`RenderMode::Full`]) or as placeholder headings
//! to be filled in by hand ([`RenderMode::MetadataOnly`]).
//!
//! Section layouts come from [`ContentTemplate`]s. Three ship built in
//! (`blog-default`, `blog-tutorial`, `case-study-default`); more can be read
//! from TOML with [`ContentTemplate::from_toml`].

use crate::types::{ContentDocument, ContentKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("template `{0}` has no sections")]
    EmptySections(String),
    #[error("template `{template}` repeats section id `{section}`")]
    DuplicateSection { template: String, section: String },
    #[error("template field `{0}` must not be blank")]
    Blank(&'static str),
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("section text is required in full mode")]
    MissingSections,
    #[error("required section `{0}` has no text")]
    MissingSection(String),
    #[error("template `{template}` is for {expected}, not {actual}")]
    WrongKind {
        template: String,
        expected: ContentKind,
        actual: ContentKind,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    #[default]
    MetadataOnly,
}

// =============================================================================
// Frontmatter
// =============================================================================

fn quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// YAML frontmatter, delimiters included, no trailing newline.
///
/// Strings are single-quoted with `''` escaping. Fields are written in a
/// fixed order and empty ones are left out. `date` stays unquoted.
pub fn build_frontmatter(doc: &ContentDocument) -> String {
    let base = doc.base();
    let case_study = match doc {
        ContentDocument::CaseStudy(cs) => Some(cs),
        ContentDocument::BlogPost(_) => None,
    };
    let non_empty = |s: &str| !s.trim().is_empty();

    let mut lines = vec!["---".to_string()];
    if non_empty(&base.title) {
        lines.push(format!("title: {}", quoted(&base.title)));
    }
    if let Some(cs) = case_study
        && non_empty(&cs.client)
    {
        lines.push(format!("client: {}", quoted(&cs.client)));
    }
    if non_empty(&base.date) {
        lines.push(format!("date: {}", base.date));
    }
    if let Some(author) = base.author.as_deref().filter(|a| non_empty(a)) {
        lines.push(format!("author: {}", quoted(author)));
    }
    if let Some(cs) = case_study {
        if non_empty(&cs.role) {
            lines.push(format!("role: {}", quoted(&cs.role)));
        }
        if non_empty(&cs.timeline) {
            lines.push(format!("timeline: {}", quoted(&cs.timeline)));
        }
    }
    if !base.tags.is_empty() {
        let tags: Vec<String> = base.tags.iter().map(|t| quoted(t)).collect();
        lines.push(format!("tags: [{}]", tags.join(", ")));
    }
    if let Some(excerpt) = base.excerpt.as_deref().filter(|e| non_empty(e)) {
        lines.push(format!("excerpt: {}", quoted(excerpt)));
    }
    if let Some(image) = base.featured_image.as_deref().filter(|i| non_empty(i)) {
        lines.push(format!("featuredImage: {}", quoted(image)));
    }
    if let Some(cs) = case_study {
        lines.push(format!("featured: {}", cs.featured));
        if let Some(order) = cs.order {
            lines.push(format!("order: {order}"));
        }
    }
    lines.push(format!("lang: {}", quoted(base.lang.code())));
    if !base.same_as.is_empty() {
        let paths: Vec<String> = base.same_as.iter().map(|p| quoted(p)).collect();
        lines.push(format!("sameAs: [{}]", paths.join(", ")));
    }

    if let Some(cs) = case_study {
        if let Some(t) = &cs.testimonial {
            lines.push("testimonial:".to_string());
            lines.push(format!("  quote: {}", quoted(&t.quote)));
            lines.push(format!("  author: {}", quoted(&t.author)));
            lines.push(format!("  position: {}", quoted(&t.position)));
        }
        if !cs.metrics.is_empty() {
            lines.push("metrics:".to_string());
            for m in &cs.metrics {
                lines.push(format!("  - label: {}", quoted(&m.label)));
                lines.push(format!("    value: {}", quoted(&m.value)));
                if let Some(icon) = &m.icon {
                    lines.push(format!("    icon: {}", quoted(icon)));
                }
            }
        }
    }
    lines.push("---".to_string());
    lines.join("\n")
}

// =============================================================================
// Fixed-layout rendering
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostSections {
    pub introduction: String,
    pub main_content: String,
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseStudySections {
    pub overview: String,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    pub technologies_used: Option<String>,
}

const BLOG_PLACEHOLDER: &str = "\
## Introduction

Write your introduction here...

## Main Content

Write your main content here...

## Conclusion

Write your conclusion here...
";

const CASE_STUDY_PLACEHOLDER: &str = "\
## Overview

Write project overview here...

## Challenge

Describe the problem you solved here...

## Solution

Describe your solution approach here...

## Results

Describe the outcomes and impact here...

## Technologies Used

List technologies and tools here...
";

/// A complete blog post file.
pub fn render_blog_post(
    doc: &ContentDocument,
    mode: RenderMode,
    sections: Option<&BlogPostSections>,
) -> Result<String, GenerateError> {
    let frontmatter = build_frontmatter(doc);
    match mode {
        RenderMode::MetadataOnly => Ok(format!("{frontmatter}\n\n{BLOG_PLACEHOLDER}")),
        RenderMode::Full => {
            let s = sections.ok_or(GenerateError::MissingSections)?;
            Ok(format!(
                "{frontmatter}\n\n{}\n\n{}\n\n{}\n",
                s.introduction, s.main_content, s.conclusion
            ))
        }
    }
}

/// A complete case study file. The technologies section is optional.
pub fn render_case_study(
    doc: &ContentDocument,
    mode: RenderMode,
    sections: Option<&CaseStudySections>,
) -> Result<String, GenerateError> {
    let frontmatter = build_frontmatter(doc);
    match mode {
        RenderMode::MetadataOnly => Ok(format!("{frontmatter}\n\n{CASE_STUDY_PLACEHOLDER}")),
        RenderMode::Full => {
            let s = sections.ok_or(GenerateError::MissingSections)?;
            let technologies = s
                .technologies_used
                .as_deref()
                .map(|t| format!("\n{t}\n"))
                .unwrap_or_default();
            Ok(format!(
                "{frontmatter}\n\n{}\n\n{}\n\n{}\n\n{}\n{technologies}",
                s.overview, s.challenge, s.solution, s.results
            ))
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub required: bool,
    /// Body written in metadata-only mode. Defaults to `## {name}`.
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub word_count: Option<WordRange>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub content_type: ContentKind,
    pub sections: Vec<TemplateSection>,
}

impl ContentTemplate {
    /// Parse and validate a template definition.
    pub fn from_toml(content: &str) -> Result<Self, TemplateError> {
        let template: ContentTemplate = toml::from_str(content)?;
        template.validate()?;
        Ok(template)
    }

    /// Ids and names must be non-blank, there must be at least one section,
    /// and section ids must be unique.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.id.trim().is_empty() {
            return Err(TemplateError::Blank("id"));
        }
        if self.name.trim().is_empty() {
            return Err(TemplateError::Blank("name"));
        }
        if self.sections.is_empty() {
            return Err(TemplateError::EmptySections(self.id.clone()));
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(TemplateError::Blank("sections.id"));
            }
            if section.name.trim().is_empty() {
                return Err(TemplateError::Blank("sections.name"));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(TemplateError::DuplicateSection {
                    template: self.id.clone(),
                    section: section.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render a file body section by section.
    ///
    /// In full mode every required section needs text in `sections` (keyed
    /// by section id); optional ones without text are dropped. In
    /// metadata-only mode every section gets its placeholder.
    pub fn render(
        &self,
        doc: &ContentDocument,
        mode: RenderMode,
        sections: &BTreeMap<String, String>,
    ) -> Result<String, GenerateError> {
        self.validate()?;
        if doc.kind() != self.content_type {
            return Err(GenerateError::WrongKind {
                template: self.id.clone(),
                expected: self.content_type,
                actual: doc.kind(),
            });
        }

        let mut parts = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            match mode {
                RenderMode::MetadataOnly => parts.push(
                    section
                        .placeholder
                        .clone()
                        .unwrap_or_else(|| format!("## {}", section.name)),
                ),
                RenderMode::Full => match sections.get(&section.id).filter(|t| !t.trim().is_empty()) {
                    Some(text) => parts.push(text.clone()),
                    None if section.required => {
                        return Err(GenerateError::MissingSection(section.id.clone()));
                    }
                    None => {}
                },
            }
        }
        Ok(format!("{}\n\n{}\n", build_frontmatter(doc), parts.join("\n\n")))
    }
}

fn section(id: &str, name: &str, required: bool, placeholder: &str, min: u32, max: u32) -> TemplateSection {
    TemplateSection {
        id: id.to_string(),
        name: name.to_string(),
        required,
        placeholder: Some(placeholder.to_string()),
        word_count: Some(WordRange { min, max }),
    }
}

/// The templates that ship with the crate.
pub fn builtin_templates() -> Vec<ContentTemplate> {
    vec![
        ContentTemplate {
            id: "blog-default".into(),
            name: "Default Blog Post".into(),
            description: "Standard blog post with introduction, main content, and conclusion".into(),
            content_type: ContentKind::Blog,
            sections: vec![
                section(
                    "introduction",
                    "Introduction",
                    true,
                    "## Introduction\n\n[Introduce the topic and why it matters]",
                    150,
                    300,
                ),
                section(
                    "main-content",
                    "Main Content",
                    true,
                    "## Main Content\n\n[Main content with H2/H3 headings]",
                    500,
                    1500,
                ),
                section(
                    "conclusion",
                    "Conclusion",
                    true,
                    "## Conclusion\n\n[Key takeaways and next steps]",
                    100,
                    200,
                ),
            ],
        },
        ContentTemplate {
            id: "blog-tutorial".into(),
            name: "Tutorial".into(),
            description: "Step-by-step tutorial with prerequisites and troubleshooting".into(),
            content_type: ContentKind::Blog,
            sections: vec![
                section(
                    "prerequisites",
                    "Prerequisites",
                    true,
                    "## Prerequisites\n\n- Required knowledge\n- Required tools\n- Setup requirements",
                    100,
                    200,
                ),
                section(
                    "steps",
                    "Tutorial Steps",
                    true,
                    "## Steps\n\n### Step 1: [Title]\n\n[Instructions]\n\n### Step 2: [Title]\n\n[Instructions]",
                    800,
                    2000,
                ),
                section(
                    "troubleshooting",
                    "Troubleshooting",
                    false,
                    "## Troubleshooting\n\n### Common Issue 1\n\n**Problem**: [Description]\n**Solution**: [Fix]",
                    200,
                    400,
                ),
                section(
                    "summary",
                    "Summary",
                    true,
                    "## Summary\n\n[What was built, next steps, further resources]",
                    100,
                    250,
                ),
            ],
        },
        ContentTemplate {
            id: "case-study-default".into(),
            name: "Default Case Study".into(),
            description: "Standard case study structure for showcasing projects".into(),
            content_type: ContentKind::CaseStudy,
            sections: vec![
                section(
                    "overview",
                    "Overview",
                    true,
                    "## Overview\n\n[The project, the client, and your role]",
                    150,
                    300,
                ),
                section(
                    "challenge",
                    "Challenge",
                    true,
                    "## Challenge\n\n[The problem, constraints, and requirements]",
                    250,
                    500,
                ),
                section(
                    "solution",
                    "Solution",
                    true,
                    "## Solution\n\n[Approach, technologies, implementation details]",
                    400,
                    800,
                ),
                section(
                    "results",
                    "Results",
                    true,
                    "## Results\n\n[Measurable outcomes and impact]",
                    200,
                    400,
                ),
                section(
                    "technologies",
                    "Technologies Used",
                    false,
                    "## Technologies Used\n\n- Technology 1\n- Technology 2",
                    50,
                    150,
                ),
            ],
        },
    ]
}

pub fn template_by_id(id: &str) -> Option<ContentTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

pub fn templates_for(kind: ContentKind) -> Vec<ContentTemplate> {
    builtin_templates()
        .into_iter()
        .filter(|t| t.content_type == kind)
        .collect()
}

/// The template `new` uses when none is named.
pub fn default_template(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Blog => "blog-default",
        ContentKind::CaseStudy => "case-study-default",
    }
}
