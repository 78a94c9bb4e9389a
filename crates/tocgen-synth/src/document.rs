//! Structured index documents and their line estimate.
//!
//! An [`IndexDocument`] is laid out as a sequence of blocks, each followed
//! by one blank separator line. The trailing separator of the last block is
//! not emitted, so [`IndexDocument::estimate_lines`] equals the number of
//! lines [`render`](crate::render::render) produces.

use serde::Serialize;

/// One link line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkEntry {
    /// Link text.
    pub title: String,
    /// Link target.
    pub href: String,
    /// Parenthesized annotation (topic count for index links).
    pub metric: Option<String>,
    /// Text after the colon.
    pub description: Option<String>,
    /// Root-relative path of the linked document or directory.
    pub target: String,
}

/// Group of links under an optional heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Heading; `None` renders an unlabeled section.
    pub name: Option<String>,
    /// Paragraph below the heading.
    pub description: Option<String>,
    /// Sort priority (0..=100).
    pub priority: u8,
    /// Link lines.
    pub links: Vec<LinkEntry>,
}

/// Guidance block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuidanceBlock {
    /// Heading text.
    pub title: String,
    /// Intro paragraph.
    pub intro: Option<String>,
    /// Bullet items.
    pub items: Vec<String>,
}

/// Generated index before rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexDocument {
    /// Document title.
    pub title: String,
    /// Blockquote below the title.
    pub description: Option<String>,
    /// Lines placed before any section.
    pub preamble: Vec<String>,
    /// Guidance block.
    pub guidance: Option<GuidanceBlock>,
    /// Curated and local sections, in render order.
    pub sections: Vec<Section>,
    /// Entries of the "Topic Indices" block.
    pub child_links: Vec<LinkEntry>,
    /// Entries of the "Related Topics" block.
    pub related: Vec<LinkEntry>,
}

/// Kind of generated document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Primary index of a content directory.
    Primary,
    /// Extended index holding a content directory's overflowed local topics.
    Overflow,
    /// Navigation-only index of a gap directory.
    Navigation,
}

/// Rendered document ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Directory the document belongs to.
    pub dir: String,
    /// Document kind.
    pub kind: DocumentKind,
    /// Output path relative to the tree root.
    pub path: String,
    /// Markdown content.
    pub content: String,
    /// Number of lines in `content`.
    pub lines: usize,
    /// Whether the directory has no index-producing children.
    pub leaf: bool,
}

impl IndexDocument {
    /// Number of lines the rendered document will have.
    #[must_use]
    pub fn estimate_lines(&self) -> usize {
        // title + blank
        let mut lines = 2;

        if self.description.is_some() {
            lines += 2;
        }
        if !self.preamble.is_empty() {
            lines += self.preamble.len() + 1;
        }
        if let Some(guidance) = &self.guidance {
            lines += 2;
            if guidance.intro.is_some() {
                lines += 2;
            }
            if !guidance.items.is_empty() {
                lines += guidance.items.len() + 1;
            }
        }
        for section in &self.sections {
            lines += self.section_lines(section);
        }
        if !self.child_links.is_empty() {
            lines += self.child_links.len() + 3;
        }
        if !self.related.is_empty() {
            lines += self.related.len() + 3;
        }

        // The last separator is not emitted.
        lines - 1
    }

    fn section_lines(&self, section: &Section) -> usize {
        let mut lines = section.links.len() + 1;
        if self.shows_heading(section) {
            lines += 2;
        }
        if section.description.is_some() {
            lines += 2;
        }
        lines
    }

    /// Whether a section's heading is rendered.
    ///
    /// Unlabeled sections and sections named like the document (ignoring
    /// case and punctuation) render without a heading.
    #[must_use]
    pub fn shows_heading(&self, section: &Section) -> bool {
        section
            .name
            .as_deref()
            .is_some_and(|name| comparable(name) != comparable(&self.title))
    }
}

/// Lowercased alphanumeric characters of `text`.
fn comparable(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collapse whitespace (including newlines) into single spaces.
///
/// Returns `None` for blank text.
#[must_use]
pub fn one_line(text: &str) -> Option<String> {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str) -> LinkEntry {
        LinkEntry {
            title: title.to_owned(),
            href: format!("{title}.md"),
            metric: None,
            description: None,
            target: format!("{title}.md"),
        }
    }

    fn section(name: Option<&str>, links: usize) -> Section {
        Section {
            name: name.map(str::to_owned),
            description: None,
            priority: 50,
            links: (0..links).map(|i| link(&format!("t{i}"))).collect(),
        }
    }

    #[test]
    fn test_estimate_title_only() {
        let doc = IndexDocument {
            title: "T".to_owned(),
            ..Default::default()
        };
        assert_eq!(doc.estimate_lines(), 1);
    }

    #[test]
    fn test_estimate_all_blocks() {
        let doc = IndexDocument {
            title: "Guides".to_owned(),
            description: Some("All guides".to_owned()),
            preamble: vec!["Line one".to_owned(), "Line two".to_owned()],
            guidance: Some(GuidanceBlock {
                title: "Guidance".to_owned(),
                intro: Some("Start here".to_owned()),
                items: vec!["a".to_owned(), "b".to_owned()],
            }),
            sections: vec![section(Some("Setup"), 3), section(None, 2)],
            child_links: vec![link("c1")],
            related: vec![link("r1"), link("r2")],
        };
        // 2 + 2 + 3 + (2 + 2 + 3) + (2 + 3 + 1) + (2 + 1) + 4 + 5 - 1
        assert_eq!(doc.estimate_lines(), 31);
    }

    #[test]
    fn test_heading_suppressed_when_named_like_title() {
        let doc = IndexDocument {
            title: "Getting Started!".to_owned(),
            ..Default::default()
        };
        assert!(!doc.shows_heading(&section(Some("getting-started"), 1)));
        assert!(doc.shows_heading(&section(Some("Other Topics"), 1)));
        assert!(!doc.shows_heading(&section(None, 1)));
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("  a\n  b  c "), Some("a b c".to_owned()));
        assert_eq!(one_line(" \n "), None);
    }
}
