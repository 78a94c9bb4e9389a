//! Markdown rendering of index documents.

use crate::document::{IndexDocument, LinkEntry};

/// Heading of the child-navigation block.
pub const TOPIC_INDICES_HEADING: &str = "Topic Indices";

/// Heading of the related-topics block.
pub const RELATED_HEADING: &str = "Related Topics";

/// Render an index document as Markdown.
///
/// The output has exactly [`IndexDocument::estimate_lines`] lines and ends
/// with a newline.
#[must_use]
pub fn render(doc: &IndexDocument) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(doc.estimate_lines() + 1);

    lines.push(format!("# {}", doc.title));
    lines.push(String::new());

    if let Some(description) = &doc.description {
        lines.push(format!("> {description}"));
        lines.push(String::new());
    }

    if !doc.preamble.is_empty() {
        lines.extend(doc.preamble.iter().cloned());
        lines.push(String::new());
    }

    if let Some(guidance) = &doc.guidance {
        lines.push(format!("## {}", guidance.title));
        lines.push(String::new());
        if let Some(intro) = &guidance.intro {
            lines.push(intro.clone());
            lines.push(String::new());
        }
        if !guidance.items.is_empty() {
            lines.extend(guidance.items.iter().map(|item| format!("- {item}")));
            lines.push(String::new());
        }
    }

    for section in &doc.sections {
        if doc.shows_heading(section)
            && let Some(name) = &section.name
        {
            lines.push(format!("## {name}"));
            lines.push(String::new());
        }
        if let Some(description) = &section.description {
            lines.push(description.clone());
            lines.push(String::new());
        }
        lines.extend(section.links.iter().map(link_line));
        lines.push(String::new());
    }

    push_link_block(&mut lines, TOPIC_INDICES_HEADING, &doc.child_links);
    push_link_block(&mut lines, RELATED_HEADING, &doc.related);

    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn push_link_block(lines: &mut Vec<String>, heading: &str, links: &[LinkEntry]) {
    if links.is_empty() {
        return;
    }
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    lines.extend(links.iter().map(link_line));
    lines.push(String::new());
}

/// Format one link line.
///
/// `- [Title](href)`, then ` (metric)` and `: description` when present.
#[must_use]
pub fn link_line(link: &LinkEntry) -> String {
    let mut line = format!("- [{}]({})", escape_link_text(&link.title), link.href);
    if let Some(metric) = &link.metric {
        line.push_str(" (");
        line.push_str(metric);
        line.push(')');
    }
    if let Some(description) = &link.description {
        line.push_str(": ");
        line.push_str(description);
    }
    line
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
