//! Leading metadata extraction for topic documents.
//!
//! A metadata block opens with a `---` line at the very start of the
//! document and closes at the next `---` line. Fields are read with
//! `serde_yaml`; when the block is not valid YAML (for instance because a
//! value contains an unquoted `: `) a line-oriented `key: value` scan is
//! used instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Fixed marker line delimiting the metadata block.
const MARKER: &str = "---";

/// Regex for extracting first H1 heading.
static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*#*\s*$").expect("valid heading regex"));

/// Fields extracted from the leading part of a topic document.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Title from the metadata block, else from the first H1 heading.
    pub title: Option<String>,
    /// Description from the metadata block.
    pub description: Option<String>,
    /// Category label from the metadata block.
    pub category: Option<String>,
}

/// Extract title, description and category from a document prefix.
#[must_use]
pub fn extract_meta(content: &str) -> DocumentMeta {
    let (block, body) = split_metadata_block(content);

    let mut meta = block.map(parse_block).unwrap_or_default();
    meta.title = non_empty(meta.title).or_else(|| first_heading(body));
    meta.description = non_empty(meta.description);
    meta.category = non_empty(meta.category);
    meta
}

/// Split the metadata block from the body.
///
/// Returns `(None, content)` if the document has no complete block.
fn split_metadata_block(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(first_newline) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_newline].trim_end() != MARKER {
        return (None, content);
    }

    let rest = &content[first_newline + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == MARKER {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse a metadata block, preferring YAML.
fn parse_block(block: &str) -> DocumentMeta {
    if block.trim().is_empty() {
        return DocumentMeta::default();
    }
    serde_yaml::from_str(block).unwrap_or_else(|_| scan_lines(block))
}

/// Line-oriented fallback accepting quoted or bare values.
fn scan_lines(block: &str) -> DocumentMeta {
    let mut meta = DocumentMeta::default();
    for line in block.lines() {
        if line.starts_with([' ', '\t']) {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = Some(unquote(value.trim()).to_owned());
        match key.trim() {
            "title" => meta.title = value,
            "description" => meta.description = value,
            "category" => meta.category = value,
            _ => {}
        }
    }
    meta
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// First top-level heading of the body.
fn first_heading(body: &str) -> Option<String> {
    let caps = H1_REGEX.captures(body)?;
    non_empty(Some(caps[1].to_owned()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_yaml_block() {
        let content = "---\ntitle: Setup Guide\ndescription: How to install\ncategory: ops\n---\n\n# Ignored\n";
        let meta = extract_meta(content);
        assert_eq!(meta.title, Some("Setup Guide".to_owned()));
        assert_eq!(meta.description, Some("How to install".to_owned()));
        assert_eq!(meta.category, Some("ops".to_owned()));
    }

    #[test]
    fn test_extract_quoted_values() {
        let content = "---\ntitle: \"Quoted Title\"\ndescription: 'Single quoted'\n---\n";
        let meta = extract_meta(content);
        assert_eq!(meta.title, Some("Quoted Title".to_owned()));
        assert_eq!(meta.description, Some("Single quoted".to_owned()));
    }

    #[test]
    fn test_extract_falls_back_to_line_scan() {
        // Unquoted ": " makes this invalid YAML
        let content = "---\ntitle: Rust: The Basics\ndescription: \"Intro: part one\"\ntags: [a\n---\n";
        let meta = extract_meta(content);
        assert_eq!(meta.title, Some("Rust: The Basics".to_owned()));
        assert_eq!(meta.description, Some("Intro: part one".to_owned()));
    }

    #[test]
    fn test_extract_ignores_unknown_fields() {
        let content = "---\ntitle: Guide\nowner: team-a\ntags:\n  - x\n---\nBody";
        let meta = extract_meta(content);
        assert_eq!(meta.title, Some("Guide".to_owned()));
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_extract_heading_when_no_metadata_title() {
        let content = "---\ndescription: Only a description\n---\n\n# Heading Title\n\nText";
        let meta = extract_meta(content);
        assert_eq!(meta.title, Some("Heading Title".to_owned()));
        assert_eq!(meta.description, Some("Only a description".to_owned()));
    }

    #[test]
    fn test_extract_heading_without_block() {
        let meta = extract_meta("Intro line\n\n# First Heading\n\n## Second\n");
        assert_eq!(meta.title, Some("First Heading".to_owned()));
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_extract_unterminated_block_is_body() {
        let meta = extract_meta("---\ntitle: Never closed\n# Real Heading\n");
        assert_eq!(meta.title, Some("Real Heading".to_owned()));
    }

    #[test]
    fn test_extract_nothing() {
        let meta = extract_meta("plain text without heading");
        assert_eq!(meta, DocumentMeta::default());
    }

    #[test]
    fn test_extract_empty_values_are_none() {
        let meta = extract_meta("---\ntitle: \"\"\ndescription:\n---\n");
        assert!(meta.title.is_none());
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_h2_is_not_a_title() {
        assert!(extract_meta("## Only a subsection\n").title.is_none());
    }
}
