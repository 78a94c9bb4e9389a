//! Customization document types.
//!
//! A customization document is a YAML file with a reserved name (default
//! `_index.yaml`) placed in a directory of the tree. All fields are
//! optional and unknown fields are ignored.
//!
//! ```yaml
//! title: Billing
//! short_description: Invoices, payments and refunds
//! offers: [overview.md, api]
//! sections:
//!   - path: api
//!     priority: 80
//!   - name: Getting Started
//!     priority: 90
//!     include: [billing/overview.md, guides/setup.md]
//! nodes:
//!   legacy.md:
//!     title: Legacy Billing (deprecated)
//! filter: [drafts/]
//! promote:
//!   - pattern: "reference/**/*.md"
//!     levels: 1
//! related:
//!   - path: ../payments
//!     weight: 5
//!     reason: Payment providers
//! ```

use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};
use serde::Deserialize;

/// Upper bound on the number of offers a directory can declare.
pub const MAX_OFFERS: usize = 10;

/// Priority used when a section does not declare one.
const DEFAULT_PRIORITY: u8 = 50;

/// Per-directory customization overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Customization {
    /// Title override for the directory index.
    pub title: Option<String>,
    /// Description shown under the index title.
    pub description: Option<String>,
    /// Short description used in parent listings.
    pub short_description: Option<String>,
    /// Prominent warning text placed before any section.
    pub preamble: Option<String>,
    /// Structured advice block.
    pub guidance: Option<Guidance>,
    /// Child file or subdirectory names, most important first.
    pub offers: Vec<String>,
    /// Curated sections.
    pub sections: Vec<SectionDefinition>,
    /// Rename/re-describe overrides keyed by base filename.
    pub nodes: BTreeMap<String, NodeOverride>,
    /// Paths excluded from output, prefix-matched relative to this directory.
    pub filter: Vec<String>,
    /// Rules moving matching documents up the tree.
    pub promote: Vec<PromotionRule>,
    /// Cross-references to other parts of the tree.
    pub related: Vec<RelatedTopic>,
}

impl Customization {
    /// Parse a customization document.
    ///
    /// Empty or comment-only content yields the default customization.
    /// Offers beyond [`MAX_OFFERS`] are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a field is invalid
    /// (e.g., a section with both `path` and `name`).
    pub fn from_yaml(content: &str) -> Result<Self, CustomizationError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(CustomizationError::Parse)?;
        if value.is_null() {
            return Ok(Self::default());
        }

        let mut custom: Self = serde_yaml::from_value(value).map_err(CustomizationError::Parse)?;
        if custom.offers.len() > MAX_OFFERS {
            tracing::debug!(
                count = custom.offers.len(),
                max = MAX_OFFERS,
                "Truncating offers list"
            );
            custom.offers.truncate(MAX_OFFERS);
        }
        Ok(custom)
    }

    /// Short description for parent listings, falling back to the description.
    #[must_use]
    pub fn listing_description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.description.as_deref())
    }
}

/// Structured advice block rendered near the top of an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Guidance {
    /// Block heading (defaults to "Guidance" when rendered).
    pub title: Option<String>,
    /// Introductory paragraph.
    pub intro: Option<String>,
    /// Bullet items.
    pub items: Vec<String>,
}

/// Rename/re-describe override for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeOverride {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Curated section of an index.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSection")]
pub enum SectionDefinition {
    /// Section surfacing content of a subdirectory.
    ChildReference {
        /// Subdirectory path relative to the declaring directory.
        path: String,
        /// Priority in 0..=100; also the percentage of offers taken.
        priority: u8,
        /// Explicit entries relative to the subdirectory.
        include: Option<Vec<String>>,
    },
    /// Named section listing arbitrary content.
    Standalone {
        /// Section heading.
        name: String,
        /// Priority in 0..=100.
        priority: u8,
        /// Root-relative entries.
        include: Vec<String>,
    },
}

impl SectionDefinition {
    /// Section priority.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::ChildReference { priority, .. } | Self::Standalone { priority, .. } => *priority,
        }
    }
}

/// Section as written in YAML, before validation.
#[derive(Deserialize)]
struct RawSection {
    path: Option<String>,
    name: Option<String>,
    priority: Option<i64>,
    include: Option<Vec<String>>,
}

impl TryFrom<RawSection> for SectionDefinition {
    type Error = String;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        let priority = raw.priority.map_or(DEFAULT_PRIORITY, |p| {
            u8::try_from(p.clamp(0, 100)).unwrap_or(DEFAULT_PRIORITY)
        });
        match (raw.path, raw.name) {
            (Some(path), None) => {
                let path = path.trim_matches('/').to_owned();
                if path.is_empty() {
                    return Err("section path cannot be empty".to_owned());
                }
                Ok(Self::ChildReference {
                    path,
                    priority,
                    include: raw.include,
                })
            }
            (None, Some(name)) => Ok(Self::Standalone {
                name,
                priority,
                include: raw.include.unwrap_or_default(),
            }),
            (Some(_), Some(_)) => Err("section cannot set both `path` and `name`".to_owned()),
            (None, None) => Err("section requires either `path` or `name`".to_owned()),
        }
    }
}

/// Rule relocating matching documents upward.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPromotionRule")]
pub struct PromotionRule {
    /// Glob pattern relative to the declaring directory.
    pub pattern: Pattern,
    /// Number of levels to move the document's directory up.
    pub levels: usize,
}

impl PromotionRule {
    /// Whether the rule matches a path relative to the declaring directory.
    ///
    /// `*` does not cross `/`; use `**` for nested matches.
    #[must_use]
    pub fn matches(&self, rel_path: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(rel_path, options)
    }
}

#[derive(Deserialize)]
struct RawPromotionRule {
    pattern: String,
    #[serde(default = "default_levels")]
    levels: usize,
}

fn default_levels() -> usize {
    1
}

impl TryFrom<RawPromotionRule> for PromotionRule {
    type Error = String;

    fn try_from(raw: RawPromotionRule) -> Result<Self, Self::Error> {
        let pattern = Pattern::new(&raw.pattern)
            .map_err(|e| format!("invalid promote pattern `{}`: {e}", raw.pattern))?;
        Ok(Self {
            pattern,
            levels: raw.levels,
        })
    }
}

/// Cross-reference to another part of the tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RelatedTopic {
    /// Target path relative to the declaring directory (may use `..`).
    pub path: String,
    /// Sort weight; higher first.
    #[serde(default)]
    pub weight: u32,
    /// Keywords shown with the link.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Why the target is related.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Error type for customization documents.
#[derive(Debug, thiserror::Error)]
pub enum CustomizationError {
    /// Malformed YAML or invalid field.
    #[error("Invalid customization: {0}")]
    Parse(#[source] serde_yaml::Error),
    /// Document could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty() {
        assert_eq!(Customization::from_yaml("").unwrap(), Customization::default());
        assert_eq!(
            Customization::from_yaml("# only a comment\n").unwrap(),
            Customization::default()
        );
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = r#"
title: Billing
description: Everything about billing
short_description: Invoices and payments
preamble: "Deprecated APIs are marked."
guidance:
  title: Where to start
  intro: Read these first.
  items:
    - Overview
    - Setup
offers: [overview.md, api]
sections:
  - path: api/
    priority: 80
    include: [rest.md]
  - name: Getting Started
    include: [guides/setup.md]
nodes:
  legacy.md:
    title: Legacy Billing
    description: Old flow
filter: [drafts/, scratch.md]
promote:
  - pattern: "reference/**/*.md"
    levels: 2
  - pattern: "*.md"
related:
  - path: ../payments
    weight: 5
    keywords: [stripe]
    reason: Providers
unknown_field: ignored
"#;
        let custom = Customization::from_yaml(yaml).unwrap();

        assert_eq!(custom.title.as_deref(), Some("Billing"));
        assert_eq!(custom.listing_description(), Some("Invoices and payments"));
        let guidance = custom.guidance.as_ref().unwrap();
        assert_eq!(guidance.title.as_deref(), Some("Where to start"));
        assert_eq!(guidance.items, vec!["Overview", "Setup"]);
        assert_eq!(custom.offers, vec!["overview.md", "api"]);
        assert_eq!(
            custom.sections,
            vec![
                SectionDefinition::ChildReference {
                    path: "api".to_owned(),
                    priority: 80,
                    include: Some(vec!["rest.md".to_owned()]),
                },
                SectionDefinition::Standalone {
                    name: "Getting Started".to_owned(),
                    priority: 50,
                    include: vec!["guides/setup.md".to_owned()],
                },
            ]
        );
        assert_eq!(
            custom.nodes["legacy.md"].title.as_deref(),
            Some("Legacy Billing")
        );
        assert_eq!(custom.filter, vec!["drafts/", "scratch.md"]);
        assert_eq!(custom.promote.len(), 2);
        assert_eq!(custom.promote[0].levels, 2);
        assert_eq!(custom.promote[1].levels, 1);
        assert_eq!(custom.related[0].weight, 5);
        assert_eq!(custom.related[0].reason.as_deref(), Some("Providers"));
    }

    #[test]
    fn test_listing_description_falls_back() {
        let custom = Customization {
            description: Some("Long".to_owned()),
            ..Default::default()
        };
        assert_eq!(custom.listing_description(), Some("Long"));
    }

    #[test]
    fn test_offers_are_capped() {
        let offers: Vec<String> = (0..15).map(|i| format!("t{i}.md")).collect();
        let yaml = format!("offers: [{}]", offers.join(", "));
        let custom = Customization::from_yaml(&yaml).unwrap();
        assert_eq!(custom.offers.len(), MAX_OFFERS);
        assert_eq!(custom.offers[0], "t0.md");
    }

    #[test]
    fn test_priority_is_clamped() {
        let custom =
            Customization::from_yaml("sections:\n  - name: A\n    priority: 250\n  - name: B\n    priority: -3\n")
                .unwrap();
        assert_eq!(custom.sections[0].priority(), 100);
        assert_eq!(custom.sections[1].priority(), 0);
    }

    #[test]
    fn test_section_with_path_and_name_is_invalid() {
        let result = Customization::from_yaml("sections:\n  - path: a\n    name: A\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_section_without_path_or_name_is_invalid() {
        assert!(Customization::from_yaml("sections:\n  - priority: 10\n").is_err());
    }

    #[test]
    fn test_invalid_promote_pattern() {
        let result = Customization::from_yaml("promote:\n  - pattern: \"[unclosed\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(Customization::from_yaml("title: [unclosed").is_err());
        assert!(Customization::from_yaml("- just\n- a list\n").is_err());
    }

    #[test]
    fn test_promotion_rule_matching() {
        let rule = PromotionRule {
            pattern: Pattern::new("*.md").unwrap(),
            levels: 1,
        };
        assert!(rule.matches("top.md"));
        assert!(!rule.matches("nested/deep.md"));

        let deep = PromotionRule {
            pattern: Pattern::new("reference/**/*.md").unwrap(),
            levels: 1,
        };
        assert!(deep.matches("reference/a/b.md"));
        assert!(deep.matches("reference/b.md"));
        assert!(!deep.matches("guides/b.md"));
    }
}
