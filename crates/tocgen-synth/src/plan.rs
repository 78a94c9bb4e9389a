//! Index-producing directories and their parent/child relationships.
//!
//! Two kinds of directories produce an index:
//!
//! - **content** directories own at least one document after filtering and
//!   promotion, or declare a standalone section with includes;
//! - **gap** directories are ancestors of content directories, up to and
//!   including the common root of all content directories, that are not
//!   content directories themselves. They get a navigation-only index.
//!
//! Every index-producing directory except the common root has its parent
//! in the plan, so parent lookup is plain path truncation.

use std::collections::{BTreeMap, BTreeSet};

use tocgen_custom::{CustomizationStore, SectionDefinition};
use tocgen_docs::path::{depth, parent_dir};

use crate::group::Groups;

/// Directory layout of one synthesis run.
#[derive(Debug, Default)]
pub struct Plan {
    groups: Groups,
    content: BTreeSet<String>,
    gaps: BTreeSet<String>,
    children: BTreeMap<String, Vec<String>>,
    top: Option<String>,
}

impl Plan {
    /// Build the plan from grouped documents and customizations.
    #[must_use]
    pub fn build(groups: Groups, store: &CustomizationStore) -> Self {
        let mut content: BTreeSet<String> = groups
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(dir, _)| dir.clone())
            .collect();
        for (dir, custom) in store.iter() {
            let has_standalone = custom.sections.iter().any(|section| {
                matches!(section, SectionDefinition::Standalone { include, .. } if !include.is_empty())
            });
            if has_standalone {
                content.insert(dir.to_owned());
            }
        }

        let Some(top) = common_root(&content) else {
            return Self {
                groups,
                ..Self::default()
            };
        };

        let mut gaps = BTreeSet::new();
        for dir in &content {
            let mut current = dir.as_str();
            while current != top {
                current = parent_dir(current);
                if !content.contains(current) {
                    gaps.insert(current.to_owned());
                }
            }
        }

        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for dir in content.iter().chain(&gaps) {
            if *dir != top {
                children
                    .entry(parent_dir(dir).to_owned())
                    .or_default()
                    .push(dir.clone());
            }
        }
        for list in children.values_mut() {
            list.sort();
        }

        tracing::debug!(
            content = content.len(),
            gaps = gaps.len(),
            top = %top,
            "Built directory plan"
        );

        Self {
            groups,
            content,
            gaps,
            children,
            top: Some(top),
        }
    }

    /// Filtered, promoted documents of a directory in path order.
    #[must_use]
    pub fn documents(&self, dir: &str) -> &[String] {
        self.groups.get(dir).map_or(&[], Vec::as_slice)
    }

    /// Whether a directory gets a content index.
    #[must_use]
    pub fn is_content(&self, dir: &str) -> bool {
        self.content.contains(dir)
    }

    /// Whether a directory gets a navigation-only index.
    #[must_use]
    pub fn is_gap(&self, dir: &str) -> bool {
        self.gaps.contains(dir)
    }

    /// Whether a directory produces any index.
    #[must_use]
    pub fn produces_index(&self, dir: &str) -> bool {
        self.is_content(dir) || self.is_gap(dir)
    }

    /// Immediate index-producing children of a directory, in path order.
    #[must_use]
    pub fn children(&self, dir: &str) -> &[String] {
        self.children.get(dir).map_or(&[], Vec::as_slice)
    }

    /// Content directories in path order.
    pub fn content_dirs(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(String::as_str)
    }

    /// Gap directories, deepest first (ties by path).
    #[must_use]
    pub fn gap_dirs_deepest_first(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self.gaps.iter().map(String::as_str).collect();
        dirs.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));
        dirs
    }

    /// Every index-producing directory, deepest first (ties by path).
    #[must_use]
    pub fn all_dirs_deepest_first(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self
            .content
            .iter()
            .chain(&self.gaps)
            .map(String::as_str)
            .collect();
        dirs.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));
        dirs
    }

    /// Common root of all content directories.
    #[must_use]
    pub fn top(&self) -> Option<&str> {
        self.top.as_deref()
    }
}

/// Longest directory that is an ancestor of (or equal to) every entry.
fn common_root(dirs: &BTreeSet<String>) -> Option<String> {
    let mut iter = dirs.iter();
    let first = iter.next()?;
    let mut common: Vec<&str> = first.split('/').filter(|s| !s.is_empty()).collect();

    for dir in iter {
        let shared = common
            .iter()
            .zip(dir.split('/').filter(|s| !s.is_empty()))
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }

    Some(common.join("/"))
}
