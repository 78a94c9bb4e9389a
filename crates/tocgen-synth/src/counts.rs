//! Topic-count aggregation.

use std::collections::BTreeMap;
use std::fmt;

use crate::plan::Plan;

/// Number of topics in a directory and in its whole subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopicCount {
    /// Documents assigned directly to the directory.
    pub file_topics: usize,
    /// Documents in the directory and every index-producing descendant.
    pub tree_topics: usize,
}

impl TopicCount {
    /// Whether the tree count adds enough information to be shown.
    #[must_use]
    pub fn shows_tree(self) -> bool {
        // Compare 2 * tree > 3 * file instead of tree > 1.5 * file.
        self.tree_topics * 2 > self.file_topics * 3 && self.tree_topics > self.file_topics + 5
    }
}

impl fmt::Display for TopicCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shows_tree = self.shows_tree();
        // A directory without own topics shows only the tree total.
        if self.file_topics == 0 && shows_tree {
            return write!(f, "{} in tree", self.tree_topics);
        }
        let noun = if self.file_topics == 1 { "topic" } else { "topics" };
        write!(f, "{} {noun}", self.file_topics)?;
        if shows_tree {
            write!(f, ", {} in tree", self.tree_topics)?;
        }
        Ok(())
    }
}

/// Topic counts of every index-producing directory.
#[derive(Debug, Default)]
pub struct TopicCounts {
    counts: BTreeMap<String, TopicCount>,
}

impl TopicCounts {
    /// Aggregate counts bottom-up over the plan.
    #[must_use]
    pub fn aggregate(plan: &Plan) -> Self {
        let mut counts: BTreeMap<String, TopicCount> = BTreeMap::new();

        // Children precede parents in deepest-first order.
        for dir in plan.all_dirs_deepest_first() {
            let file_topics = plan.documents(dir).len();
            let below: usize = plan
                .children(dir)
                .iter()
                .filter_map(|child| counts.get(child))
                .map(|c| c.tree_topics)
                .sum();
            counts.insert(
                dir.to_owned(),
                TopicCount {
                    file_topics,
                    tree_topics: file_topics + below,
                },
            );
        }

        Self { counts }
    }

    /// Count for a directory (zero when it produces no index).
    #[must_use]
    pub fn get(&self, dir: &str) -> TopicCount {
        self.counts.get(dir).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tocgen_custom::CustomizationStore;

    use crate::group::Groups;

    fn count(file_topics: usize, tree_topics: usize) -> TopicCount {
        TopicCount {
            file_topics,
            tree_topics,
        }
    }

    #[test]
    fn test_display_thresholds() {
        assert_eq!(count(1, 1).to_string(), "1 topic");
        assert_eq!(count(4, 4).to_string(), "4 topics");
        // 1.5x exceeded but not +5
        assert_eq!(count(2, 7).to_string(), "2 topics");
        // +5 exceeded but not 1.5x
        assert_eq!(count(20, 29).to_string(), "20 topics");
        assert_eq!(count(20, 31).to_string(), "20 topics, 31 in tree");
        assert_eq!(count(2, 8).to_string(), "2 topics, 8 in tree");
        // exactly 1.5x is not enough
        assert_eq!(count(12, 18).to_string(), "12 topics");
    }

    #[test]
    fn test_display_zero_file_topics() {
        assert_eq!(count(0, 3).to_string(), "0 topics");
        assert_eq!(count(0, 5).to_string(), "0 topics");
        assert_eq!(count(0, 6).to_string(), "6 in tree");
        assert_eq!(count(0, 0).to_string(), "0 topics");
    }

    #[test]
    fn test_aggregate_is_additive() {
        let groups: Groups = [
            ("", vec!["r.md"]),
            ("a", vec!["a/1.md", "a/2.md"]),
            ("a/b/c", vec!["a/b/c/1.md"]),
            ("z", vec!["z/1.md", "z/2.md", "z/3.md"]),
        ]
        .into_iter()
        .map(|(dir, docs)| (dir.to_owned(), docs.into_iter().map(str::to_owned).collect()))
        .collect();
        let plan = Plan::build(groups, &CustomizationStore::default());

        let counts = TopicCounts::aggregate(&plan);

        assert_eq!(counts.get("a/b/c"), count(1, 1));
        assert_eq!(counts.get("a/b"), count(0, 1));
        assert_eq!(counts.get("a"), count(2, 3));
        assert_eq!(counts.get(""), count(1, 7));
        assert_eq!(counts.get("missing"), count(0, 0));

        for dir in plan.all_dirs_deepest_first() {
            let c = counts.get(dir);
            assert!(c.tree_topics >= c.file_topics);
            let children: usize = plan
                .children(dir)
                .iter()
                .map(|child| counts.get(child).tree_topics)
                .sum();
            assert_eq!(c.tree_topics, c.file_topics + children);
        }
    }
}
