//! Run report.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::document::{DocumentKind, GeneratedDocument};
use crate::options::SynthOptions;

/// Where a document's line count falls relative to the budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// At or below the soft budget.
    Within,
    /// Above the soft budget, at or below the ceiling.
    OverSoft,
    /// Above the ceiling.
    OverHard,
}

impl BudgetStatus {
    /// Classify a line count against a soft budget and a ceiling.
    #[must_use]
    pub fn classify(lines: usize, soft: usize, ceiling: usize) -> Self {
        if lines > ceiling {
            Self::OverHard
        } else if lines > soft {
            Self::OverSoft
        } else {
            Self::Within
        }
    }
}

/// Summary of one generated document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Directory the document belongs to.
    pub dir: String,
    /// Document kind.
    pub kind: DocumentKind,
    /// Output path relative to the tree root.
    pub path: String,
    /// Line count.
    pub lines: usize,
    /// Whether the directory is a leaf (ceiling is twice the hard budget).
    pub leaf: bool,
    /// Budget classification.
    pub budget_status: BudgetStatus,
}

/// Directory that produced no output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Directory path.
    pub dir: String,
    /// Error message.
    pub error: String,
}

/// Non-fatal problem found during the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Path the warning refers to.
    pub path: String,
    /// Warning message.
    pub message: String,
}

/// Outcome of one synthesis run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Generated documents in path order.
    pub documents: Vec<DocumentReport>,
    /// Per-directory failures.
    pub failures: Vec<Failure>,
    /// Non-fatal warnings (e.g., ignored customization documents).
    pub warnings: Vec<Warning>,
}

impl RunReport {
    /// Build a report for generated documents.
    ///
    /// Leaf primaries and extended indices are measured against twice the
    /// hard budget; every other document against the hard budget.
    #[must_use]
    pub fn new(documents: &[GeneratedDocument], options: &SynthOptions) -> Self {
        let documents = documents
            .iter()
            .map(|doc| {
                let ceiling = if doc.leaf || doc.kind == DocumentKind::Overflow {
                    options.leaf_ceiling()
                } else {
                    options.hard_budget
                };
                DocumentReport {
                    dir: doc.dir.clone(),
                    kind: doc.kind,
                    path: doc.path.clone(),
                    lines: doc.lines,
                    leaf: doc.leaf,
                    budget_status: BudgetStatus::classify(
                        doc.lines,
                        options.soft_budget,
                        ceiling,
                    ),
                }
            })
            .collect();

        Self {
            documents,
            failures: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a directory failure.
    pub fn record_failure(&mut self, dir: &str, error: &impl std::fmt::Display) {
        self.failures.push(Failure {
            dir: dir.to_owned(),
            error: error.to_string(),
        });
    }

    /// Record a warning.
    pub fn record_warning(&mut self, path: &str, message: &impl std::fmt::Display) {
        self.warnings.push(Warning {
            path: path.to_owned(),
            message: message.to_string(),
        });
    }

    /// Number of documents over the soft budget (but not the ceiling).
    #[must_use]
    pub fn over_soft(&self) -> usize {
        self.count_status(BudgetStatus::OverSoft)
    }

    /// Number of documents over their ceiling.
    #[must_use]
    pub fn over_hard(&self) -> usize {
        self.count_status(BudgetStatus::OverHard)
    }

    /// Whether any directory failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Navigation (non-leaf) indices over the hard budget without an extended index.
    #[must_use]
    pub fn budget_violations(&self) -> Vec<&DocumentReport> {
        let overflowed: BTreeSet<&str> = self
            .documents
            .iter()
            .filter(|d| d.kind == DocumentKind::Overflow)
            .map(|d| d.dir.as_str())
            .collect();

        self.documents
            .iter()
            .filter(|d| {
                d.kind != DocumentKind::Overflow
                    && !d.leaf
                    && d.budget_status == BudgetStatus::OverHard
                    && !overflowed.contains(d.dir.as_str())
            })
            .collect()
    }

    fn count_status(&self, status: BudgetStatus) -> usize {
        self.documents
            .iter()
            .filter(|d| d.budget_status == status)
            .count()
    }
}
