//! Synthesis pipeline.

use rayon::prelude::*;
use tocgen_custom::CustomizationStore;
use tocgen_docs::DocumentIndex;

use crate::assemble::assemble;
use crate::context::Context;
use crate::counts::TopicCounts;
use crate::document::GeneratedDocument;
use crate::group::group_documents;
use crate::links::LinkBuilder;
use crate::navigation::navigate;
use crate::options::SynthOptions;
use crate::plan::Plan;
use crate::report::RunReport;

/// Generates every index for a document tree.
///
/// # Example
///
/// ```ignore
/// use tocgen_synth::{SynthOptions, Synthesizer};
///
/// let synthesis = Synthesizer::new(&index, &store, &options).synthesize();
/// for doc in &synthesis.documents {
///     println!("{} ({} lines)", doc.path, doc.lines);
/// }
/// ```
pub struct Synthesizer<'a> {
    index: &'a DocumentIndex,
    store: &'a CustomizationStore,
    options: &'a SynthOptions,
}

/// Output of one synthesis run.
#[derive(Debug, Default)]
pub struct Synthesis {
    /// Generated documents in path order.
    pub documents: Vec<GeneratedDocument>,
    /// Child-reference sections left out of their directory's index.
    pub skipped_sections: Vec<SkippedSection>,
}

/// Child-reference section whose path names no subdirectory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedSection {
    /// Directory declaring the section.
    pub dir: String,
    /// Section path as written.
    pub path: String,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer over a built index and customization store.
    #[must_use]
    pub fn new(
        index: &'a DocumentIndex,
        store: &'a CustomizationStore,
        options: &'a SynthOptions,
    ) -> Self {
        Self {
            index,
            store,
            options,
        }
    }

    /// Generate every primary, extended and navigation index.
    ///
    /// Content directories are assembled in parallel; gap directories are
    /// handled afterwards, deepest first. Invalid child-reference sections
    /// are left out and recorded; the rest of the directory is still indexed.
    #[must_use]
    pub fn synthesize(&self) -> Synthesis {
        let plan = Plan::build(group_documents(self.index, self.store), self.store);
        let counts = TopicCounts::aggregate(&plan);
        let ctx = Context {
            index: self.index,
            store: self.store,
            options: self.options,
            plan: &plan,
            counts: &counts,
            links: LinkBuilder::new(self.options.base_url.clone()),
        };

        let content_dirs: Vec<&str> = plan.content_dirs().collect();
        let results: Vec<_> = content_dirs
            .par_iter()
            .map(|dir| (*dir, assemble(&ctx, dir)))
            .collect();

        let mut synthesis = Synthesis::default();
        for (dir, assembly) in results {
            synthesis.documents.extend(assembly.documents);
            synthesis
                .skipped_sections
                .extend(assembly.skipped_sections.into_iter().map(|path| SkippedSection {
                    dir: dir.to_owned(),
                    path,
                }));
        }

        for dir in plan.gap_dirs_deepest_first() {
            synthesis.documents.push(navigate(&ctx, dir));
        }

        synthesis.documents.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::info!(
            documents = synthesis.documents.len(),
            skipped_sections = synthesis.skipped_sections.len(),
            top = ?plan.top(),
            "Synthesis complete"
        );
        synthesis
    }
}

impl Synthesis {
    /// Build the run report, including ignored customization documents.
    #[must_use]
    pub fn report(&self, options: &SynthOptions, store: &CustomizationStore) -> RunReport {
        let mut report = RunReport::new(&self.documents, options);
        for skipped in &self.skipped_sections {
            let dir = if skipped.dir.is_empty() { "." } else { skipped.dir.as_str() };
            report.record_warning(
                dir,
                &format!("section path `{}` names no subdirectory, skipped", skipped.path),
            );
        }
        for rejected in store.rejected() {
            report.record_warning(&rejected.path.display().to_string(), &rejected.error);
        }
        report
    }
}
