//! Budget-aware hierarchical index synthesis.
//!
//! Given a [`DocumentIndex`](tocgen_docs::DocumentIndex) and a
//! [`CustomizationStore`](tocgen_custom::CustomizationStore), this crate
//! generates one short Markdown index per directory of the tree:
//!
//! - content directories get a primary index listing curated sections, their
//!   own topics, child indices and related topics;
//! - when a non-leaf primary index would exceed the hard line budget, its
//!   local topics move into an extended index;
//! - gap directories (ancestors without own content) get a navigation-only
//!   index linking their children.
//!
//! Topic counts are aggregated bottom-up so parents can show how much
//! content sits below each child.

mod assemble;
mod context;
mod counts;
mod document;
mod error;
mod group;
mod links;
mod navigation;
mod options;
mod plan;
mod render;
mod report;
mod synthesizer;
mod write;

pub use counts::{TopicCount, TopicCounts};
pub use document::{
    DocumentKind, GeneratedDocument, GuidanceBlock, IndexDocument, LinkEntry, Section,
};
pub use error::{DirFailure, SynthError};
pub use group::{Groups, group_documents};
pub use links::LinkBuilder;
pub use options::SynthOptions;
pub use plan::Plan;
pub use render::render;
pub use report::{BudgetStatus, DocumentReport, Failure, RunReport, Warning};
pub use synthesizer::{SkippedSection, Synthesis, Synthesizer};
pub use write::{DocumentWriter, WriteOutcome, WriteSummary};
