//! Per-directory customization overlay for tocgen.
//!
//! Each directory may carry one customization document (`_index.yaml` by
//! default) that tunes the index generated for it: title and descriptions,
//! curated sections, offers made to the parent, node overrides, filters,
//! promotion rules and related topics.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tocgen_custom::CustomizationStore;
//!
//! let store = CustomizationStore::discover(Path::new("docs"), "_index.yaml");
//! if store.is_filtered("drafts/wip.md") {
//!     // skip
//! }
//! ```

mod customization;
mod store;

pub use customization::{
    Customization, CustomizationError, Guidance, MAX_OFFERS, NodeOverride, PromotionRule,
    RelatedTopic, SectionDefinition,
};
pub use store::{CustomizationStore, RejectedCustomization, resolve_relative};
