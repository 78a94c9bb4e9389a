//! Synthesis options.

/// Knobs controlling index synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthOptions {
    /// Line count above which a document is reported as over the soft budget.
    pub soft_budget: usize,
    /// Line count above which a navigation index overflows.
    pub hard_budget: usize,
    /// Filename of the primary index.
    pub index_name: String,
    /// Filename of the extended (overflow) index.
    pub overflow_name: String,
    /// Topic document extension without the dot.
    pub extension: String,
    /// Title of the root index.
    pub site_title: String,
    /// Base URL for absolute links (no trailing slash).
    pub base_url: Option<String>,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            soft_budget: 50,
            hard_budget: 75,
            index_name: "INDEX.md".to_owned(),
            overflow_name: "INDEX-EXTENDED.md".to_owned(),
            extension: "md".to_owned(),
            site_title: "Documentation".to_owned(),
            base_url: None,
        }
    }
}

impl SynthOptions {
    /// Ceiling applied to leaf directories, which never overflow.
    #[must_use]
    pub fn leaf_ceiling(&self) -> usize {
        self.hard_budget.saturating_mul(2)
    }
}
