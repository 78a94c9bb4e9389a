//! Shared read-only state of one synthesis run.

use tocgen_custom::CustomizationStore;
use tocgen_docs::path::{file_name, titlecase_from_slug};
use tocgen_docs::{DocumentIndex, FileRecord};

use crate::counts::TopicCounts;
use crate::document::{LinkEntry, one_line};
use crate::links::LinkBuilder;
use crate::options::SynthOptions;
use crate::plan::Plan;

/// Titles that say nothing about a directory's content.
const GENERIC_TITLES: &[&str] = &[
    "readme",
    "index",
    "overview",
    "introduction",
    "home",
    "contents",
];

/// File stems of a directory's own landing document.
const LANDING_STEMS: &[&str] = &["index", "readme"];

/// Everything assembly needs to know about the tree.
pub(crate) struct Context<'a> {
    pub index: &'a DocumentIndex,
    pub store: &'a CustomizationStore,
    pub options: &'a SynthOptions,
    pub plan: &'a Plan,
    pub counts: &'a TopicCounts,
    pub links: LinkBuilder,
}

impl Context<'_> {
    /// Resolved title of a directory's index.
    ///
    /// Customization title, then the non-generic title of the directory's
    /// own `index`/`README` document, then the title-cased directory name.
    /// The root falls back to the site title.
    pub fn title(&self, dir: &str) -> String {
        if let Some(title) = self
            .store
            .get(dir)
            .and_then(|c| c.title.as_deref())
            .and_then(one_line)
        {
            return title;
        }
        if let Some(title) = self
            .landing_document(dir)
            .and_then(|record| one_line(&record.title))
            .filter(|title| !is_generic_title(title))
        {
            return title;
        }
        if dir.is_empty() {
            self.options.site_title.clone()
        } else {
            titlecase_from_slug(file_name(dir))
        }
    }

    /// Resolved description of a directory's index.
    pub fn description(&self, dir: &str) -> Option<String> {
        self.store
            .get(dir)
            .and_then(|c| c.description.as_deref())
            .or_else(|| {
                self.landing_document(dir)
                    .and_then(|r| r.description.as_deref())
            })
            .and_then(one_line)
    }

    /// Description used when a parent lists this directory.
    pub fn short_description(&self, dir: &str) -> Option<String> {
        self.store
            .short_description(dir)
            .and_then(one_line)
            .or_else(|| self.description(dir))
    }

    /// Link to the primary index of `dir`, annotated with its topic count.
    pub fn index_link(&self, from_dir: &str, dir: &str) -> LinkEntry {
        LinkEntry {
            title: self.title(dir),
            href: self
                .links
                .index_href(from_dir, dir, &self.options.index_name),
            metric: Some(self.counts.get(dir).to_string()),
            description: self.short_description(dir),
            target: dir.to_owned(),
        }
    }

    /// Link to a document, with node overrides applied.
    ///
    /// Overrides declared by the directory listing the document win over
    /// those declared by the document's own directory.
    pub fn document_link(&self, from_dir: &str, record: &FileRecord) -> LinkEntry {
        let name = record.file_name();
        let node = self
            .store
            .node_override(from_dir, name)
            .or_else(|| self.store.node_override(record.dir(), name));

        let title = node
            .and_then(|n| n.title.as_deref())
            .and_then(one_line)
            .or_else(|| one_line(&record.title))
            .unwrap_or_else(|| record.path.clone());
        let description = node
            .and_then(|n| n.description.as_deref())
            .or(record.description.as_deref())
            .and_then(one_line);

        LinkEntry {
            title,
            href: self.links.href(from_dir, &record.path),
            metric: None,
            description,
            target: record.path.clone(),
        }
    }

    /// Look up a document by root-relative path, with or without extension.
    pub fn find_document(&self, path: &str) -> Option<&FileRecord> {
        self.index
            .get(path)
            .or_else(|| self.index.get(&format!("{path}.{}", self.options.extension)))
    }

    /// Resolve a root-relative entry to a document or index link.
    ///
    /// Returns `None` (logged at debug level) when the entry names neither
    /// a document nor an index-producing directory.
    pub fn resolve_entry(&self, from_dir: &str, path: &str) -> Option<LinkEntry> {
        if let Some(record) = self.find_document(path) {
            return Some(self.document_link(from_dir, record));
        }
        if self.plan.produces_index(path) {
            return Some(self.index_link(from_dir, path));
        }
        tracing::debug!(dir = %from_dir, entry = %path, "Unresolvable entry, skipping");
        None
    }

    /// The directory's own `index`/`README` document, if any.
    fn landing_document(&self, dir: &str) -> Option<&FileRecord> {
        self.plan
            .documents(dir)
            .iter()
            .filter_map(|path| self.index.get(path))
            .find(|record| is_landing(record) && record.dir() == dir)
    }
}

fn is_landing(record: &FileRecord) -> bool {
    let name = record.file_name();
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    LANDING_STEMS.iter().any(|s| stem.eq_ignore_ascii_case(s))
}

fn is_generic_title(title: &str) -> bool {
    let lowered = title.trim().to_lowercase();
    GENERIC_TITLES.contains(&lowered.as_str())
}
