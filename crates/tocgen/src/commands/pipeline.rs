//! Shared synthesis pipeline for `generate` and `check`.

use std::path::PathBuf;

use clap::Args;
use tocgen_config::{CliSettings, Config};
use tocgen_custom::CustomizationStore;
use tocgen_docs::{DocumentIndex, FsSource};
use tocgen_synth::{RunReport, Synthesis, SynthOptions, Synthesizer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every synthesis command.
#[derive(Args)]
pub(crate) struct PipelineArgs {
    /// Path to configuration file (default: auto-discover tocgen.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Documentation tree root (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Soft line budget (overrides config).
    #[arg(long)]
    pub(crate) soft_budget: Option<usize>,

    /// Hard line budget (overrides config).
    #[arg(long)]
    pub(crate) hard_budget: Option<usize>,

    /// Base URL for absolute links (overrides config).
    #[arg(long, env = "TOCGEN_BASE_URL")]
    pub(crate) base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Loaded configuration plus the outcome of one synthesis run.
pub(crate) struct PipelineRun {
    pub(crate) config: Config,
    pub(crate) options: SynthOptions,
    pub(crate) synthesis: Synthesis,
    pub(crate) report: RunReport,
}

impl PipelineArgs {
    /// Load configuration, discover the tree and synthesize every index.
    pub(crate) fn run(
        &self,
        output_dir: Option<PathBuf>,
        output: &Output,
    ) -> Result<PipelineRun, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            soft_budget: self.soft_budget,
            hard_budget: self.hard_budget,
            base_url: self.base_url.clone(),
            output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        output.info(&format!("Source: {}", source_dir.display()));

        let source = FsSource::new(source_dir.clone())
            .with_extension(&config.docs_resolved.extension)
            .with_excluded_names([
                config.output_resolved.index_name.clone(),
                config.output_resolved.overflow_name.clone(),
            ])
            .with_excluded_names(config.docs_resolved.exclude_names.iter().cloned());
        let index = DocumentIndex::from_sources(&[&source])?;
        let store = CustomizationStore::discover(source_dir, &config.customization.name);

        output.info(&format!(
            "Found {} topic documents, {} customizations",
            index.len(),
            store.len()
        ));

        let options = synth_options(&config);
        let synthesis = Synthesizer::new(&index, &store, &options).synthesize();
        let report = synthesis.report(&options, &store);

        Ok(PipelineRun {
            config,
            options,
            synthesis,
            report,
        })
    }
}

/// Synthesis options from resolved configuration.
pub(crate) fn synth_options(config: &Config) -> SynthOptions {
    SynthOptions {
        soft_budget: config.budget.soft,
        hard_budget: config.budget.hard,
        index_name: config.output_resolved.index_name.clone(),
        overflow_name: config.output_resolved.overflow_name.clone(),
        extension: config.docs_resolved.extension.clone(),
        site_title: config.output_resolved.site_title.clone(),
        base_url: config.output_resolved.base_url.clone(),
    }
}
