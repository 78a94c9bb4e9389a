//! `tocgen generate` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tocgen_synth::DocumentWriter;

use super::pipeline::PipelineArgs;
use crate::error::CliError;
use crate::output::{Output, display_dir};

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub(crate) pipeline: PipelineArgs,

    /// Mirror generated indices under this directory instead of writing in-tree.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Synthesize without writing any file.
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut run = self.pipeline.run(self.output_dir.clone(), &output)?;

        if self.dry_run {
            for doc in &run.synthesis.documents {
                output.info(&format!("{} ({} lines)", doc.path, doc.lines));
            }
            output.info("Dry run, nothing written");
        } else {
            let writer = match &run.config.output_resolved.dir {
                Some(dir) => {
                    output.info(&format!("Output: {}", dir.display()));
                    DocumentWriter::mirrored(dir)
                }
                None => DocumentWriter::in_tree(&run.config.docs_resolved.source_dir),
            };
            let summary = writer.write_all(&run.synthesis.documents, &run.options.overflow_name);
            for failure in &summary.failures {
                run.report.record_failure(&failure.dir, &failure.error);
            }
            output.success(&format!(
                "{} written, {} unchanged",
                summary.written, summary.unchanged
            ));
            if summary.removed > 0 {
                output.info(&format!("{} stale extended indices removed", summary.removed));
            }
        }

        if let Some(path) = &self.report {
            fs::write(path, serde_json::to_string_pretty(&run.report)?)?;
            output.info(&format!("Report: {}", path.display()));
        }

        output.report_summary(&run.report);

        if run.report.has_failures() {
            let dirs: Vec<&str> = run
                .report
                .failures
                .iter()
                .map(|f| display_dir(&f.dir))
                .collect();
            tracing::debug!(dirs = ?dirs, "Failed directories");
            return Err(CliError::Failed(run.report.failures.len()));
        }
        Ok(())
    }
}
