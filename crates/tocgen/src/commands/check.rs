//! `tocgen check` command implementation.

use clap::Args;

use super::pipeline::PipelineArgs;
use crate::error::CliError;
use crate::output::{Output, display_dir};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) pipeline: PipelineArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let run = self.pipeline.run(None, &output)?;

        output.report_summary(&run.report);

        let violations = run.report.budget_violations();
        for doc in &violations {
            output.error(&format!(
                "{}: {} lines (hard budget {})",
                display_dir(&doc.dir),
                doc.lines,
                run.options.hard_budget
            ));
        }

        if run.report.has_failures() {
            return Err(CliError::Failed(run.report.failures.len()));
        }
        if !violations.is_empty() {
            return Err(CliError::Budget(violations.len()));
        }

        output.success("All navigation indices within the hard budget");
        Ok(())
    }
}
