//! Colored terminal output utilities.

use console::{Style, Term};
use tocgen_synth::RunReport;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a separator line.
    pub(crate) fn separator(&self) {
        let _ = self.term.write_line(&"=".repeat(70));
    }

    /// Print the budget and failure summary of a run.
    pub(crate) fn report_summary(&self, report: &RunReport) {
        self.separator();
        self.highlight(&format!("{} index documents", report.documents.len()));

        let over_soft = report.over_soft();
        let over_hard = report.over_hard();
        if over_soft > 0 {
            self.warning(&format!("{over_soft} over soft budget"));
        }
        if over_hard > 0 {
            self.warning(&format!("{over_hard} over hard budget"));
        }
        for warning in &report.warnings {
            self.warning(&format!("Warning: {}: {}", warning.path, warning.message));
        }
        for failure in &report.failures {
            self.error(&format!("Failed: {}: {}", display_dir(&failure.dir), failure.error));
        }
    }
}

/// Directory path for display (`.` for the tree root).
pub(crate) fn display_dir(dir: &str) -> &str {
    if dir.is_empty() { "." } else { dir }
}
