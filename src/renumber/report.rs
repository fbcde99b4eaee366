//! Terminal report of a renumbering run
//!
//! Every run ends in exactly one [`RunReport`]. `render` produces the plain
//! text shown to the user; colouring is left to the command layer.

use super::executor::RenumberOutcome;
use super::plan::{RenumberAssignment, RenumberRequest};
use std::error::Error;
use std::fmt;

/// Default number of `old -> new` lines listed before truncating
pub const DEFAULT_REPORT_LIMIT: usize = 50;

pub const CANCELLED_MESSAGE: &str = "Operation cancelled by user";
pub const NO_SELECTION_MESSAGE: &str = "Error: No sheets selected for renumbering";
pub const EMPTY_DOCUMENT_MESSAGE: &str = "Error: The document has no sheets to renumber";

/// A run that reached the store and committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub request: RenumberRequest,
    pub outcome: RenumberOutcome,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Completed(CompletedRun),
    /// Plan computed but not written (`--dry-run`)
    Preview {
        request: RenumberRequest,
        plan: Vec<RenumberAssignment>,
    },
    Cancelled,
    NoSelection,
    EmptyDocument,
    /// The transactional phase failed as a whole
    Failed { message: String, trace: String },
}

impl RunReport {
    /// Build a `Failed` report from an error and its source chain
    #[must_use]
    pub fn failed(error: &dyn Error) -> Self {
        let mut trace = String::new();
        let mut source = error.source();
        let mut depth = 0;
        while let Some(cause) = source {
            if depth == 0 {
                trace.push_str("Caused by:");
            }
            trace.push_str(&format!("\n  {depth}: {cause}"));
            depth += 1;
            source = cause.source();
        }
        Self::Failed {
            message: error.to_string(),
            trace,
        }
    }

    /// Whether the run ended without writing anything because of an error
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::NoSelection | Self::EmptyDocument | Self::Failed { .. })
    }

    /// Render the report, listing at most `limit` renumbered sheets
    #[must_use]
    pub fn render(&self, limit: usize) -> String {
        match self {
            Self::Completed(run) => render_completed(run, limit),
            Self::Preview { request, plan } => render_preview(request, plan, limit),
            Self::Cancelled => CANCELLED_MESSAGE.to_string(),
            Self::NoSelection => NO_SELECTION_MESSAGE.to_string(),
            Self::EmptyDocument => EMPTY_DOCUMENT_MESSAGE.to_string(),
            Self::Failed { message, trace } => {
                let mut text = format!("Error while renumbering sheets:\n{message}");
                if !trace.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(trace);
                }
                text
            }
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_REPORT_LIMIT))
    }
}

fn push_header(lines: &mut Vec<String>, request: &RenumberRequest) {
    if !request.prefix.is_empty() {
        lines.push(format!("Prefix: {}", request.prefix));
    }
    lines.push(format!("Start number: {}", request.start_number));
}

fn push_assignments(lines: &mut Vec<String>, assignments: &[RenumberAssignment], limit: usize) {
    if assignments.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.extend(assignments.iter().take(limit).map(ToString::to_string));
    if assignments.len() > limit {
        lines.push(format!("... and {} more sheets", assignments.len() - limit));
    }
}

fn render_completed(run: &CompletedRun, limit: usize) -> String {
    let mut lines = vec!["Renumbering complete!".to_string()];
    push_header(&mut lines, &run.request);
    lines.push(format!("Sheets processed: {}", run.outcome.applied.len()));
    push_assignments(&mut lines, &run.outcome.applied, limit);
    if !run.outcome.failures.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        lines.extend(run.outcome.failures.iter().map(|f| f.message.clone()));
    }
    lines.join("\n")
}

fn render_preview(request: &RenumberRequest, plan: &[RenumberAssignment], limit: usize) -> String {
    let mut lines = vec!["Dry run, nothing was written".to_string()];
    push_header(&mut lines, request);
    lines.push(format!("Sheets to renumber: {}", plan.len()));
    push_assignments(&mut lines, plan, limit);
    lines.join("\n")
}
