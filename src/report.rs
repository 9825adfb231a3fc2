//! Status reporting.
//!
//! One line per non-failed action: two-space indent, the verb right-aligned
//! in a fixed column, two spaces, then the path relative to the project
//! root. Failures never reach stdout; they are reported on the error
//! channel by the command.

use colored::Colorize;

use crate::executor::ActionResult;
use crate::plan::FileAction;

/// Verb column width. Wide enough for the reserved `conflict`/`force`
/// verbs of future overwrite policies.
const VERB_WIDTH: usize = 10;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render the whole batch; with color disabled the output is plain
    /// ASCII and byte-stable across runs.
    pub fn render(&self, records: &[(FileAction, ActionResult)]) -> String {
        records
            .iter()
            .filter_map(|(action, result)| self.line(action, result))
            .collect()
    }

    fn line(&self, action: &FileAction, result: &ActionResult) -> Option<String> {
        let verb = match (action, result) {
            (_, ActionResult::Failed(_)) => return None,
            (_, ActionResult::Skipped) => "skip",
            (FileAction::Create { .. }, ActionResult::Applied) => "create",
            (FileAction::Inject { .. }, ActionResult::Applied) => "inject",
            // A planned Skip only ever resolves to Skipped.
            (FileAction::Skip { .. }, ActionResult::Applied) => "skip",
        };

        // Pad before colorizing so escape sequences don't widen the column.
        let mut verb = format!("{verb:>VERB_WIDTH$}");
        if self.color {
            verb = match result {
                ActionResult::Applied => verb.green().to_string(),
                _ => verb.yellow().to_string(),
            };
        }

        Some(format!("  {verb}  {}\n", action.path().display()))
    }
}
