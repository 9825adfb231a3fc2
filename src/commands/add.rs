//! Add a nested subcommand to the current project.
//!
//! Pipeline per invocation: validate the path, discover the project, build
//! the command tree, plan one ordered batch, apply it, report. Planning and
//! execution are idempotent, so re-running the same `add` after a partial
//! failure converges instead of corrupting the tree.

use anyhow::{Context, Result};

use crate::executor::{ActionResult, Executor};
use crate::plan::{FileAction, Planner};
use crate::project::ProjectContext;
use crate::report::Reporter;
use crate::tree::{CommandPath, CommandTree};

/// Everything one invocation produced, in application order.
pub struct Outcome {
    /// Planned actions paired with their terminal results.
    pub records: Vec<(FileAction, ActionResult)>,
    /// Artifacts that never became actions (template rendering failed).
    pub failures: Vec<(std::path::PathBuf, crate::error::ScaffoldError)>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
            && self
                .records
                .iter()
                .all(|(_, result)| !matches!(result, ActionResult::Failed(_)))
    }
}

/// Run the scaffolding pipeline against an already-discovered project.
pub fn run(ctx: &ProjectContext, path: &CommandPath) -> Outcome {
    let tree = CommandTree::build(path, &ctx.app_name, ctx);
    let plan = Planner::new(ctx, ctx).plan(&tree);
    let results = Executor::new(ctx.root.clone()).apply(&plan.actions);

    Outcome {
        records: plan.actions.into_iter().zip(results).collect(),
        failures: plan.failures,
    }
}

/// Execute the `add` command. Returns the process exit code: zero when no
/// action failed.
pub fn execute(segments: Vec<String>, no_color: bool) -> Result<i32> {
    let path = CommandPath::parse(&segments)?;

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let ctx = ProjectContext::discover(&cwd)?;

    let color = !no_color && atty::is(atty::Stream::Stdout);
    let outcome = run(&ctx, &path);

    print!("{}", Reporter::new(color).render(&outcome.records));

    for (action, result) in &outcome.records {
        if let ActionResult::Failed(reason) = result {
            eprintln!("{}: {reason}", action.path().display());
        }
    }
    for (target, err) in &outcome.failures {
        eprintln!("{}: {err}", target.display());
    }

    Ok(if outcome.is_success() { 0 } else { 1 })
}
