//! Action execution.
//!
//! One ordered batch, applied strictly in sequence. Each action resolves to
//! its own result; a failure is recorded and the batch keeps going, because
//! the idempotence guarantees make a later re-run the recovery path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::anchor;
use crate::error::ScaffoldError;
use crate::plan::FileAction;

/// Terminal outcome of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Applied,
    Skipped,
    Failed(String),
}

pub struct Executor {
    root: PathBuf,
}

impl Executor {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Apply every action in order, collecting one result per action.
    pub fn apply(&self, actions: &[FileAction]) -> Vec<ActionResult> {
        actions.iter().map(|action| self.apply_one(action)).collect()
    }

    fn apply_one(&self, action: &FileAction) -> ActionResult {
        match action {
            FileAction::Create { path, content } => self.create(path, content),
            FileAction::Inject {
                path,
                anchor,
                content,
                signature,
            } => self.inject(path, anchor, content, signature),
            FileAction::Skip { .. } => ActionResult::Skipped,
        }
    }

    fn create(&self, path: &Path, content: &str) -> ActionResult {
        let target = self.root.join(path);

        // Re-checked here, not just at planning time: a file that appeared
        // since the plan was made must still never be overwritten.
        if target.exists() {
            return ActionResult::Skipped;
        }

        if let Some(parent) = target.parent() {
            if let Err(source) = fs::create_dir_all(parent) {
                return write_failure(path, source);
            }
        }
        match fs::write(&target, content) {
            Ok(()) => ActionResult::Applied,
            Err(source) => write_failure(path, source),
        }
    }

    fn inject(
        &self,
        path: &Path,
        anchor: &anchor::Anchor,
        content: &str,
        signature: &str,
    ) -> ActionResult {
        let target = self.root.join(path);

        let current = match fs::read_to_string(&target) {
            Ok(current) => current,
            Err(source) => {
                return ActionResult::Failed(format!(
                    "failed to read {}: {source}",
                    path.display()
                ))
            }
        };

        // Idempotence guard: the stanza's signature already being present
        // means this addition has been made before.
        if current.contains(signature) {
            return ActionResult::Skipped;
        }

        let offset = match anchor::insertion_offset(&current, anchor) {
            Some(offset) => offset,
            None => return ActionResult::Failed(anchor::not_found(path, anchor).to_string()),
        };

        // Whole-file rewrite; untouched regions are carried byte-for-byte.
        let mut updated = String::with_capacity(current.len() + content.len());
        updated.push_str(&current[..offset]);
        updated.push_str(content);
        updated.push_str(&current[offset..]);

        match fs::write(&target, updated) {
            Ok(()) => ActionResult::Applied,
            Err(source) => write_failure(path, source),
        }
    }
}

fn write_failure(path: &Path, source: std::io::Error) -> ActionResult {
    ActionResult::Failed(
        ScaffoldError::FileWrite {
            path: path.to_path_buf(),
            source,
        }
        .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use tempfile::TempDir;

    fn executor() -> (TempDir, Executor) {
        let dir = TempDir::new().unwrap();
        let executor = Executor::new(dir.path().to_path_buf());
        (dir, executor)
    }

    #[test]
    fn test_create_writes_file_and_parents() {
        let (dir, executor) = executor();
        let action = FileAction::Create {
            path: PathBuf::from("lib/app/commands/config.rb"),
            content: "class Config\nend\n".to_string(),
        };

        assert_eq!(executor.apply(&[action]), [ActionResult::Applied]);
        let written = fs::read_to_string(dir.path().join("lib/app/commands/config.rb")).unwrap();
        assert_eq!(written, "class Config\nend\n");
    }

    #[test]
    fn test_create_never_overwrites() {
        let (dir, executor) = executor();
        fs::write(dir.path().join("present.rb"), "original").unwrap();
        let action = FileAction::Create {
            path: PathBuf::from("present.rb"),
            content: "replacement".to_string(),
        };

        assert_eq!(executor.apply(&[action]), [ActionResult::Skipped]);
        assert_eq!(
            fs::read_to_string(dir.path().join("present.rb")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_inject_splices_at_class_boundary() {
        let (dir, executor) = executor();
        fs::write(
            dir.path().join("cli.rb"),
            "module App\n  class CLI < Thor\n    def version\n    end\n  end\nend\n",
        )
        .unwrap();

        let action = FileAction::Inject {
            path: PathBuf::from("cli.rb"),
            anchor: Anchor::Registry,
            content: "\n    register App::Commands::Config\n".to_string(),
            signature: "register App::Commands::Config".to_string(),
        };

        assert_eq!(executor.apply(&[action]), [ActionResult::Applied]);
        assert_eq!(
            fs::read_to_string(dir.path().join("cli.rb")).unwrap(),
            "module App\n  class CLI < Thor\n    def version\n    end\n\n    register App::Commands::Config\n  end\nend\n"
        );
    }

    #[test]
    fn test_inject_with_signature_present_is_skipped() {
        let (dir, executor) = executor();
        let content = "module App\n  class CLI < Thor\n    register App::Commands::Config\n  end\nend\n";
        fs::write(dir.path().join("cli.rb"), content).unwrap();

        let action = FileAction::Inject {
            path: PathBuf::from("cli.rb"),
            anchor: Anchor::Registry,
            content: "\n    register App::Commands::Config\n".to_string(),
            signature: "register App::Commands::Config".to_string(),
        };

        assert_eq!(executor.apply(&[action]), [ActionResult::Skipped]);
        assert_eq!(
            fs::read_to_string(dir.path().join("cli.rb")).unwrap(),
            content
        );
    }

    #[test]
    fn test_inject_without_anchor_fails_and_batch_continues() {
        let (dir, executor) = executor();
        fs::write(dir.path().join("leaf.rb"), "module App\nend\n").unwrap();

        let actions = [
            FileAction::Inject {
                path: PathBuf::from("leaf.rb"),
                anchor: Anchor::Dispatcher {
                    namespace: "config".to_string(),
                },
                content: "\n  stanza\n".to_string(),
                signature: "stanza-signature".to_string(),
            },
            FileAction::Create {
                path: PathBuf::from("after.rb"),
                content: "ok\n".to_string(),
            },
        ];

        let results = executor.apply(&actions);
        assert!(matches!(&results[0], ActionResult::Failed(reason) if reason.contains("anchor")));
        assert_eq!(results[1], ActionResult::Applied);
        // The unanchored target is left untouched.
        assert_eq!(
            fs::read_to_string(dir.path().join("leaf.rb")).unwrap(),
            "module App\nend\n"
        );
    }

    #[test]
    fn test_inject_missing_file_fails() {
        let (_dir, executor) = executor();
        let action = FileAction::Inject {
            path: PathBuf::from("absent.rb"),
            anchor: Anchor::Registry,
            content: "x".to_string(),
            signature: "x".to_string(),
        };

        assert!(matches!(
            executor.apply(&[action])[0],
            ActionResult::Failed(_)
        ));
    }

    #[test]
    fn test_skip_action_reports_skipped() {
        let (_dir, executor) = executor();
        let action = FileAction::Skip {
            path: PathBuf::from("anything.rb"),
            reason: "already exists".to_string(),
        };

        assert_eq!(executor.apply(&[action]), [ActionResult::Skipped]);
    }
}
