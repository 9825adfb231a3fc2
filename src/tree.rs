//! Command paths and the per-invocation command tree.
//!
//! The tree is rebuilt from the filesystem on every invocation: a node is
//! `existing` exactly when its dispatcher or leaf file is already on disk.
//! Nodes live root-first in a flat, parent-indexed vector, so traversal in
//! dependency order is a plain iteration.

use std::fmt;

use crate::error::ScaffoldError;
use crate::layout;
use crate::project::FilesystemProbe;

/// Ordered, validated sequence of command name segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath {
    segments: Vec<String>,
}

impl CommandPath {
    /// Validate raw segments into a path.
    ///
    /// Segments must be non-empty, lowercase ASCII, start with a letter and
    /// contain only letters, digits, `-` and `_` — anything else cannot be
    /// turned into a method or file name on the generated side.
    pub fn parse<S: AsRef<str>>(segments: &[S]) -> Result<Self, ScaffoldError> {
        if segments.is_empty() {
            return Err(ScaffoldError::InvalidPath(
                "at least one segment is required".to_string(),
            ));
        }

        let mut validated = Vec::with_capacity(segments.len());
        for raw in segments {
            let segment = raw.as_ref();
            if segment.is_empty() {
                return Err(ScaffoldError::InvalidPath("empty segment".to_string()));
            }

            let mut chars = segment.chars();
            let first_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase());
            let rest_ok = segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
            if !first_ok || !rest_ok {
                return Err(ScaffoldError::InvalidPath(format!(
                    "illegal segment `{segment}`"
                )));
            }

            validated.push(segment.to_string());
        }

        Ok(Self {
            segments: validated,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" "))
    }
}

/// One node per distinct path prefix of the requested command path.
#[derive(Debug, Clone)]
pub struct CommandNode {
    /// Final segment of this node's path.
    pub segment: String,
    /// Full path prefix from the root down to this node.
    pub path: Vec<String>,
    /// Index of the parent node in the tree, root has none.
    pub parent: Option<usize>,
    /// Whether this node's command file is already on disk.
    pub existing: bool,
}

/// Flat, root-first command tree for a single invocation.
#[derive(Debug)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl CommandTree {
    /// Probe the project for every prefix of `path` and tag each node.
    pub fn build(path: &CommandPath, app: &str, probe: &dyn FilesystemProbe) -> Self {
        let segments = path.segments();
        let mut nodes = Vec::with_capacity(segments.len());

        for i in 0..segments.len() {
            let prefix = segments[..=i].to_vec();
            let existing = probe.file_exists(&layout::command_file(app, &prefix));
            nodes.push(CommandNode {
                segment: segments[i].clone(),
                path: prefix,
                parent: if i == 0 { None } else { Some(i - 1) },
                existing,
            });
        }

        Self { nodes }
    }

    /// Nodes in dependency order, root first.
    pub fn nodes(&self) -> &[CommandNode] {
        &self.nodes
    }

    /// The requested command itself.
    pub fn leaf(&self) -> &CommandNode {
        self.nodes.last().expect("tree is never empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    struct FakeProbe(HashSet<PathBuf>);

    impl FakeProbe {
        fn with(paths: &[&str]) -> Self {
            Self(paths.iter().map(PathBuf::from).collect())
        }
    }

    impl FilesystemProbe for FakeProbe {
        fn file_exists(&self, relative: &Path) -> bool {
            self.0.contains(relative)
        }
    }

    fn path(parts: &[&str]) -> CommandPath {
        CommandPath::parse(parts).unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_path() {
        let none: [&str; 0] = [];
        assert!(matches!(
            CommandPath::parse(&none),
            Err(ScaffoldError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_parse_rejects_illegal_segments() {
        for bad in [[""].as_slice(), &["Config"], &["con fig"], &["9lives"], &["set!"]] {
            assert!(
                matches!(CommandPath::parse(bad), Err(ScaffoldError::InvalidPath(_))),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_accepts_typical_segments() {
        assert!(CommandPath::parse(&["config", "set-all", "v2_x"]).is_ok());
    }

    #[test]
    fn test_build_empty_project_marks_full_chain_new() {
        let probe = FakeProbe::with(&[]);
        let tree = CommandTree::build(&path(&["config", "set"]), "newcli", &probe);

        assert_eq!(tree.nodes().len(), 2);
        assert!(tree.nodes().iter().all(|n| !n.existing));
        assert_eq!(tree.nodes()[0].parent, None);
        assert_eq!(tree.nodes()[1].parent, Some(0));
        assert_eq!(tree.leaf().segment, "set");
    }

    #[test]
    fn test_build_existing_dispatcher_new_child() {
        let probe = FakeProbe::with(&["lib/newcli/commands/config.rb"]);
        let tree = CommandTree::build(&path(&["config", "get"]), "newcli", &probe);

        assert!(tree.nodes()[0].existing);
        assert!(!tree.nodes()[1].existing);
    }

    #[test]
    fn test_build_fully_existing_chain() {
        let probe = FakeProbe::with(&[
            "lib/newcli/commands/config.rb",
            "lib/newcli/commands/config/set.rb",
        ]);
        let tree = CommandTree::build(&path(&["config", "set"]), "newcli", &probe);

        assert!(tree.nodes().iter().all(|n| n.existing));
    }

    #[test]
    fn test_node_paths_are_prefixes() {
        let probe = FakeProbe::with(&[]);
        let tree = CommandTree::build(&path(&["a", "b", "c"]), "app", &probe);

        assert_eq!(tree.nodes()[0].path, ["a"]);
        assert_eq!(tree.nodes()[1].path, ["a", "b"]);
        assert_eq!(tree.nodes()[2].path, ["a", "b", "c"]);
    }
}
