//! Single source of truth for the generated project's filesystem layout.
//!
//! This module defines WHERE scaffolded files live. It has no I/O, no
//! validation, no planning logic. One file shows the entire layout.
//!
//! ```text
//! <project root>/
//! ├── .chisel.toml                          # project config (test framework)
//! ├── lib/<app>/
//! │   ├── cli.rb                            # command registry (inject target)
//! │   ├── commands/<a>.rb                   # dispatcher for `<app> <a>`
//! │   ├── commands/<a>/<b>.rb               # leaf for `<app> <a> <b>`
//! │   └── templates/<a>/<b>/.gitkeep        # per-command asset directory
//! ├── spec/integration/<a>/<b>_spec.rb      # rspec variant
//! ├── spec/unit/<a>/<b>_spec.rb
//! ├── test/integration/<a>/<b>_test.rb      # minitest variant
//! └── test/unit/<a>/<b>_test.rb
//! ```
//!
//! All returned paths are relative to the project root; the executor joins
//! them onto the root when touching disk.

use std::path::PathBuf;

use crate::project::TestFramework;

/// Project config file written by the bootstrapper.
pub const CONFIG_FILE: &str = ".chisel.toml";

/// Root command registry: `lib/<app>/cli.rb`.
pub fn registry_file(app: &str) -> PathBuf {
    PathBuf::from("lib").join(app).join("cli.rb")
}

/// Dispatcher or leaf class file: `lib/<app>/commands/<p1>/…/<pk>.rb`.
pub fn command_file(app: &str, segments: &[String]) -> PathBuf {
    let mut path = PathBuf::from("lib").join(app).join("commands");
    for segment in &segments[..segments.len() - 1] {
        path.push(segment);
    }
    path.join(format!("{}.rb", segments[segments.len() - 1]))
}

/// Integration help test for a command path.
pub fn integration_test_file(framework: TestFramework, segments: &[String]) -> PathBuf {
    test_file(framework, "integration", segments)
}

/// Unit test for a leaf command path.
pub fn unit_test_file(framework: TestFramework, segments: &[String]) -> PathBuf {
    test_file(framework, "unit", segments)
}

/// Empty marker establishing the per-command template-assets directory.
pub fn asset_marker_file(app: &str, segments: &[String]) -> PathBuf {
    let mut path = PathBuf::from("lib").join(app).join("templates");
    for segment in segments {
        path.push(segment);
    }
    path.join(".gitkeep")
}

fn test_file(framework: TestFramework, level: &str, segments: &[String]) -> PathBuf {
    let (tree, suffix) = match framework {
        TestFramework::Rspec => ("spec", "_spec.rb"),
        TestFramework::Minitest => ("test", "_test.rb"),
    };
    let mut path = PathBuf::from(tree).join(level);
    for segment in &segments[..segments.len() - 1] {
        path.push(segment);
    }
    path.join(format!("{}{}", segments[segments.len() - 1], suffix))
}
