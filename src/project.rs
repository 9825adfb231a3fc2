//! Project context discovery.
//!
//! A bootstrapped project is recognized by its command registry at
//! `lib/<app>/cli.rb`. The registry location is the single source of truth
//! for the application name; the test framework chosen at bootstrap time is
//! read from `.chisel.toml`.

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScaffoldError;
use crate::layout;

/// Test framework recorded by the bootstrapper.
///
/// The variant changes only where test files live and what boilerplate they
/// carry; generated command source files are identical across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Rspec,
    Minitest,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectConfig {
    test_framework: Option<TestFramework>,
}

/// Immutable per-invocation view of the target project.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Project root directory (the one containing `lib/<app>/cli.rb`).
    pub root: PathBuf,
    /// Application name derived from the registry location.
    pub app_name: String,
    /// Test framework recorded at bootstrap time.
    pub test_framework: TestFramework,
}

/// Existence query against the project tree, keyed by root-relative path.
///
/// The builder and planner only ever ask "is this file present?", so this is
/// the whole seam: tests swap in an in-memory set instead of a tempdir.
pub trait FilesystemProbe {
    fn file_exists(&self, relative: &Path) -> bool;
}

impl ProjectContext {
    /// Walk upward from `start` until a command registry is found.
    ///
    /// Fails with `MissingProjectContext` when no ancestor directory holds a
    /// `lib/<app>/cli.rb`.
    pub fn discover(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if let Some(app_name) = registry_app(&current) {
                return Self::load(current, app_name);
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                return Err(ScaffoldError::MissingProjectContext.into());
            }
        }
    }

    /// Build a context for a known project root.
    pub fn load(root: PathBuf, app_name: String) -> Result<Self> {
        let config_path = root.join(layout::CONFIG_FILE);
        let config = if config_path.exists() {
            let raw = fs::read_to_string(&config_path)?;
            toml::from_str::<ProjectConfig>(&raw)
                .map_err(|e| anyhow::anyhow!("invalid {}: {e}", layout::CONFIG_FILE))?
        } else {
            ProjectConfig::default()
        };

        Ok(Self {
            root,
            app_name,
            // Absent config means the bootstrapper default.
            test_framework: config.test_framework.unwrap_or(TestFramework::Rspec),
        })
    }
}

impl FilesystemProbe for ProjectContext {
    fn file_exists(&self, relative: &Path) -> bool {
        self.root.join(relative).is_file()
    }
}

/// App name for `dir` if it contains a registry, i.e. `dir/lib/<app>/cli.rb`.
fn registry_app(dir: &Path) -> Option<String> {
    let lib = dir.join("lib");
    let mut apps: Vec<String> = fs::read_dir(&lib)
        .ok()?
        .flatten()
        .filter(|entry| entry.path().join("cli.rb").is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    // Deterministic pick if a project somehow carries several registries.
    apps.sort();
    apps.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_project(app: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib").join(app);
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("cli.rb"), "module App\nend\n").unwrap();
        dir
    }

    #[test]
    fn test_discover_from_project_root() {
        let dir = fake_project("newcli");
        let ctx = ProjectContext::discover(dir.path()).unwrap();
        assert_eq!(ctx.app_name, "newcli");
        assert_eq!(ctx.root, dir.path());
        assert_eq!(ctx.test_framework, TestFramework::Rspec);
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let dir = fake_project("newcli");
        let sub = dir.path().join("lib").join("newcli").join("commands");
        fs::create_dir_all(&sub).unwrap();

        let ctx = ProjectContext::discover(&sub).unwrap();
        assert_eq!(ctx.root, dir.path());
    }

    #[test]
    fn test_discover_outside_project_fails() {
        let dir = TempDir::new().unwrap();
        let err = ProjectContext::discover(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::MissingProjectContext)
        ));
    }

    #[test]
    fn test_config_selects_minitest() {
        let dir = fake_project("newcli");
        fs::write(
            dir.path().join(layout::CONFIG_FILE),
            "test_framework = \"minitest\"\n",
        )
        .unwrap();

        let ctx = ProjectContext::discover(dir.path()).unwrap();
        assert_eq!(ctx.test_framework, TestFramework::Minitest);
    }

    #[test]
    fn test_unknown_framework_is_rejected() {
        let dir = fake_project("newcli");
        fs::write(
            dir.path().join(layout::CONFIG_FILE),
            "test_framework = \"cucumber\"\n",
        )
        .unwrap();

        assert!(ProjectContext::discover(dir.path()).is_err());
    }
}
