use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while scaffolding.
///
/// `InvalidPath` and `MissingProjectContext` are invocation-level: they are
/// raised before any action is planned and abort the run with no filesystem
/// mutation. The remaining kinds are scoped to a single action and surface
/// as `Failed` results while the rest of the batch proceeds.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid command path: {0}")]
    InvalidPath(String),

    #[error("not inside a bootstrapped project (no command registry found)")]
    MissingProjectContext,

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("no insertion anchor in {}: {detail}", path.display())]
    AnchorNotFound { path: PathBuf, detail: String },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
