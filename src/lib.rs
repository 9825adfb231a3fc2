pub mod anchor;
pub mod commands;
pub mod error;
pub mod executor;
pub mod layout;
pub mod plan;
pub mod project;
pub mod render;
pub mod report;
pub mod templates;
pub mod tree;

// Re-export commonly used types
pub use error::ScaffoldError;
pub use project::{ProjectContext, TestFramework};
pub use tree::CommandPath;
