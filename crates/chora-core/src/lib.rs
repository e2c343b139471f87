//! # Chora Core
//!
//! Editor logic that does not depend on the GUI toolkit.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  chora-ui                    │
//! │   tabs ──┐     tree ──┐     terminal ──┐     │
//! └──────────┼────────────┼────────────────┼─────┘
//!            ▼            ▼                ▼
//!       ┌─────────┐ ┌───────────┐ ┌──────────────────┐
//!       │Document │ │ FileTree  │ │ TerminalSession  │
//!       └─────────┘ │ + watcher │ │  └ process runner│
//!                   └───────────┘ └──────────────────┘
//!                 Settings (config.rs, TOML on disk)
//! ```
//!
//! Nothing in here draws anything. The UI crate owns the widgets and turns
//! the values produced here into views and status messages.

pub mod config;
pub mod document;
pub mod terminal;
pub mod workspace;

use std::path::PathBuf;

pub use config::{ConfigError, Settings};
pub use document::{Document, DocumentId, line_number_area_width};
pub use terminal::{
    CommandRequest, RunId, Submission, TerminalSession,
    output::{LineKind, OutputLine},
    process::{ExitOutcome, ProcessEvent, RunningProcess, ShellInvocation},
};
pub use workspace::{FileNode, FileTree, NodeKind, WorkspaceWatcher};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// The user's home directory, or the filesystem root when it cannot be
/// determined.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}
