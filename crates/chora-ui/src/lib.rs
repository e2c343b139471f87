//! # Chora UI
//!
//! The iced front end of the editor.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture:
//! - **Model**: [`App`] holds the tabs, the file tree, the terminal session
//!   and the settings
//! - **Message**: everything that can happen, including output from running
//!   commands and file system changes
//! - **Update**: `App::update` is the only place state changes
//! - **View**: `App::view` draws the current state
//!
//! Long-running work (child processes, folder watching, timers) lives in
//! subscriptions that exist only while the state asks for them.

pub mod app;
pub mod highlighter;
pub mod layout;
pub mod status;
pub mod theme;

pub use app::{App, Flags, run};
