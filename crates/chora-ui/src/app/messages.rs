use chora_core::{Document, DocumentId, ProcessEvent, RunId};
use iced::widget::{scrollable, text_editor};
use iced::{Size, keyboard, window};
use std::path::PathBuf;
use std::time::Instant;

use crate::app::types::{SettingToggle, TopMenu};

#[derive(Debug, Clone)]
pub enum Message {
    // File menu
    NewFile,
    OpenFile,
    OpenFolder,
    Exit,

    // Edit menu
    Save,
    SaveAs,

    // Tabs and editor
    TabSelected(usize),
    CloseTab(usize),
    CloseCurrentTab,
    NextTab,
    PrevTab,
    EditorAction(text_editor::Action),
    EditorScrolled(scrollable::Viewport),

    // File tree
    FileClicked(PathBuf),
    ToggleFolder(PathBuf),

    // Menu bar
    ToggleTopMenu(TopMenu),
    CloseTopMenu,
    ShowAbout,
    HideAbout,

    // Settings dialog
    OpenSettings,
    SettingToggled(SettingToggle, bool),
    FontSizeStep(i32),
    AutoSaveIntervalChanged(String),
    SettingsApply,
    SettingsOk,
    SettingsCancel,

    // Terminal
    ToggleTerminal,
    TerminalInputChanged(String),
    TerminalSubmit,
    TerminalClear,
    TerminalInterrupt,
    TerminalOutput(RunId, ProcessEvent),
    TerminalSpawnFailed(RunId, String),

    // Window and timers
    KeyPressed(keyboard::Key, keyboard::Modifiers),
    WindowResized(Size),
    CloseRequested(window::Id),
    StatusTick(Instant),
    AutoSaveTick(Instant),
    WorkspaceChanged(Vec<PathBuf>),

    // Async results
    FileOpened(Result<(Document, String), String>),
    FolderOpened(Result<PathBuf, String>),
    /// The tab, the edit revision whose text was written, and the outcome
    FileSaved(DocumentId, u64, Result<Document, String>),
    AutoSaved(Vec<(DocumentId, u64, Result<Document, String>)>),
}
