use chora_core::Document;
use chora_core::config::{MAX_FONT_SIZE, MIN_FONT_SIZE, Settings};
use iced::widget::text_editor;
use std::path::PathBuf;

/// An open editor tab.
pub struct TabInfo {
    pub document: Document,
    pub content: text_editor::Content,
    pub modified: bool,
    /// Bumped on every edit; a save only marks the tab clean if it wrote
    /// the text of the current revision.
    pub revision: u64,
    ending: TextEnding,
}

impl TabInfo {
    pub fn untitled() -> Self {
        Self {
            document: Document::untitled(),
            content: text_editor::Content::new(),
            modified: false,
            revision: 0,
            ending: TextEnding::default(),
        }
    }

    pub fn from_document(document: Document, text: &str) -> Self {
        let content = text_editor::Content::with_text(text);
        let ending = TextEnding::new(text, &content.text());
        Self {
            document,
            content,
            modified: false,
            revision: 0,
            ending,
        }
    }

    pub fn label(&self) -> String {
        if self.modified {
            format!("{} *", self.document.title())
        } else {
            self.document.title().to_string()
        }
    }

    pub fn mark_edited(&mut self) {
        self.modified = true;
        self.revision += 1;
    }

    /// The text to write to disk, ending the way the file did when it was
    /// loaded.
    pub fn text_for_save(&self) -> String {
        self.ending.restore(self.content.text())
    }

    /// Takes the document returned by a finished save of `revision`.
    pub fn mark_saved(&mut self, document: Document, revision: u64) {
        self.document = document;
        if self.revision == revision {
            self.modified = false;
        }
    }
}

/// Trailing line breaks of a loaded file and of the editor's copy of it.
///
/// The editor always ends its text with exactly one newline, so a file
/// without one (or with several) would change on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextEnding {
    file: String,
    editor: String,
}

impl TextEnding {
    fn new(file_text: &str, editor_text: &str) -> Self {
        Self {
            file: trailing_breaks(file_text).to_string(),
            editor: trailing_breaks(editor_text).to_string(),
        }
    }

    fn restore(&self, mut text: String) -> String {
        if self.file != self.editor && text.ends_with(&self.editor) {
            text.truncate(text.len() - self.editor.len());
            text.push_str(&self.file);
        }
        text
    }
}

fn trailing_breaks(text: &str) -> &str {
    let body = text.trim_end_matches(['\r', '\n']);
    &text[body.len()..]
}

/// Startup options from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    pub file: Option<PathBuf>,
    pub folder: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMenu {
    File,
    Edit,
    Terminal,
    Settings,
    Info,
}

impl TopMenu {
    pub const ALL: [TopMenu; 5] = [
        TopMenu::File,
        TopMenu::Edit,
        TopMenu::Terminal,
        TopMenu::Settings,
        TopMenu::Info,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TopMenu::File => "File",
            TopMenu::Edit => "Edit",
            TopMenu::Terminal => "Terminal",
            TopMenu::Settings => "Settings",
            TopMenu::Info => "Info",
        }
    }
}

/// Check boxes of the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    FileTree,
    LineNumbers,
    StatusBar,
    WordWrap,
    AutoSave,
}

/// Values being edited in the settings dialog; nothing takes effect until
/// Apply or OK.
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    pub settings: Settings,
    pub interval_input: String,
}

impl SettingsDraft {
    pub fn new(current: &Settings) -> Self {
        Self {
            settings: current.clone(),
            interval_input: current.auto_save.interval_secs.to_string(),
        }
    }

    pub fn toggle(&self, toggle: SettingToggle) -> bool {
        let s = &self.settings;
        match toggle {
            SettingToggle::FileTree => s.interface.show_file_tree,
            SettingToggle::LineNumbers => s.interface.show_line_numbers,
            SettingToggle::StatusBar => s.interface.show_status_bar,
            SettingToggle::WordWrap => s.editor.word_wrap,
            SettingToggle::AutoSave => s.auto_save.enabled,
        }
    }

    pub fn set_toggle(&mut self, toggle: SettingToggle, value: bool) {
        let s = &mut self.settings;
        let slot = match toggle {
            SettingToggle::FileTree => &mut s.interface.show_file_tree,
            SettingToggle::LineNumbers => &mut s.interface.show_line_numbers,
            SettingToggle::StatusBar => &mut s.interface.show_status_bar,
            SettingToggle::WordWrap => &mut s.editor.word_wrap,
            SettingToggle::AutoSave => &mut s.auto_save.enabled,
        };
        *slot = value;
    }

    /// Moves the font size by `delta`, staying within 8..=24.
    pub fn step_font_size(&mut self, delta: i32) {
        let size = (self.settings.editor.font_size as i32 + delta)
            .clamp(MIN_FONT_SIZE as i32, MAX_FONT_SIZE as i32);
        self.settings.editor.font_size = size as u16;
    }

    /// Accepts digits only.
    pub fn set_interval_input(&mut self, input: String) {
        if input.chars().all(|c| c.is_ascii_digit()) {
            self.interval_input = input;
        }
    }

    /// The settings to apply, with the interval parsed and every value
    /// clamped.
    pub fn resolve(&self) -> Settings {
        let mut settings = self.settings.clone();
        if let Ok(secs) = self.interval_input.parse::<u64>() {
            settings.auto_save.interval_secs = secs;
        }
        settings.normalized()
    }
}
