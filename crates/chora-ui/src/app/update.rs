use iced::widget::{scrollable, text_editor, text_input};
use iced::{Task, keyboard};
use std::time::Instant;

use chora_core::{Settings, Submission};

use super::file_ops::{self, is_cancelled};
use super::{App, Message, SettingsDraft, TabInfo, editor_scroll_id, terminal_input_id, terminal_output_id};
use crate::layout;
use crate::status::FILE_MESSAGE_TIMEOUT;
use crate::theme::EDITOR_LINE_HEIGHT;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewFile => {
                self.active_menu = None;
                self.tabs.push(TabInfo::untitled());
                return self.select_tab(self.tabs.len() - 1);
            }

            Message::OpenFile => {
                self.active_menu = None;
                return Task::perform(file_ops::pick_and_open(), Message::FileOpened);
            }

            Message::OpenFolder => {
                self.active_menu = None;
                let start = self
                    .file_tree
                    .as_ref()
                    .map(|tree| tree.root_path().to_path_buf())
                    .unwrap_or_else(chora_core::home_dir);
                return Task::perform(file_ops::pick_folder(start), Message::FolderOpened);
            }

            Message::Exit => {
                self.active_menu = None;
                return self.shutdown();
            }

            Message::Save => {
                self.active_menu = None;
                if let Some(tab) = self.current_tab() {
                    let (id, revision) = (tab.document.id(), tab.revision);
                    let document = tab.document.clone();
                    let text = tab.text_for_save();
                    return match document.path().map(|p| p.to_path_buf()) {
                        Some(path) => Task::perform(
                            file_ops::save_document(document, path, text),
                            move |result| Message::FileSaved(id, revision, result),
                        ),
                        None => Task::perform(
                            file_ops::pick_and_save(document, text),
                            move |result| Message::FileSaved(id, revision, result),
                        ),
                    };
                }
            }

            Message::SaveAs => {
                self.active_menu = None;
                if let Some(tab) = self.current_tab() {
                    let (id, revision) = (tab.document.id(), tab.revision);
                    return Task::perform(
                        file_ops::pick_and_save(tab.document.clone(), tab.text_for_save()),
                        move |result| Message::FileSaved(id, revision, result),
                    );
                }
            }

            Message::TabSelected(idx) => {
                if idx < self.tabs.len() {
                    return self.select_tab(idx);
                }
            }

            Message::CloseTab(idx) => {
                self.close_tab(idx);
            }

            Message::CloseCurrentTab => {
                self.active_menu = None;
                if let Some(idx) = self.active_tab {
                    self.close_tab(idx);
                }
            }

            Message::NextTab => {
                if let Some(idx) = self.active_tab {
                    return self.select_tab((idx + 1) % self.tabs.len());
                }
            }

            Message::PrevTab => {
                if let Some(idx) = self.active_tab {
                    let len = self.tabs.len();
                    return self.select_tab((idx + len - 1) % len);
                }
            }

            Message::EditorAction(action) => {
                self.active_menu = None;
                self.terminal_focused = false;

                // The editor is as tall as its text; wheel scrolling moves the
                // surrounding scrollable instead.
                if let text_editor::Action::Scroll { lines } = action {
                    let target = self.editor_offset + lines as f32 * self.editor_line_height();
                    return self.scroll_editor_to(target);
                }

                let follow_cursor = !matches!(
                    action,
                    text_editor::Action::Click(_) | text_editor::Action::Drag(_)
                );
                if let Some(tab) = self.current_tab_mut() {
                    let is_edit = action.is_edit();
                    tab.content.perform(action);
                    if is_edit {
                        tab.mark_edited();
                    }
                }
                if follow_cursor {
                    return self.reveal_cursor();
                }
            }

            Message::EditorScrolled(viewport) => {
                self.editor_offset = viewport.absolute_offset().y;
            }

            Message::FileClicked(path) => {
                self.active_menu = None;
                if let Some(idx) = self.find_tab(&path) {
                    return self.select_tab(idx);
                }
                return Task::perform(file_ops::open_document(path), Message::FileOpened);
            }

            Message::ToggleFolder(path) => {
                self.active_menu = None;
                if let Some(tree) = &mut self.file_tree {
                    if let Err(e) = tree.toggle(&path) {
                        tracing::warn!("Failed to expand {}: {}", path.display(), e);
                    }
                }
            }

            Message::ToggleTopMenu(menu) => {
                self.active_menu = if self.active_menu == Some(menu) {
                    None
                } else {
                    Some(menu)
                };
            }

            Message::CloseTopMenu => {
                self.active_menu = None;
            }

            Message::ShowAbout => {
                self.active_menu = None;
                self.about_visible = true;
            }

            Message::HideAbout => {
                self.about_visible = false;
            }

            Message::OpenSettings => {
                self.active_menu = None;
                self.settings_dialog = Some(SettingsDraft::new(&self.settings));
            }

            Message::SettingToggled(toggle, value) => {
                if let Some(draft) = &mut self.settings_dialog {
                    draft.set_toggle(toggle, value);
                }
            }

            Message::FontSizeStep(delta) => {
                if let Some(draft) = &mut self.settings_dialog {
                    draft.step_font_size(delta);
                }
            }

            Message::AutoSaveIntervalChanged(input) => {
                if let Some(draft) = &mut self.settings_dialog {
                    draft.set_interval_input(input);
                }
            }

            Message::SettingsApply => {
                if let Some(draft) = &self.settings_dialog {
                    let resolved = draft.resolve();
                    self.apply_settings(resolved);
                }
            }

            Message::SettingsOk => {
                if let Some(draft) = self.settings_dialog.take() {
                    self.apply_settings(draft.resolve());
                }
            }

            Message::SettingsCancel => {
                self.settings_dialog = None;
            }

            Message::ToggleTerminal => {
                self.active_menu = None;
                let visible = !self.settings.interface.show_terminal;
                self.settings.interface.show_terminal = visible;
                self.terminal_focused = visible;
                if visible {
                    return text_input::focus(terminal_input_id());
                }
            }

            Message::TerminalInputChanged(input) => {
                self.terminal_focused = true;
                self.terminal_input = input;
            }

            Message::TerminalSubmit => {
                self.terminal_focused = true;
                let line = std::mem::take(&mut self.terminal_input);
                match self.terminal.submit(&line) {
                    Submission::Ignored | Submission::Handled => {}
                    Submission::Spawn(request) => {
                        tracing::info!("Running `{}` in {}", request.command, request.cwd.display());
                        self.active_command = Some(request);
                    }
                }
                return snap_terminal_to_end();
            }

            Message::TerminalClear => {
                self.active_menu = None;
                self.terminal.clear();
            }

            Message::TerminalInterrupt => {
                self.active_menu = None;
                if self.terminal.interrupt() {
                    if let Some(request) = self.active_command.take() {
                        tracing::info!("Interrupted `{}`", request.command);
                    }
                    return snap_terminal_to_end();
                }
            }

            Message::TerminalOutput(run, event) => {
                if self.terminal.on_process_event(run, event) {
                    if !self.terminal.is_busy() {
                        self.active_command = None;
                    }
                    return snap_terminal_to_end();
                }
            }

            Message::TerminalSpawnFailed(run, error) => {
                self.terminal.on_spawn_failed(run, &error);
                if !self.terminal.is_busy() {
                    self.active_command = None;
                }
                return snap_terminal_to_end();
            }

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }

            Message::WindowResized(size) => {
                self.settings.window.width = size.width;
                self.settings.window.height = size.height;
            }

            Message::CloseRequested(_id) => {
                return self.shutdown();
            }

            Message::StatusTick(now) => {
                self.status.tick(now);
            }

            Message::AutoSaveTick(_) => {
                return self.auto_save();
            }

            Message::WorkspaceChanged(paths) => {
                tracing::debug!("{} path(s) changed on disk", paths.len());
                self.refresh_file_tree();
            }

            Message::FileOpened(result) => match result {
                Ok((document, text)) => {
                    self.add_document_tab(document, &text);
                    return self.scroll_editor_to(0.0);
                }
                Err(e) => {
                    if !is_cancelled(&e) {
                        self.status
                            .show_for("Failed to open file!", FILE_MESSAGE_TIMEOUT, Instant::now());
                    }
                }
            },

            Message::FolderOpened(result) => match result {
                Ok(path) => {
                    if self.open_tree(path.clone()) {
                        self.terminal.set_working_directory(&path);
                        self.status.show_for(
                            format!("Opened folder: {}", path.display()),
                            FILE_MESSAGE_TIMEOUT,
                            Instant::now(),
                        );
                        self.settings.session.last_folder = Some(path);
                        self.persist_settings();
                    } else {
                        self.status
                            .show_for("Failed to open folder!", FILE_MESSAGE_TIMEOUT, Instant::now());
                    }
                }
                Err(e) => {
                    if !is_cancelled(&e) {
                        self.status
                            .show_for("Failed to open folder!", FILE_MESSAGE_TIMEOUT, Instant::now());
                    }
                }
            },

            Message::FileSaved(id, revision, result) => match result {
                Ok(document) => {
                    let title = document.title().to_string();
                    if let Some(tab) = self.tabs.iter_mut().find(|t| t.document.id() == id) {
                        tab.mark_saved(document, revision);
                    }
                    self.status
                        .show_for(format!("Saved: {}", title), FILE_MESSAGE_TIMEOUT, Instant::now());
                }
                Err(e) => {
                    if !is_cancelled(&e) {
                        self.status
                            .show_for("Failed to save file!", FILE_MESSAGE_TIMEOUT, Instant::now());
                    }
                }
            },

            Message::AutoSaved(results) => {
                let mut saved = 0;
                for (id, revision, result) in results {
                    match result {
                        Ok(document) => {
                            if let Some(tab) = self.tabs.iter_mut().find(|t| t.document.id() == id) {
                                tab.mark_saved(document, revision);
                            }
                            saved += 1;
                        }
                        Err(e) => tracing::warn!("Auto-save failed: {}", e),
                    }
                }
                if saved > 0 {
                    self.status.show_for(
                        format!("Auto-saved {} file(s)", saved),
                        FILE_MESSAGE_TIMEOUT,
                        Instant::now(),
                    );
                }
            }
        }
        Task::none()
    }

    pub fn handle_key_pressed(&mut self, key: keyboard::Key, modifiers: keyboard::Modifiers) -> Task<Message> {
        use keyboard::key::Named;

        if modifiers.control() {
            if let keyboard::Key::Character(c) = &key {
                let c = c.to_lowercase();
                if modifiers.shift() {
                    if c == "s" {
                        return self.update(Message::SaveAs);
                    }
                } else if !modifiers.alt() {
                    match c.as_str() {
                        "n" => return self.update(Message::NewFile),
                        "o" => return self.update(Message::OpenFile),
                        "s" => return self.update(Message::Save),
                        "w" => return self.update(Message::CloseCurrentTab),
                        "`" => return self.update(Message::ToggleTerminal),
                        _ => {}
                    }
                }
            }

            if matches!(key, keyboard::Key::Named(Named::Tab)) {
                if modifiers.shift() {
                    return self.update(Message::PrevTab);
                } else {
                    return self.update(Message::NextTab);
                }
            }

            return Task::none();
        }

        match key {
            keyboard::Key::Named(Named::Escape) => {
                if self.settings_dialog.is_some() {
                    self.settings_dialog = None;
                } else if self.about_visible {
                    self.about_visible = false;
                } else {
                    self.active_menu = None;
                }
            }
            // The command entry ignores Up/Down, so they arrive here
            keyboard::Key::Named(Named::ArrowUp) if self.terminal_has_focus() => {
                if let Some(command) = self.terminal.history_previous() {
                    self.terminal_input = command;
                    return text_input::move_cursor_to_end(terminal_input_id());
                }
            }
            keyboard::Key::Named(Named::ArrowDown) if self.terminal_has_focus() => {
                self.terminal_input = self.terminal.history_next().unwrap_or_default();
                return text_input::move_cursor_to_end(terminal_input_id());
            }
            _ => {}
        }

        Task::none()
    }

    fn select_tab(&mut self, idx: usize) -> Task<Message> {
        if self.active_tab == Some(idx) {
            return Task::none();
        }
        self.active_tab = Some(idx);
        self.scroll_editor_to(0.0)
    }

    fn editor_line_height(&self) -> f32 {
        self.settings.editor.font_size as f32 * EDITOR_LINE_HEIGHT
    }

    /// Height of the editor's scrollable, derived from the window layout.
    fn editor_viewport_height(&self) -> f32 {
        let interface = &self.settings.interface;
        let mut height = self.settings.window.height - layout::TOOLBAR_HEIGHT - layout::TAB_BAR_HEIGHT;
        if interface.show_terminal {
            height -= self.terminal_height;
        }
        if interface.show_status_bar {
            height -= layout::STATUS_BAR_HEIGHT;
        }
        height.max(0.0)
    }

    fn scroll_editor_to(&mut self, y: f32) -> Task<Message> {
        let line_count = self.current_tab().map_or(1, |tab| tab.content.line_count());
        let height = self.editor_viewport_height();
        let y = layout::clamp_offset(y, line_count, self.editor_line_height(), height);
        self.editor_offset = y;
        scrollable::scroll_to(editor_scroll_id(), scrollable::AbsoluteOffset { x: 0.0, y })
    }

    /// Scrolls the editor just enough to show the line holding the cursor.
    fn reveal_cursor(&mut self) -> Task<Message> {
        let Some(tab) = self.current_tab() else {
            return Task::none();
        };
        let (line, _) = tab.content.cursor_position();
        let height = self.editor_viewport_height();

        match layout::reveal_offset(line, self.editor_line_height(), self.editor_offset, height) {
            Some(y) => self.scroll_editor_to(y),
            None => Task::none(),
        }
    }

    fn terminal_has_focus(&self) -> bool {
        self.terminal_focused && self.settings.interface.show_terminal
    }

    /// Makes `settings` current for every open editor and writes them to
    /// disk. Window geometry, terminal visibility and the last folder are
    /// not part of the dialog and keep their live values.
    pub fn apply_settings(&mut self, mut settings: Settings) {
        settings.window = self.settings.window.clone();
        settings.session = self.settings.session.clone();
        settings.interface.show_terminal = self.settings.interface.show_terminal;

        self.terminal.set_scrollback(settings.terminal.scrollback_lines);
        self.settings = settings;
        self.persist_settings();
        tracing::info!("Settings applied");
    }

    /// Writes every modified tab that has a file.
    fn auto_save(&mut self) -> Task<Message> {
        let pending: Vec<_> = self
            .tabs
            .iter()
            .filter(|tab| tab.modified)
            .filter_map(|tab| {
                let path = tab.document.path()?.to_path_buf();
                Some((tab.document.clone(), tab.revision, path, tab.text_for_save()))
            })
            .collect();

        if pending.is_empty() {
            return Task::none();
        }

        Task::perform(
            async move {
                let mut results = Vec::with_capacity(pending.len());
                for (document, revision, path, text) in pending {
                    let id = document.id();
                    results.push((id, revision, file_ops::save_document(document, path, text).await));
                }
                results
            },
            Message::AutoSaved,
        )
    }

    fn shutdown(&mut self) -> Task<Message> {
        self.settings = self.settings.clone().normalized();
        self.persist_settings();
        tracing::info!("Exiting");
        iced::exit()
    }
}

fn snap_terminal_to_end() -> Task<Message> {
    scrollable::snap_to(terminal_output_id(), scrollable::RelativeOffset::END)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SettingToggle;
    use chora_core::{Document, FileTree};
    use tempfile::tempdir;

    fn app() -> App {
        let home = std::env::temp_dir();
        App {
            settings: Settings::default(),
            settings_path: None,
            tabs: vec![TabInfo::untitled()],
            active_tab: Some(0),
            editor_offset: 0.0,
            file_tree: None,
            sidebar_width: 250.0,
            status: Default::default(),
            active_menu: None,
            settings_dialog: None,
            about_visible: false,
            terminal: chora_core::TerminalSession::new(home.clone(), home, "ana"),
            terminal_input: String::new(),
            terminal_height: 220.0,
            terminal_focused: false,
            active_command: None,
        }
    }

    #[test]
    fn test_new_file_becomes_current() {
        let mut app = app();
        let _ = app.update(Message::NewFile);
        assert_eq!(app.tabs.len(), 2);
        assert_eq!(app.active_tab, Some(1));
    }

    #[test]
    fn test_closing_last_tab_leaves_no_editor() {
        let mut app = app();
        let _ = app.update(Message::CloseCurrentTab);
        assert!(app.tabs.is_empty());
        assert_eq!(app.active_tab, None);
        assert!(app.current_tab().is_none());
    }

    #[test]
    fn test_close_tab_keeps_current_selection() {
        let mut app = app();
        let _ = app.update(Message::NewFile);
        let _ = app.update(Message::NewFile);
        let _ = app.update(Message::TabSelected(2));

        let _ = app.update(Message::CloseTab(0));
        assert_eq!(app.active_tab, Some(1));

        let _ = app.update(Message::CloseTab(1));
        assert_eq!(app.active_tab, Some(0));
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = app();
        let _ = app.update(Message::NewFile);
        let _ = app.update(Message::NextTab);
        assert_eq!(app.active_tab, Some(0));
        let _ = app.update(Message::PrevTab);
        assert_eq!(app.active_tab, Some(1));
    }

    #[test]
    fn test_opening_open_file_focuses_its_tab() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.cpp");
        std::fs::write(&path, "int main() {}").unwrap();

        let mut app = app();
        let (document, text) = Document::open(&path).unwrap();
        let _ = app.update(Message::FileOpened(Ok((document, text))));
        let _ = app.update(Message::NewFile);
        assert_eq!(app.tabs.len(), 3);

        let (again, text) = Document::open(&path).unwrap();
        let _ = app.update(Message::FileOpened(Ok((again, text))));
        assert_eq!(app.tabs.len(), 3);
        assert_eq!(app.active_tab, Some(1));
        assert_eq!(app.status.message(), "Opened: main.cpp");
    }

    #[test]
    fn test_failed_open_reports_in_status() {
        let mut app = app();
        let _ = app.update(Message::FileOpened(Err("Permission denied".to_string())));
        assert_eq!(app.status.message(), "Failed to open file!");
        assert!(app.status.is_timed());

        let mut app = self::app();
        let _ = app.update(Message::FileOpened(Err("Cancelled".to_string())));
        assert_eq!(app.status.message(), crate::status::READY);
    }

    #[test]
    fn test_saved_document_updates_tab() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.py");

        let mut app = app();
        let tab = &mut app.tabs[0];
        tab.modified = true;
        let id = tab.document.id();
        let mut document = tab.document.clone();
        document.save_to(&path, "").unwrap();

        let _ = app.update(Message::FileSaved(id, 0, Ok(document)));
        assert!(!app.tabs[0].modified);
        assert_eq!(app.tabs[0].document.title(), "notes.py");
        assert_eq!(app.title(), "notes.py - Chora Spatium");
        assert_eq!(app.status.message(), "Saved: notes.py");
    }

    #[test]
    fn test_settings_dialog_cancel_discards() {
        let mut app = app();
        let _ = app.update(Message::OpenSettings);
        let _ = app.update(Message::FontSizeStep(4));
        let _ = app.update(Message::SettingsCancel);

        assert!(app.settings_dialog.is_none());
        assert_eq!(app.settings.editor.font_size, 14);
    }

    #[test]
    fn test_terminal_submit_starts_and_finishes_command() {
        let mut app = app();
        let _ = app.update(Message::TerminalInputChanged("echo hi".to_string()));
        let _ = app.update(Message::TerminalSubmit);

        assert!(app.terminal_input.is_empty());
        let run = app.active_command.as_ref().map(|r| r.run).unwrap();

        let _ = app.update(Message::TerminalOutput(
            run,
            chora_core::ProcessEvent::Exited(chora_core::ExitOutcome::Code(2)),
        ));
        assert!(app.active_command.is_none());
        assert!(!app.terminal.is_busy());
    }

    #[test]
    fn test_interrupt_drops_active_command() {
        let mut app = app();
        let _ = app.update(Message::TerminalInputChanged("sleep 10".to_string()));
        let _ = app.update(Message::TerminalSubmit);
        assert!(app.active_command.is_some());

        let _ = app.update(Message::TerminalInterrupt);
        assert!(app.active_command.is_none());
        assert_eq!(app.terminal.output().last().map(|l| l.text.as_str()), Some("^C"));
    }

    #[test]
    fn test_history_keys_fill_input() {
        let mut app = app();
        let _ = app.update(Message::TerminalInputChanged("clear".to_string()));
        let _ = app.update(Message::TerminalSubmit);

        let up = keyboard::Key::Named(keyboard::key::Named::ArrowUp);
        let down = keyboard::Key::Named(keyboard::key::Named::ArrowDown);

        let _ = app.update(Message::KeyPressed(up, keyboard::Modifiers::empty()));
        assert_eq!(app.terminal_input, "clear");

        let _ = app.update(Message::KeyPressed(down, keyboard::Modifiers::empty()));
        assert!(app.terminal_input.is_empty());
    }

    #[test]
    fn test_workspace_change_refreshes_tree() {
        let dir = tempdir().unwrap();
        let mut app = app();
        app.file_tree = Some(FileTree::open(dir.path()).unwrap());
        assert!(app.file_tree.as_ref().unwrap().root().children.is_empty());

        std::fs::write(dir.path().join("new.rs"), "").unwrap();
        let _ = app.update(Message::WorkspaceChanged(vec![dir.path().join("new.rs")]));

        let tree = app.file_tree.as_ref().unwrap();
        assert_eq!(tree.root().children.len(), 1);
    }
    fn app_saving_to(dir: &std::path::Path) -> App {
        let mut app = app();
        app.settings_path = Some(dir.join("settings.toml"));
        app
    }

    fn insert(app: &mut App, c: char) {
        let _ = app.update(Message::EditorAction(text_editor::Action::Edit(
            text_editor::Edit::Insert(c),
        )));
    }

    #[test]
    fn test_edit_during_save_keeps_tab_modified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "one").unwrap();

        let mut app = app();
        let (document, text) = Document::open(&path).unwrap();
        let _ = app.update(Message::FileOpened(Ok((document, text))));
        let idx = app.active_tab.unwrap();

        insert(&mut app, 'x');
        let tab = &app.tabs[idx];
        let (id, revision) = (tab.document.id(), tab.revision);
        let mut saved = tab.document.clone();
        saved.save_to(&path, &tab.text_for_save()).unwrap();

        insert(&mut app, 'y');
        let _ = app.update(Message::FileSaved(id, revision, Ok(saved)));

        let tab = &app.tabs[idx];
        assert!(tab.modified);
        assert_eq!(tab.label(), "notes.txt *");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xone");
    }

    #[test]
    fn test_auto_saved_reports_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let mut app = app();
        let (document, text) = Document::open(&path).unwrap();
        let _ = app.update(Message::FileOpened(Ok((document, text))));
        let idx = app.active_tab.unwrap();
        insert(&mut app, '/');

        let tab = &app.tabs[idx];
        let results = vec![(tab.document.id(), tab.revision, Ok(tab.document.clone()))];
        let _ = app.update(Message::AutoSaved(results));

        assert!(!app.tabs[idx].modified);
        assert_eq!(app.status.message(), "Auto-saved 1 file(s)");
    }

    #[test]
    fn test_settings_ok_applies_and_persists() {
        let dir = tempdir().unwrap();
        let mut app = app_saving_to(dir.path());
        app.settings.window.width = 900.0;

        let _ = app.update(Message::OpenSettings);
        let _ = app.update(Message::FontSizeStep(2));
        let _ = app.update(Message::SettingToggled(SettingToggle::WordWrap, true));
        let _ = app.update(Message::SettingsOk);

        assert!(app.settings_dialog.is_none());
        assert_eq!(app.settings.editor.font_size, 16);
        assert!(app.settings.editor.word_wrap);

        let saved = Settings::load_from(dir.path().join("settings.toml")).unwrap();
        assert_eq!(saved.editor.font_size, 16);
        assert!(saved.editor.word_wrap);
        assert_eq!(saved.window.width, 900.0);
    }

    #[test]
    fn test_settings_apply_keeps_dialog_open() {
        let dir = tempdir().unwrap();
        let mut app = app_saving_to(dir.path());

        let _ = app.update(Message::OpenSettings);
        let _ = app.update(Message::SettingToggled(SettingToggle::StatusBar, false));
        let _ = app.update(Message::SettingsApply);

        assert!(app.settings_dialog.is_some());
        assert!(!app.settings.interface.show_status_bar);
        let saved = Settings::load_from(dir.path().join("settings.toml")).unwrap();
        assert!(!saved.interface.show_status_bar);
    }

    #[test]
    fn test_folder_opened_moves_terminal_and_persists() {
        let config = tempdir().unwrap();
        let project = tempdir().unwrap();
        let mut app = app_saving_to(config.path());

        let _ = app.update(Message::FolderOpened(Ok(project.path().to_path_buf())));

        assert_eq!(app.terminal.working_directory(), project.path());
        assert_eq!(app.settings.session.last_folder.as_deref(), Some(project.path()));
        assert_eq!(
            app.file_tree.as_ref().map(|tree| tree.root_path().to_path_buf()),
            Some(project.path().to_path_buf())
        );
        assert_eq!(
            app.status.message(),
            format!("Opened folder: {}", project.path().display())
        );

        let saved = Settings::load_from(config.path().join("settings.toml")).unwrap();
        assert_eq!(saved.session.last_folder.as_deref(), Some(project.path()));
    }
}
