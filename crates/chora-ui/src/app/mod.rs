use iced::futures::SinkExt;
use iced::widget::{scrollable, text_input};
use iced::{Size, Subscription, Task, keyboard, window};
use std::path::PathBuf;
use std::time::Duration;

use chora_core::{CommandRequest, FileTree, Settings, TerminalSession, WorkspaceWatcher, terminal::process};

use crate::status::StatusLine;

pub mod file_ops;
pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

pub const APP_NAME: &str = "Chora Spatium";
pub const APP_VERSION: &str = "1.5.0";
pub const APP_DESCRIPTION: &str =
    "A lightweight code editor with a file browser, syntax highlighting and a built-in terminal.";

const STATUS_TICK: Duration = Duration::from_millis(250);

pub fn terminal_input_id() -> text_input::Id {
    text_input::Id::new("terminal-input")
}

pub fn terminal_output_id() -> scrollable::Id {
    scrollable::Id::new("terminal-output")
}

pub fn editor_scroll_id() -> scrollable::Id {
    scrollable::Id::new("editor")
}

pub struct App {
    pub settings: Settings,
    /// Where settings are written; `None` keeps them in memory only
    pub settings_path: Option<PathBuf>,
    pub tabs: Vec<TabInfo>,
    pub active_tab: Option<usize>,
    /// Vertical scroll offset of the editor
    pub editor_offset: f32,
    pub file_tree: Option<FileTree>,
    pub sidebar_width: f32,
    pub status: StatusLine,
    pub active_menu: Option<TopMenu>,
    pub settings_dialog: Option<SettingsDraft>,
    pub about_visible: bool,
    pub terminal: TerminalSession,
    pub terminal_input: String,
    pub terminal_height: f32,
    pub terminal_focused: bool,
    /// The command whose process the terminal subscription is running
    pub active_command: Option<CommandRequest>,
}

impl App {
    pub fn new(flags: Flags, settings: Settings, settings_path: Option<PathBuf>) -> (Self, Task<Message>) {
        let mut terminal = TerminalSession::for_current_user();
        terminal.set_scrollback(settings.terminal.scrollback_lines);

        let mut app = Self {
            settings,
            settings_path,
            tabs: vec![TabInfo::untitled()],
            active_tab: Some(0),
            editor_offset: 0.0,
            file_tree: None,
            sidebar_width: 250.0,
            status: StatusLine::default(),
            active_menu: None,
            settings_dialog: None,
            about_visible: false,
            terminal,
            terminal_input: String::new(),
            terminal_height: 220.0,
            terminal_focused: false,
            active_command: None,
        };

        let root = flags
            .folder
            .or_else(|| app.settings.session.last_folder.clone().filter(|p| p.is_dir()))
            .unwrap_or_else(chora_core::home_dir);
        app.open_tree(root);

        let task = match flags.file {
            Some(path) => Task::perform(file_ops::open_document(path), Message::FileOpened),
            None => Task::none(),
        };

        (app, task)
    }

    pub fn title(&self) -> String {
        match self.current_tab() {
            Some(tab) => format!(
                "{}{} - {}",
                tab.document.title(),
                if tab.modified { " *" } else { "" },
                APP_NAME
            ),
            None => APP_NAME.to_string(),
        }
    }

    pub fn current_tab(&self) -> Option<&TabInfo> {
        self.active_tab.and_then(|idx| self.tabs.get(idx))
    }

    pub fn current_tab_mut(&mut self) -> Option<&mut TabInfo> {
        self.active_tab.and_then(|idx| self.tabs.get_mut(idx))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers))),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
            window::close_requests().map(Message::CloseRequested),
        ];

        if self.status.is_timed() {
            subscriptions.push(iced::time::every(STATUS_TICK).map(Message::StatusTick));
        }

        let auto_save = &self.settings.auto_save;
        if auto_save.enabled {
            subscriptions.push(
                iced::time::every(Duration::from_secs(auto_save.interval_secs))
                    .map(Message::AutoSaveTick),
            );
        }

        // Dropping this subscription drops the child process, which kills it
        if let Some(request) = &self.active_command {
            subscriptions.push(Subscription::run_with_id(
                ("terminal", request.run),
                run_command(request.clone()),
            ));
        }

        // Expanding or collapsing a folder changes the id, which swaps the watcher
        if let Some(tree) = &self.file_tree {
            let dirs = tree.open_dirs();
            subscriptions.push(Subscription::run_with_id(
                ("watch", dirs.clone()),
                watch_workspace(dirs),
            ));
        }

        Subscription::batch(subscriptions)
    }
}

fn run_command(request: CommandRequest) -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(100, move |mut output| async move {
        let run = request.run;
        let mut child = match process::spawn(&request.invocation, &request.cwd) {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to run `{}`: {}", request.command, e);
                let _ = output.send(Message::TerminalSpawnFailed(run, e.to_string())).await;
                return;
            }
        };

        while let Some(event) = child.next_event().await {
            if output.send(Message::TerminalOutput(run, event)).await.is_err() {
                break;
            }
        }
    })
}

fn watch_workspace(dirs: Vec<PathBuf>) -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(16, move |mut output| async move {
        let mut watcher = match WorkspaceWatcher::new(&dirs) {
            Ok(watcher) => watcher,
            Err(e) => {
                tracing::warn!("Not watching the open folder: {}", e);
                return;
            }
        };
        tracing::debug!("Watching {} folder(s)", dirs.len());

        while let Some(batch) = watcher.next_batch().await {
            if output.send(Message::WorkspaceChanged(batch)).await.is_err() {
                break;
            }
        }
    })
}

pub fn run(flags: Flags) -> iced::Result {
    let settings = Settings::load();
    let settings_path = match Settings::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("Settings will not be saved: {}", e);
            None
        }
    };
    let window_size = Size::new(settings.window.width, settings.window.height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(window_size)
        .theme(|_| iced::Theme::Dark)
        .antialiasing(true)
        .exit_on_close_request(false)
        .run_with(move || App::new(flags, settings, settings_path))
}
