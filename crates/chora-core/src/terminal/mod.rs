//! The embedded terminal.
//!
//! [`TerminalSession`] is the state behind the terminal panel: working
//! directory, prompt, history and output. It never touches a process
//! itself. Submitting a shell command yields a [`CommandRequest`]; whoever
//! owns the session spawns it (see [`process`]) and feeds the resulting
//! [`ProcessEvent`]s back through [`TerminalSession::on_process_event`].
//!
//! ```
//! use chora_core::terminal::{Submission, TerminalSession};
//!
//! let home = std::env::temp_dir();
//! let mut session = TerminalSession::new(home.clone(), home, "ana");
//! assert!(matches!(session.submit("   "), Submission::Ignored));
//! assert!(matches!(session.submit("echo hi"), Submission::Spawn(_)));
//! assert!(session.is_busy());
//! ```

pub mod command;
pub mod history;
pub mod output;
pub mod process;
pub mod prompt;

use std::path::{Path, PathBuf};

use self::command::Command;
use self::history::History;
use self::output::{LineKind, OutputLine, Scrollback};
use self::process::{ExitOutcome, ProcessEvent, ShellInvocation};

pub const DEFAULT_SCROLLBACK: usize = 5000;
pub const BUSY_MESSAGE: &str = "terminal: a command is already running";

/// Identifies one spawned command so late events from an interrupted run
/// can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

/// A shell command the session wants started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub run: RunId,
    pub command: String,
    pub invocation: ShellInvocation,
    pub cwd: PathBuf,
}

/// Result of submitting a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing happened
    Ignored,
    /// Handled without a process (`clear`, `cd`, or rejected while busy)
    Handled,
    /// Start this process
    Spawn(CommandRequest),
}

pub struct TerminalSession {
    cwd: PathBuf,
    home: PathBuf,
    user: String,
    history: History,
    output: Scrollback,
    running: Option<RunId>,
    next_run: u64,
}

impl TerminalSession {
    pub fn new(cwd: impl Into<PathBuf>, home: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            home: home.into(),
            user: user.into(),
            history: History::new(),
            output: Scrollback::new(DEFAULT_SCROLLBACK),
            running: None,
            next_run: 0,
        }
    }

    /// A session in the home directory of the current user.
    pub fn for_current_user() -> Self {
        let home = crate::home_dir();
        Self::new(home.clone(), home, prompt::user_from_env())
    }

    pub fn set_scrollback(&mut self, lines: usize) {
        self.output.set_capacity(lines);
    }

    pub fn prompt(&self) -> String {
        prompt::render(&self.user, &self.cwd, &self.home)
    }

    pub fn working_directory(&self) -> &Path {
        &self.cwd
    }

    pub fn set_working_directory(&mut self, dir: impl Into<PathBuf>) {
        self.cwd = dir.into();
        tracing::debug!("Terminal directory set to {}", self.cwd.display());
    }

    pub fn output(&self) -> impl Iterator<Item = &OutputLine> {
        self.output.iter()
    }

    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn running(&self) -> Option<RunId> {
        self.running
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Handles one line of input from the command entry.
    pub fn submit(&mut self, line: &str) -> Submission {
        let line = line.trim();
        if line.is_empty() {
            return Submission::Ignored;
        }

        self.history.push(line);
        let echo = format!("{}{}", self.prompt(), line);
        self.output.push(echo, LineKind::Echo);

        match Command::parse(line) {
            Command::Clear => {
                self.clear();
                Submission::Handled
            }
            Command::ChangeDir(target) => {
                self.change_directory(target);
                Submission::Handled
            }
            Command::External(_) if self.is_busy() => {
                self.output.push(BUSY_MESSAGE, LineKind::Warning);
                Submission::Handled
            }
            Command::External(command) => {
                let run = RunId(self.next_run);
                self.next_run += 1;
                self.running = Some(run);
                tracing::debug!("Dispatching {:?} in {}", command, self.cwd.display());

                Submission::Spawn(CommandRequest {
                    run,
                    command: command.to_string(),
                    invocation: ShellInvocation::for_command(command),
                    cwd: self.cwd.clone(),
                })
            }
        }
    }

    /// Changes directory. Returns false, and prints an error, when the
    /// target is not an existing directory.
    pub fn change_directory(&mut self, target: &str) -> bool {
        let resolved = command::resolve_target(target, &self.cwd, &self.home);
        if resolved.is_dir() {
            self.cwd = resolved;
            true
        } else {
            self.output
                .push(format!("cd: no such directory: {}", target), LineKind::Error);
            false
        }
    }

    pub fn history_previous(&mut self) -> Option<String> {
        self.history.previous().map(str::to_string)
    }

    pub fn history_next(&mut self) -> Option<String> {
        self.history.next().map(str::to_string)
    }

    /// Applies an event from the process started for `run`. Events from
    /// any other run are ignored; returns whether the event was applied.
    pub fn on_process_event(&mut self, run: RunId, event: ProcessEvent) -> bool {
        if self.running != Some(run) {
            return false;
        }

        match event {
            ProcessEvent::Stdout(line) => self.output.push(line, LineKind::Stdout),
            ProcessEvent::Stderr(line) => self.output.push(line, LineKind::Error),
            ProcessEvent::Exited(outcome) => {
                match outcome {
                    ExitOutcome::Success => {}
                    ExitOutcome::Code(code) => self.output.push(
                        format!("Process exited with code {}", code),
                        LineKind::Warning,
                    ),
                    ExitOutcome::Crashed => self.output.push("Process crashed!", LineKind::Error),
                }
                self.running = None;
            }
        }
        true
    }

    /// Records that the process for `run` could not be started.
    pub fn on_spawn_failed(&mut self, run: RunId, error: &str) {
        if self.running == Some(run) {
            self.output.push(error, LineKind::Error);
            self.running = None;
        }
    }

    /// Forgets the running process. Returns false if nothing was running.
    pub fn interrupt(&mut self) -> bool {
        match self.running.take() {
            Some(_) => {
                self.output.push("^C", LineKind::Error);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session_in(dir: &Path) -> TerminalSession {
        TerminalSession::new(dir, dir, "ana")
    }

    fn lines(session: &TerminalSession) -> Vec<(String, LineKind)> {
        session
            .output()
            .map(|l| (l.text.clone(), l.kind))
            .collect()
    }

    fn spawn_request(session: &mut TerminalSession, line: &str) -> CommandRequest {
        match session.submit(line) {
            Submission::Spawn(request) => request,
            other => panic!("expected a spawn, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        assert_eq!(session.submit("  \t "), Submission::Ignored);
        assert!(session.history().is_empty());
        assert_eq!(session.output_len(), 0);
    }

    #[test]
    fn test_prompt_starts_at_home() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        assert_eq!(session.prompt(), "ana@~ $ ");
    }

    #[test]
    fn test_external_command() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        let request = spawn_request(&mut session, "  ls -la ");
        assert_eq!(request.command, "ls -la");
        assert_eq!(request.cwd, dir.path());
        assert_eq!(request.invocation, ShellInvocation::for_command("ls -la"));
        assert_eq!(session.running(), Some(request.run));
        assert_eq!(session.history().entries(), ["ls -la".to_string()]);
        assert_eq!(
            lines(&session),
            vec![("ana@~ $ ls -la".to_string(), LineKind::Echo)]
        );
    }

    #[test]
    fn test_clear_empties_output() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.submit("cd nowhere");
        assert_eq!(session.submit("clear"), Submission::Handled);
        assert_eq!(session.output_len(), 0);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_cd() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let mut session = session_in(dir.path());

        assert_eq!(session.submit("cd sub"), Submission::Handled);
        assert_eq!(session.working_directory(), sub);
        assert!(session.prompt().ends_with("sub $ "));

        session.submit("cd ..");
        assert_eq!(session.working_directory(), dir.path());

        session.submit("cd sub");
        session.submit("cd");
        assert_eq!(session.working_directory(), dir.path());

        session.submit("cd ~/sub");
        assert_eq!(session.working_directory(), sub);
    }

    #[test]
    fn test_cd_to_missing_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "").unwrap();
        let mut session = session_in(dir.path());

        session.submit("cd missing");
        assert_eq!(session.working_directory(), dir.path());
        assert_eq!(
            session.output().last().map(|l| (l.text.as_str(), l.kind)),
            Some(("cd: no such directory: missing", LineKind::Error))
        );

        assert!(!session.change_directory("file.txt"));
        assert_eq!(session.working_directory(), dir.path());
    }

    #[test]
    fn test_process_events() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let request = spawn_request(&mut session, "make");

        assert!(session.on_process_event(request.run, ProcessEvent::Stdout("building".into())));
        assert!(session.on_process_event(request.run, ProcessEvent::Stderr("warning".into())));
        assert!(session.on_process_event(request.run, ProcessEvent::Exited(ExitOutcome::Code(2))));
        assert!(!session.is_busy());

        assert_eq!(
            lines(&session)[1..],
            [
                ("building".to_string(), LineKind::Stdout),
                ("warning".to_string(), LineKind::Error),
                ("Process exited with code 2".to_string(), LineKind::Warning),
            ]
        );
    }

    #[test]
    fn test_exit_outcomes() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        let request = spawn_request(&mut session, "true");
        session.on_process_event(request.run, ProcessEvent::Exited(ExitOutcome::Success));
        assert_eq!(session.output_len(), 1);

        let request = spawn_request(&mut session, "crash");
        session.on_process_event(request.run, ProcessEvent::Exited(ExitOutcome::Crashed));
        assert_eq!(
            session.output().last().map(|l| (l.text.as_str(), l.kind)),
            Some(("Process crashed!", LineKind::Error))
        );
    }

    #[test]
    fn test_busy_guard() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let first = spawn_request(&mut session, "sleep 10");

        assert_eq!(session.submit("ls"), Submission::Handled);
        assert_eq!(session.running(), Some(first.run));
        assert_eq!(
            session.output().last().map(|l| l.text.as_str()),
            Some(BUSY_MESSAGE)
        );
    }

    #[test]
    fn test_interrupt_drops_late_events() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let first = spawn_request(&mut session, "sleep 10");

        assert!(session.interrupt());
        assert!(!session.interrupt());
        assert_eq!(
            session.output().last().map(|l| (l.text.as_str(), l.kind)),
            Some(("^C", LineKind::Error))
        );

        let second = spawn_request(&mut session, "echo hi");
        assert_ne!(first.run, second.run);
        assert!(!session.on_process_event(first.run, ProcessEvent::Stdout("late".into())));
        assert!(session.output().all(|l| l.text != "late"));
    }

    #[test]
    fn test_spawn_failure() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let request = spawn_request(&mut session, "x");

        session.on_spawn_failed(request.run, "Failed to start sh: boom");
        assert!(!session.is_busy());
        assert_eq!(
            session.output().last().map(|l| l.kind),
            Some(LineKind::Error)
        );
    }

    #[test]
    fn test_history_navigation() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.submit("cd a");
        session.submit("clear");

        assert_eq!(session.history_previous().as_deref(), Some("clear"));
        assert_eq!(session.history_previous().as_deref(), Some("cd a"));
        assert_eq!(session.history_previous(), None);
        assert_eq!(session.history_next().as_deref(), Some("clear"));
        assert_eq!(session.history_next(), None);
    }

    #[test]
    fn test_scrollback_limit() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.set_scrollback(2);
        let request = spawn_request(&mut session, "seq 5");
        for i in 1..=5 {
            session.on_process_event(request.run, ProcessEvent::Stdout(i.to_string()));
        }
        let texts: Vec<_> = session.output().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["4", "5"]);
    }
}
