//! Child processes for terminal commands.
//!
//! A command line is handed to the platform shell as a single argument.
//! Both pipes are drained by their own task so a child that fills stderr
//! while we wait on stdout cannot stall. Lines arrive through one channel
//! in the order they were read; the exit status is reported last.
//!
//! The exit is reported when the shell exits, not when its pipes close, so
//! a background job that inherited the pipes does not keep a command running.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::{CoreError, CoreResult};

/// Program and arguments that run one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellInvocation {
    #[cfg(windows)]
    pub fn for_command(command: &str) -> Self {
        Self {
            program: "cmd.exe".to_string(),
            args: vec!["/c".to_string(), command.to_string()],
        }
    }

    #[cfg(not(windows))]
    pub fn for_command(command: &str) -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), command.to_string()],
        }
    }
}

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    Code(i32),
    /// Killed by a signal or otherwise ended without an exit code
    Crashed,
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(0) => ExitOutcome::Success,
            Some(code) => ExitOutcome::Code(code),
            None => ExitOutcome::Crashed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    Exited(ExitOutcome),
}

/// How long to keep collecting buffered output after the child has exited.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// A spawned command. Dropping it kills the child.
pub struct RunningProcess {
    child: Child,
    lines: mpsc::Receiver<ProcessEvent>,
    outcome: Option<ExitOutcome>,
    exited: bool,
}

/// Starts `invocation` in `cwd` with stdin closed and both outputs piped.
///
/// Must be called from within a tokio runtime.
pub fn spawn(invocation: &ShellInvocation, cwd: &Path) -> CoreResult<RunningProcess> {
    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CoreError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

    let (tx, lines) = mpsc::channel(256);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, tx.clone(), ProcessEvent::Stdout));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, tx, ProcessEvent::Stderr));
    }

    tracing::debug!(
        "Spawned {} {:?} in {} (pid {:?})",
        invocation.program,
        invocation.args,
        cwd.display(),
        child.id()
    );

    Ok(RunningProcess {
        child,
        lines,
        outcome: None,
        exited: false,
    })
}

async fn forward_lines<R>(
    pipe: R,
    tx: mpsc::Sender<ProcessEvent>,
    wrap: fn(String) -> ProcessEvent,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\r', '\n']).to_string();
                if tx.send(wrap(line)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Stopped reading child output: {}", e);
                break;
            }
        }
    }
}

impl RunningProcess {
    /// Next output line, then the exit outcome, then `None`.
    pub async fn next_event(&mut self) -> Option<ProcessEvent> {
        if self.exited {
            return None;
        }

        let outcome = match self.outcome {
            Some(outcome) => outcome,
            None => {
                let status = tokio::select! {
                    biased;
                    event = self.lines.recv() => match event {
                        Some(event) => return Some(event),
                        // Both pipes are closed; only the status is left.
                        None => None,
                    },
                    status = self.child.wait() => Some(status),
                };
                match status {
                    Some(status) => Self::outcome_of(status),
                    None => Self::outcome_of(self.child.wait().await),
                }
            }
        };
        self.outcome = Some(outcome);

        // Output written just before exiting may still be in flight.
        if let Ok(Some(event)) = tokio::time::timeout(DRAIN_GRACE, self.lines.recv()).await {
            return Some(event);
        }

        self.exited = true;
        Some(ProcessEvent::Exited(outcome))
    }

    fn outcome_of(status: std::io::Result<ExitStatus>) -> ExitOutcome {
        match status {
            Ok(status) => ExitOutcome::from(status),
            Err(e) => {
                tracing::warn!("Failed to wait for child: {}", e);
                ExitOutcome::Crashed
            }
        }
    }

    /// Asks the child to terminate. The exit is still reported by
    /// [`next_event`](Self::next_event).
    pub fn kill(&mut self) -> CoreResult<()> {
        match self.child.start_kill() {
            Ok(()) => Ok(()),
            // Already reaped
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
