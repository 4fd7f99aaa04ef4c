use std::ffi::{OsStr, OsString};
use std::fmt;
use std::os::unix::ffi::OsStrExt;

use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;

/// Final status of a terminated process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Normal exit with this code
    Exited(i32),
    /// Killed by this signal number
    Signaled(i32),
}

impl Outcome {
    /// Decodes a status returned by `waitpid`. Returns `None` for statuses that
    /// do not mean the process is gone, e.g. stopped or continued.
    pub fn from_wait_status(status: WaitStatus) -> Option<Outcome> {
        match status {
            WaitStatus::Exited(_, code) => Some(Outcome::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(Outcome::Signaled(signal as i32)),
            _ => None,
        }
    }

    /// The number reported after `Exit`: the exit code or the signal number.
    pub fn code(self) -> i32 {
        match self {
            Outcome::Exited(code) | Outcome::Signaled(code) => code,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Foreground,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    Spawning,
    Running,
    ForegroundWaiting,
    BackgroundDetached,
    Supervised,
    Terminated(Outcome),
}

impl JobState {
    fn can_advance_to(self, next: JobState, mode: Mode) -> bool {
        match (self, next) {
            (JobState::Spawning, JobState::Running) => true,
            (JobState::Running, JobState::ForegroundWaiting) => mode == Mode::Foreground,
            (JobState::Running, JobState::BackgroundDetached) => mode == Mode::Background,
            (JobState::BackgroundDetached, JobState::Supervised) => true,
            (JobState::ForegroundWaiting, JobState::Terminated(_))
            | (JobState::Supervised, JobState::Terminated(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            JobState::Spawning => write!(f, "Spawning"),
            JobState::Running => write!(f, "Running"),
            JobState::ForegroundWaiting => write!(f, "Waiting"),
            JobState::BackgroundDetached => write!(f, "Detached"),
            JobState::Supervised => write!(f, "Supervised"),
            JobState::Terminated(outcome) => write!(f, "Terminated ({})", outcome),
        }
    }
}

/// An external program launched by the shell.
///
/// Only lives as long as somebody is supervising it: the shell for a
/// foreground job, the guardian for a background one.
#[derive(Clone, Debug)]
pub struct Job {
    /// `id` is None until the process has been created
    id: Option<Pid>,
    command: OsString,
    mode: Mode,
    state: JobState,
}

impl Job {
    pub fn new<S: AsRef<OsStr>>(command: S, mode: Mode) -> Self {
        Self {
            id: None,
            command: command.as_ref().to_os_string(),
            mode,
            state: JobState::Spawning,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn mark_running(self, id: Pid) -> Self {
        Self {
            id: Some(id),
            ..self.advance(JobState::Running)
        }
    }

    /// Moves a running job to the state where its owner blocks on it.
    pub fn mark_waiting(self) -> Self {
        let next = match self.mode {
            Mode::Foreground => JobState::ForegroundWaiting,
            Mode::Background => JobState::BackgroundDetached,
        };
        self.advance(next)
    }

    pub fn mark_supervised(self) -> Self {
        self.advance(JobState::Supervised)
    }

    pub fn mark_terminated(self, outcome: Outcome) -> Self {
        self.advance(JobState::Terminated(outcome))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            JobState::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// `[<pid>] <command>`, printed once the process exists. The command
    /// name is written back exactly as it was typed.
    pub fn announcement(&self) -> Vec<u8> {
        let mut line = format!("[{}] ", self.pid_display()).into_bytes();
        line.extend_from_slice(self.command.as_bytes());
        line
    }

    /// `[<pid>] <command> Exit <code>`, printed once the process is reaped.
    pub fn report(&self) -> Option<Vec<u8>> {
        self.outcome().map(|outcome| {
            let mut line = self.announcement();
            line.extend_from_slice(format!(" Exit {}", outcome).as_bytes());
            line
        })
    }

    fn pid_display(&self) -> String {
        self.id.map(|pid| pid.to_string()).unwrap_or_default()
    }

    fn advance(self, next: JobState) -> Self {
        debug_assert!(
            self.state.can_advance_to(next, self.mode),
            "invalid job transition {} -> {}",
            self.state,
            next
        );
        debug!(
            "job [{}] {}: {} -> {}",
            self.pid_display(),
            self.command.to_string_lossy(),
            self.state,
            next
        );
        Self {
            state: next,
            ..self
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}\t{}",
            self.pid_display(),
            self.state,
            self.command.to_string_lossy()
        )
    }
}
