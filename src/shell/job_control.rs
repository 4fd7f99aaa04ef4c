//! Launches external programs and supervises them until they terminate.
//!
//! A foreground job is a direct child of the shell, which blocks in `waitpid`
//! until it is gone. A background job is owned by a guardian: the shell forks
//! the guardian, the guardian forks the job, announces it, hands its pid back
//! to the shell over a pipe, then waits for it and reports the outcome. The
//! shell only blocks until the pid arrives, so the announcement always comes
//! before the next prompt.

use std::ffi::{CString, OsStr, OsString};
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::FromRawFd;
use std::process;

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::parser::Command;
use crate::shell::job::{Job, Mode, Outcome};
use crate::util::{self, COMMAND_NOT_FOUND_EXIT_STATUS, FAILURE_EXIT_STATUS, SUCCESS_EXIT_STATUS};

const PID_LEN: usize = 4;

/// Pids of a background job and the guardian supervising it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Supervision {
    pub guardian: Pid,
    pub job: Pid,
}

/// Runs `command` in the foreground and returns once it has terminated.
///
/// precondition: `command` is not empty.
pub fn run_foreground(command: &Command) -> Result<Outcome> {
    let argv = to_cstrings(&command.argv)?;
    let job = Job::new(&command.argv[0], Mode::Foreground);

    let id = spawn(&argv)?;
    let job = job.mark_running(id);
    util::print_line(&job.announcement());

    let job = job.mark_waiting();
    let outcome = wait_for(id)?;
    let job = job.mark_terminated(outcome);
    if let Some(report) = job.report() {
        util::print_line(&report);
    }

    Ok(outcome)
}

/// Starts `command` under a guardian and returns without waiting for it.
///
/// precondition: `command` is not empty.
pub fn run_background(command: &Command) -> Result<Supervision> {
    let argv = to_cstrings(&command.argv)?;
    let (read_fd, write_fd) = unistd::pipe().chain_err(|| "failed to create pid pipe")?;
    let (mut pid_reader, pid_writer) =
        unsafe { (File::from_raw_fd(read_fd), File::from_raw_fd(write_fd)) };

    match fork()? {
        ForkResult::Parent { child: guardian } => {
            drop(pid_writer);
            let job = read_pid(&mut pid_reader)?;
            debug!("guardian {} supervising job {}", guardian, job);
            Ok(Supervision { guardian, job })
        }
        ForkResult::Child => {
            drop(pid_reader);
            guard(&command.argv[0], &argv, pid_writer)
        }
    }
}

/// Collects guardians that have exited, leaving the ones still running.
pub fn reap_guardians(guardians: &mut Vec<Pid>) {
    guardians.retain(|&guardian| {
        match wait::waitpid(guardian, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => true,
            Ok(status) => {
                debug!("reaped guardian {}: {:?}", guardian, status);
                false
            }
            Err(Errno::ECHILD) => false,
            Err(e) => {
                error!("failed to reap guardian {}: {}", guardian, e);
                true
            }
        }
    });
}

/// Body of the guardian process. Never returns to the shell loop.
fn guard(program: &OsStr, argv: &[CString], mut pid_writer: File) -> ! {
    let job = Job::new(program, Mode::Background);

    let id = match fork() {
        Ok(ForkResult::Parent { child }) => child,
        Ok(ForkResult::Child) => {
            drop(pid_writer);
            exec(argv)
        }
        Err(e) => {
            error!("guardian failed to spawn {:?}: {}", program, e);
            eprintln!("sh308: {}", e);
            process::exit(FAILURE_EXIT_STATUS);
        }
    };

    let job = job.mark_running(id);
    util::print_line(&job.announcement());
    util::flush_stdout();

    let temp_result = pid_writer.write_all(&id.as_raw().to_ne_bytes());
    log_if_err!(temp_result, "failed to hand pid {} to the shell", id);
    drop(pid_writer);

    let job = job.mark_waiting().mark_supervised();
    debug!("guardian {} supervising {}", Pid::this(), job);
    match wait_for(id) {
        Ok(outcome) => {
            let job = job.mark_terminated(outcome);
            if let Some(report) = job.report() {
                util::print_line(&report);
            }
            util::flush_stdout();
            process::exit(SUCCESS_EXIT_STATUS);
        }
        Err(e) => {
            error!("guardian lost job {}: {}", id, e);
            process::exit(FAILURE_EXIT_STATUS);
        }
    }
}

fn read_pid(pid_reader: &mut File) -> Result<Pid> {
    let mut buf = [0u8; PID_LEN];
    match pid_reader.read_exact(&mut buf) {
        Ok(()) => Ok(Pid::from_raw(i32::from_ne_bytes(buf))),
        Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(ErrorKind::Fork(
            "guardian could not create the job".to_string(),
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}

fn spawn(argv: &[CString]) -> Result<Pid> {
    match fork()? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => exec(argv),
    }
}

fn fork() -> Result<ForkResult> {
    util::flush_stdout();
    let result = unsafe { unistd::fork() };
    result.map_err(|e| Error::from(ErrorKind::Fork(e.desc().to_string())))
}

/// Replaces the current process image. On failure the child terminates itself
/// with SIGTERM, so the parent sees signal 15.
fn exec(argv: &[CString]) -> ! {
    let e = match unistd::execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };

    let mut message = b"Cannot exec ".to_vec();
    message.extend_from_slice(argv[0].as_bytes());
    message.extend_from_slice(format!(": {}\n", e.desc()).as_bytes());
    let temp_result = io::stderr().write_all(&message);
    log_if_err!(temp_result, "failed to report exec failure");

    let temp_result = signal::kill(Pid::this(), Signal::SIGTERM);
    log_if_err!(temp_result, "failed to terminate child after exec failure");
    process::exit(COMMAND_NOT_FOUND_EXIT_STATUS);
}

fn wait_for(id: Pid) -> Result<Outcome> {
    loop {
        let status = match wait::waitpid(id, None) {
            Err(Errno::EINTR) => continue,
            result => result.chain_err(|| format!("waitpid({}) failed", id))?,
        };

        match Outcome::from_wait_status(status) {
            Some(outcome) => return Ok(outcome),
            None => trace!("{} is still alive: {:?}", id, status),
        }
    }
}

fn to_cstrings(argv: &[OsString]) -> Result<Vec<CString>> {
    argv.iter()
        .map(|arg| {
            CString::new(arg.as_bytes()).map_err(|_| {
                Error::from(ErrorKind::InvalidArgument(
                    arg.to_string_lossy().into_owned(),
                ))
            })
        })
        .collect()
}
