//! sh308 builtins
//!
//! This module includes the implementations of the commands the shell runs
//! itself instead of launching a program. Names match exactly: there is no
//! prefix matching or aliasing.

use std::ffi::OsStr;

use self::prelude::*;

use self::dirs::{Cd, Pwd};
use self::exit::Exit;
use self::jobs::Jobs;
use self::process::{ParentProcessId, ProcessId};

pub mod prelude {
    pub use std::ffi::OsString;
    pub use std::io::Write;

    pub use crate::errors::{Error, ErrorKind, Result, ResultExt};
    pub use crate::shell::shell::Shell;
}

mod dirs;
mod exit;
mod jobs;
mod process;

const CD_NAME: &str = "cd";
const EXIT_NAME: &str = "exit";
const JOBS_NAME: &str = "jobs";
const PID_NAME: &str = "pid";
const PPID_NAME: &str = "ppid";
const PWD_NAME: &str = "pwd";

/// Represents a sh308 builtin command such as cd or pwd.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// Runs the command with the given arguments in the `shell` environment.
    fn run(shell: &mut Shell, args: &[OsString], stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<OsStr>>(program: T) -> bool {
    let names = [CD_NAME, EXIT_NAME, JOBS_NAME, PID_NAME, PPID_NAME, PWD_NAME];
    program
        .as_ref()
        .to_str()
        .map_or(false, |name| names.contains(&name))
}

/// precondition: `program` is a builtin.
pub fn run<S: AsRef<OsStr>>(
    shell: &mut Shell,
    program: S,
    args: &[OsString],
    stdout: &mut dyn Write,
) -> Result<()> {
    debug_assert!(is_builtin(&program));

    match program.as_ref().to_str() {
        Some(CD_NAME) => run_builtin::<Cd>(shell, args, stdout),
        Some(EXIT_NAME) => run_builtin::<Exit>(shell, args, stdout),
        Some(JOBS_NAME) => run_builtin::<Jobs>(shell, args, stdout),
        Some(PID_NAME) => run_builtin::<ProcessId>(shell, args, stdout),
        Some(PPID_NAME) => run_builtin::<ParentProcessId>(shell, args, stdout),
        Some(PWD_NAME) => run_builtin::<Pwd>(shell, args, stdout),
        _ => unreachable!(),
    }
}

fn run_builtin<B: BuiltinCommand>(
    shell: &mut Shell,
    args: &[OsString],
    stdout: &mut dyn Write,
) -> Result<()> {
    debug!("running builtin {} {:?}", B::NAME, args);
    B::run(shell, args, stdout)
}
