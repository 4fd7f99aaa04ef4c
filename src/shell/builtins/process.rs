use nix::unistd;

use crate::shell::builtins::{self, prelude::*};

pub struct ProcessId;

impl builtins::BuiltinCommand for ProcessId {
    const NAME: &'static str = builtins::PID_NAME;

    fn run(_shell: &mut Shell, _args: &[OsString], stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "pid: {}", unistd::getpid())?;
        Ok(())
    }
}

pub struct ParentProcessId;

impl builtins::BuiltinCommand for ParentProcessId {
    const NAME: &'static str = builtins::PPID_NAME;

    fn run(_shell: &mut Shell, _args: &[OsString], stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "ppid: {}", unistd::getppid())?;
        Ok(())
    }
}
