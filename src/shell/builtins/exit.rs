use crate::shell::builtins::{self, prelude::*};
use crate::util::SUCCESS_EXIT_STATUS;

pub struct Exit;

impl builtins::BuiltinCommand for Exit {
    const NAME: &'static str = builtins::EXIT_NAME;

    /// Arguments are ignored: `exit` always succeeds.
    fn run(shell: &mut Shell, _args: &[OsString], _stdout: &mut dyn Write) -> Result<()> {
        shell.exit(SUCCESS_EXIT_STATUS);
    }
}
