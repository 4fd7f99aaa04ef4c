use crate::shell::builtins::{self, prelude::*};

pub struct Jobs;

impl builtins::BuiltinCommand for Jobs {
    const NAME: &'static str = builtins::JOBS_NAME;

    fn run(_shell: &mut Shell, _args: &[OsString], stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "Not implemented, extra credit if you do")?;
        Ok(())
    }
}
