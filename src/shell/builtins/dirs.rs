use std::env;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::shell::builtins::{self, prelude::*};

const HOME_NAME: &str = "HOME";

pub struct Cd;

impl builtins::BuiltinCommand for Cd {
    const NAME: &'static str = builtins::CD_NAME;

    /// Changes to the first argument, or to the home directory when there is
    /// none. Extra arguments are ignored.
    fn run(_shell: &mut Shell, args: &[OsString], _stdout: &mut dyn Write) -> Result<()> {
        let dir = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| Error::from(ErrorKind::ChangeDirectory(HOME_NAME.to_string())))?,
        };

        env::set_current_dir(&dir)
            .chain_err(|| ErrorKind::ChangeDirectory(dir.display().to_string()))?;
        debug!("changed directory to {}", dir.display());
        Ok(())
    }
}

pub struct Pwd;

impl builtins::BuiltinCommand for Pwd {
    const NAME: &'static str = builtins::PWD_NAME;

    fn run(_shell: &mut Shell, _args: &[OsString], stdout: &mut dyn Write) -> Result<()> {
        let cwd = env::current_dir()?;
        stdout.write_all(&with_trailing_slash(cwd.as_os_str().as_bytes()))?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

fn with_trailing_slash(path: &[u8]) -> Vec<u8> {
    let mut path = path.to_vec();
    if path.last() != Some(&b'/') {
        path.push(b'/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtins::BuiltinCommand;
    use crate::shell::ShellConfig;

    #[test]
    fn test_trailing_slash() {
        assert_eq!(with_trailing_slash(b"/home/bob"), b"/home/bob/");
        assert_eq!(with_trailing_slash(b"/"), b"/");
        assert_eq!(with_trailing_slash(b"/tmp/caf\xe9"), b"/tmp/caf\xe9/");
    }

    #[test]
    fn test_pwd_is_idempotent() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        let mut first = Vec::new();
        let mut second = Vec::new();
        Pwd::run(&mut shell, &[], &mut first).unwrap();
        Pwd::run(&mut shell, &[], &mut second).unwrap();
        assert_eq!(first, second);

        let cwd = env::current_dir().unwrap();
        let mut expected = with_trailing_slash(cwd.as_os_str().as_bytes());
        expected.push(b'\n');
        assert_eq!(first, expected);
    }

    #[test]
    fn test_cd_to_missing_directory() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        let before = env::current_dir().unwrap();
        let args = vec![OsString::from("/nonexistent/sh308/dir")];
        let e = Cd::run(&mut shell, &args, &mut Vec::new()).unwrap_err();

        assert_eq!(
            e.to_string(),
            "cd: /nonexistent/sh308/dir no such file or directory"
        );
        assert!(!e.kind().is_fatal());
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
