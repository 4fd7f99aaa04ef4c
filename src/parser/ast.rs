use std::ffi::{OsStr, OsString};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Command {
    /// Raw command line, used for messages
    pub input: OsString,
    /// Program name followed by its arguments, byte for byte as typed; empty
    /// for a blank line
    pub argv: Vec<OsString>,
    /// Run the command in the background, defaults to false
    pub background: bool,
}

impl Command {
    /// `true` when there is nothing to run, e.g. a blank line or a lone `&`.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn program(&self) -> Option<&OsStr> {
        self.argv.first().map(OsString::as_os_str)
    }

    pub fn args(&self) -> &[OsString] {
        if self.argv.is_empty() {
            &[]
        } else {
            &self.argv[1..]
        }
    }
}
