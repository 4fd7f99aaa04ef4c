pub use self::shell::Shell;

mod builtins;
pub mod job;
pub mod job_control;
#[allow(clippy::module_inception)]
pub mod shell;

/// Prompt shown when none is given on the command line.
pub const DEFAULT_PROMPT: &str = "308sh> ";

/// Policy object to control a Shell's behavior
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Written before every line is read; `None` for no prompt.
    prompt: Option<String>,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell, e.g. reading lines from a terminal
    ///
    /// # Complete List
    /// - `prompt` is displayed before every line is read
    /// - Some additional messages are displayed
    pub fn interactive<S: Into<String>>(prompt: S) -> ShellConfig {
        ShellConfig {
            prompt: Some(prompt.into()),
            display_messages: true,
        }
    }

    /// Creates a noninteractive shell, e.g. running a `-c` command string
    ///
    /// # Complete List
    /// - No prompt is displayed
    /// - Fewer messages are displayed
    pub fn noninteractive() -> ShellConfig {
        Default::default()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_ref().map(String::as_str)
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig {
            prompt: None,
            display_messages: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_config() {
        let config = ShellConfig::interactive(DEFAULT_PROMPT);
        assert_eq!(config.prompt(), Some("308sh> "));
        assert!(config.display_messages);
    }

    #[test]
    fn test_noninteractive_config() {
        let config = ShellConfig::noninteractive();
        assert_eq!(config.prompt(), None);
        assert!(!config.display_messages);
    }
}
