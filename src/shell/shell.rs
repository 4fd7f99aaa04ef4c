//! sh308 - Shell Module
//!
//! The Shell reads lines, tokenizes them, and dispatches each command to a
//! builtin or to the job controller. It also reaps the guardians of finished
//! background jobs.

use std::io::{self, BufRead};
use std::process;

use nix::unistd::Pid;

use crate::errors::{ErrorKind, Result};
use crate::line_reader::LineReader;
use crate::parser::Command;
use crate::shell::{builtins, job_control, ShellConfig};
use crate::util;

/// sh308 Shell
#[derive(Debug)]
pub struct Shell {
    config: ShellConfig,
    /// Guardians of background jobs that have not been reaped yet.
    guardians: Vec<Pid>,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Shell {
        debug!("{:?}", config);
        Shell {
            config,
            guardians: Vec::new(),
        }
    }

    /// Runs the read-tokenize-dispatch loop on stdin until end of input or `exit`.
    pub fn execute_from_stdin(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let reader = LineReader::new(stdin.lock());
        self.execute_from(reader)
    }

    /// Runs the loop on any line source.
    ///
    /// Only fatal errors are returned; recoverable ones are reported on stderr
    /// and the loop moves on to the next line.
    pub fn execute_from<R: BufRead>(&mut self, mut reader: LineReader<R>) -> Result<()> {
        info!("sh308 started up");
        loop {
            job_control::reap_guardians(&mut self.guardians);
            self.prompt();

            let line = match reader.read_line()? {
                Some(line) => line,
                None => break,
            };
            self.execute_command_string(&line)?;
        }

        if self.config.display_messages {
            println!("exit");
        }
        Ok(())
    }

    /// Runs a single line of input.
    pub fn execute_command_string(&mut self, input: &[u8]) -> Result<()> {
        let command = Command::parse(input);
        match self.execute_command(&command) {
            Err(ref e) if !e.kind().is_fatal() => {
                warn!("{:?} failed: {}", command.input, e);
                match *e.kind() {
                    ErrorKind::ChangeDirectory(_) => eprintln!("{}", e),
                    _ => eprintln!("sh308: {}", e),
                }
                Ok(())
            }
            result => result,
        }
    }

    /// Dispatches `command` to a builtin or launches it as a job.
    pub fn execute_command(&mut self, command: &Command) -> Result<()> {
        let program = match command.program() {
            Some(program) => program,
            None => return Ok(()),
        };

        if builtins::is_builtin(program) {
            return builtins::run(self, program, command.args(), &mut io::stdout());
        }

        if command.background {
            let supervision = job_control::run_background(command)?;
            self.guardians.push(supervision.guardian);
        } else {
            let outcome = job_control::run_foreground(command)?;
            debug!("{:?} finished with {:?}", program, outcome);
        }
        Ok(())
    }

    /// Exit the shell immediately with a status of `code`.
    pub fn exit(&mut self, code: i32) -> ! {
        util::flush_stdout();
        info!("sh308 has shut down");
        process::exit(code);
    }

    fn prompt(&self) {
        if let Some(prompt) = self.config.prompt() {
            print!("{}", prompt);
            util::flush_stdout();
        }
    }
}
