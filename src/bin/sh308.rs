#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;
use std::process;

use docopt::Docopt;
use nix::unistd::Pid;

use sh308::errors::Error;
use sh308::{Shell, ShellConfig, DEFAULT_PROMPT, FAILURE_EXIT_STATUS, SUCCESS_EXIT_STATUS};

const LOG_FILE_NAME: &str = ".sh308_log";

const USAGE: &str = "
sh308.

Usage:
    sh308 [options]
    sh308 [options] -c <command>
    sh308 (-h | --help)
    sh308 --version

Options:
    -h --help       Show this screen.
    --version       Show version.
    -p <prompt>     Prompt to display before each line, defaults to '308sh> '.
    -c              If the -c option is present, then the command is read from the first non-option
                        argument command_string.
    --log=<path>    File to write log to, defaults to ~/.sh308_log
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_p: Option<String>,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_logger(&args.flag_log);
    debug!("{:?}", args);

    if args.flag_version {
        println!("sh308 version {}", env!("CARGO_PKG_VERSION"));
    } else if args.flag_c {
        execute_from_command_string(&args);
    } else {
        execute_from_stdin(&args);
    }
}

fn init_logger(path: &Option<String>) {
    let log_path = match path.clone().map(PathBuf::from).or_else(default_log_path) {
        Some(log_path) => log_path,
        None => return,
    };

    let log_file = match fern::log_file(&log_path) {
        Ok(log_file) => log_file,
        Err(e) => {
            eprintln!(
                "sh308: unable to open log file {}: {}",
                log_path.display(),
                e
            );
            return;
        }
    };

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Pid::this(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(log_file)
        .apply();
    if let Err(e) = result {
        eprintln!("sh308: unable to install logger: {}", e);
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_FILE_NAME))
}

fn execute_from_command_string(args: &Args) -> ! {
    let mut shell = Shell::new(ShellConfig::noninteractive());
    let command = args.arg_command.clone().unwrap_or_default();
    let result = shell.execute_command_string(command.as_bytes());
    exit(result, &mut shell);
}

fn execute_from_stdin(args: &Args) -> ! {
    let prompt = args
        .flag_p
        .clone()
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let mut shell = Shell::new(ShellConfig::interactive(prompt));
    let result = shell.execute_from_stdin();
    exit(result, &mut shell);
}

fn display_error_and_exit(error: &Error) -> ! {
    error!("fatal: {}", error);
    eprintln!("sh308: {}", error);
    process::exit(FAILURE_EXIT_STATUS);
}

fn exit(result: sh308::errors::Result<()>, shell: &mut Shell) -> ! {
    match result {
        Ok(()) => shell.exit(SUCCESS_EXIT_STATUS),
        Err(e) => display_error_and_exit(&e),
    }
}
