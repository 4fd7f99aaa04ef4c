use std::io::{self, Write};

/// Logs `$result` at error level when it is an `Err`, without propagating it.
macro_rules! log_if_err {
    ($result:expr, $fmt:expr) => {
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), e);
        }
    };
    ($result:expr, $fmt:expr, $($arg:tt)+) => {
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), $($arg)+, e);
        }
    };
}

/// Status the shell exits with after a normal `exit` or end of input.
pub const SUCCESS_EXIT_STATUS: i32 = 0;

/// Status the shell exits with after a fatal error.
pub const FAILURE_EXIT_STATUS: i32 = 1;

/// Status a child exits with if exec failed and it survived its own SIGTERM.
pub const COMMAND_NOT_FOUND_EXIT_STATUS: i32 = 127;

/// Flushes stdout so buffered bytes are not duplicated into a forked child.
pub fn flush_stdout() {
    let temp_result = io::stdout().flush();
    log_if_err!(temp_result, "failed to flush stdout");
}

/// Writes `line` and a newline to stdout in a single write, without decoding.
pub fn print_line(line: &[u8]) {
    let mut buf = Vec::with_capacity(line.len() + 1);
    buf.extend_from_slice(line);
    buf.push(b'\n');

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let temp_result = handle.write_all(&buf);
    log_if_err!(temp_result, "failed to write to stdout");
}
