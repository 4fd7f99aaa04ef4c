//! sh308 - a small interactive shell
//!
//! Lines are tokenized with quote-aware argument merging, then either run as a
//! builtin or launched as an external program. A trailing `&` runs the program
//! in the background under a guardian process that reports its outcome.

#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces
)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

#[macro_use]
mod util;
pub mod errors;
pub mod line_reader;
pub mod parser;
pub mod shell;

pub use crate::line_reader::LineReader;
pub use crate::parser::Command;
pub use crate::shell::{Shell, ShellConfig, DEFAULT_PROMPT};
pub use crate::util::{FAILURE_EXIT_STATUS, SUCCESS_EXIT_STATUS};
