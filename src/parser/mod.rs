//! sh308 tokenizer
//!
//! A line is split on whitespace into raw tokens. A token that is exactly `&`
//! marks the line for background execution and is dropped. A token starting
//! with `'` or `"` opens a quoted argument that swallows following tokens,
//! joined by single spaces, up to the first token ending in the same quote
//! character; the first and last bytes of the joined text are then cut off.
//! An unterminated quote is not an error: the joined text is cut the same
//! way, so `"abc def` becomes `abc de`.
//!
//! Tokenizing works on bytes, so arguments that are not valid UTF-8 reach the
//! program unchanged.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

pub use self::ast::Command;

mod ast;

const DELIMITERS: &[u8] = b" \t\r\n\x07";
const BACKGROUND_MARKER: &[u8] = b"&";
const QUOTES: &[u8] = b"\"'";

impl Command {
    /// Tokenize `input` into a command and its background flag.
    pub fn parse(input: &[u8]) -> Command {
        let mut tokens = input
            .split(|b| DELIMITERS.contains(b))
            .filter(|t| !t.is_empty());
        let mut argv = Vec::new();
        let mut background = false;

        while let Some(token) = tokens.next() {
            if token == BACKGROUND_MARKER {
                background = true;
                continue;
            }

            let arg = match opening_quote(token) {
                Some(quote) => quoted_argument(token, quote, &mut tokens),
                None => token.to_vec(),
            };
            argv.push(OsString::from_vec(arg));
        }

        debug!("parsed {:?} (background: {})", argv, background);
        Command {
            input: OsString::from_vec(input.to_vec()),
            argv,
            background,
        }
    }
}

fn opening_quote(token: &[u8]) -> Option<u8> {
    token.first().cloned().filter(|b| QUOTES.contains(b))
}

fn quoted_argument<'a, I>(opening: &[u8], quote: u8, tokens: &mut I) -> Vec<u8>
where
    I: Iterator<Item = &'a [u8]>,
{
    let mut joined = opening.to_vec();
    let closed_by_itself = opening.len() >= 2 && opening.last() == Some(&quote);

    if !closed_by_itself {
        for token in tokens {
            joined.push(b' ');
            joined.extend_from_slice(token);
            if token.last() == Some(&quote) {
                break;
            }
        }
    }

    strip_first_and_last(&joined)
}

fn strip_first_and_last(s: &[u8]) -> Vec<u8> {
    if s.len() < 2 {
        Vec::new()
    } else {
        s[1..s.len() - 1].to_vec()
    }
}
