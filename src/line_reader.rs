//! Reads one line of raw input at a time.
//!
//! There is no maximum line length: the buffer keeps growing for as long as
//! input arrives without a newline. Growth is fallible so that running out of
//! memory surfaces as `ErrorKind::Allocation` instead of an abort. Lines are
//! raw bytes; nothing is decoded.

use std::io::{self, BufRead};

use crate::errors::{Error, ErrorKind, Result};

const BUFFER_SIZE: usize = 1024;

/// Line source for the shell loop.
#[derive(Debug)]
pub struct LineReader<R> {
    source: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: Vec::with_capacity(BUFFER_SIZE),
        }
    }

    /// Reads the next line, excluding its newline.
    ///
    /// Returns `None` at end of input when nothing was read. A final line
    /// without a trailing newline is returned as is.
    pub fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        self.buffer.clear();
        let mut saw_input = false;

        loop {
            let (done, used) = {
                let available = match self.source.fill_buf() {
                    Ok(available) => available,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                };

                if available.is_empty() {
                    (true, 0)
                } else {
                    saw_input = true;
                    match available.iter().position(|&b| b == b'\n') {
                        Some(newline) => {
                            grow(&mut self.buffer, newline)?;
                            self.buffer.extend_from_slice(&available[..newline]);
                            (true, newline + 1)
                        }
                        None => {
                            grow(&mut self.buffer, available.len())?;
                            self.buffer.extend_from_slice(available);
                            (false, available.len())
                        }
                    }
                }
            };

            self.source.consume(used);
            if done {
                break;
            }
        }

        if !saw_input {
            return Ok(None);
        }

        trace!("read {} bytes of input", self.buffer.len());
        Ok(Some(self.buffer.clone()))
    }
}

fn grow(buffer: &mut Vec<u8>, additional: usize) -> Result<()> {
    buffer
        .try_reserve(additional)
        .map_err(|_| Error::from(ErrorKind::Allocation))
}
