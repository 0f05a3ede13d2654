use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::prelude::*;

/// Whitespace separated tokens over a line based input, plus the output the
/// prompts go to. `None` from any read means the input is exhausted.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Tokens left over from the current line
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Writes without a newline and flushes so the prompt is visible.
    pub fn prompt(&mut self, message: &str) -> io::Result<()> {
        write!(self.output, "{message}")?;
        self.output.flush()
    }

    fn read_raw_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            match self.read_raw_line()? {
                Some(line) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_owned)),
                None => return Ok(None),
            }
        }
        Ok(self.pending.pop_front())
    }

    /// Drops whatever remains of the line the last token came from.
    pub fn discard_line(&mut self) {
        self.pending.clear();
    }

    /// Keeps asking until a token parses; bad tokens throw away the rest of their line.
    fn read_parsed<T: FromStr>(&mut self, retry: &str) -> io::Result<Option<T>> {
        loop {
            let token = match self.next_token()? {
                Some(token) => token,
                None => return Ok(None),
            };
            match token.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!("discarding malformed token {token:?}");
                    self.discard_line();
                    self.prompt(retry)?;
                }
            }
        }
    }

    pub fn read_int(&mut self) -> io::Result<Option<i32>> {
        self.read_parsed("Invalid input. Please enter a number: ")
    }

    pub fn read_amount(&mut self) -> io::Result<Option<Decimal>> {
        self.read_parsed("Invalid input. Please enter a valid amount: ")
    }

    /// A whole line with the trailing line break removed.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self
            .read_raw_line()?
            .map(|line| line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}
