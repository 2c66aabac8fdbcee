use std::io::{self, BufRead};

use tracing::warn;

use crate::lexer::MAX_LINE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Line(String),
    /// End of input; the loop stops.
    Terminate,
}

pub trait LineSource {
    fn next_line(&mut self) -> io::Result<InputLine>;
}

/// Reads one line at a time from any buffered reader, usually stdin.
pub struct InputHandler<R> {
    reader: R,
}

impl<R: BufRead> InputHandler<R> {
    pub fn new(reader: R) -> Self {
        InputHandler { reader }
    }
}

impl<R: BufRead> LineSource for InputHandler<R> {
    fn next_line(&mut self) -> io::Result<InputLine> {
        let mut buf = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            return Ok(InputLine::Terminate);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(InputLine::Line(bound_line(&line).to_string()))
    }
}

/// Cuts a line down to what fits the input buffer, on a char boundary.
pub fn bound_line(line: &str) -> &str {
    let limit = MAX_LINE_LENGTH - 1;
    if line.len() <= limit {
        return line;
    }
    let mut end = limit;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    warn!(length = line.len(), kept = end, "input line truncated");
    &line[..end]
}
