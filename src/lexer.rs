use crate::ast::Command;

/// Size of the input buffer a raw line must fit in, terminator included.
pub const MAX_LINE_LENGTH: usize = 1024;

pub const BACKGROUND_MARKER: char = '&';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub command: Command,
    pub background: bool,
}

/// Splits a raw line on single spaces.
///
/// A `&` as the very last character is stripped and marks the line for
/// background execution. Runs of spaces produce no empty tokens. There is no
/// quoting: `echo "a b"` yields the two tokens `"a` and `b"`.
pub fn tokenize(line: &str) -> TokenizedLine {
    let (body, background) = match line.strip_suffix(BACKGROUND_MARKER) {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    TokenizedLine {
        command: Command::new(body.split(' ')),
        background,
    }
}
