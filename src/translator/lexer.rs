//! This lexer normalizes IPPcode23 source lines into words.
use regex::Regex;

/// Interior whitespace that separates words.
const SEPARATOR: &str = r"[ \t]+";

/// Characters stripped from both ends of a line.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

pub struct Lexer {
    separator: Regex,
}

impl Lexer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Lexer { separator: Regex::new(SEPARATOR)? })
    }

    /// Splits one source line into words.
    ///
    /// Everything from the first `#` on is a comment, even inside a
    /// `string@` literal. A blank or comment-only line yields a single
    /// empty word, so the result is never empty.
    pub fn tokenize_line(&self, line: &str) -> Vec<String> {
        let code = strip_comment(line).trim_matches(TRIMMED);
        self.separator
            .replace_all(code, " ")
            .split(' ')
            .map(str::to_owned)
            .collect()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}
