//! Parser for the generator's `searchData` shard format.
//!
//! A shard is a JavaScript array literal assigned to `searchData`:
//!
//! ```text
//! var searchData=
//! [
//!   ['render_12',['Render',['../classCanvas.html#a1f',1,'Canvas::Render()']]],
//!   ...
//! ];
//! ```
//!
//! The parser is strict about structure and lenient about whitespace. It
//! never interprets the strings it reads; entity decoding happens later,
//! on demand.

use thiserror::Error;

use crate::index::{Anchor, SearchEntry};

/// Errors produced while parsing a shard.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("shard is missing the `var searchData=` prelude")]
    MissingPrelude,

    #[error("unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("expected {expected} at line {line}, column {column}")]
    Expected {
        expected: &'static str,
        line: usize,
        column: usize,
    },

    #[error("invalid link flag `{value}` at line {line}, column {column}")]
    InvalidFlag {
        value: String,
        line: usize,
        column: usize,
    },

    #[error("unexpected trailing input at line {line}, column {column}")]
    TrailingInput { line: usize, column: usize },
}

/// Parse one shard into its entries, in file order.
pub fn parse(source: &str) -> Result<Vec<SearchEntry>, ScriptError> {
    Parser::new(source).parse_table()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expected(&self, expected: &'static str) -> ScriptError {
        ScriptError::Expected {
            expected,
            line: self.line,
            column: self.column,
        }
    }

    fn expect_char(&mut self, wanted: char, what: &'static str) -> Result<(), ScriptError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            _ => Err(self.expected(what)),
        }
    }

    /// Consume `word` if it is next in the input; false otherwise.
    fn eat_keyword(&mut self, word: &str) -> bool {
        let mut probe = self.pos;
        for expected in word.chars() {
            match self.chars.get(probe) {
                Some(&c) if c == expected => probe += 1,
                _ => return false,
            }
        }
        for _ in word.chars() {
            self.bump();
        }
        true
    }

    fn parse_table(&mut self) -> Result<Vec<SearchEntry>, ScriptError> {
        self.skip_whitespace();
        if !self.eat_keyword("var") {
            return Err(ScriptError::MissingPrelude);
        }
        self.skip_whitespace();
        if !self.eat_keyword("searchData") {
            return Err(ScriptError::MissingPrelude);
        }
        self.skip_whitespace();
        if !self.eat_keyword("=") {
            return Err(ScriptError::MissingPrelude);
        }
        self.skip_whitespace();
        self.expect_char('[', "`[` opening the table")?;

        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            // An empty bucket is a valid shard.
            self.bump();
        } else {
            loop {
                entries.push(self.parse_entry()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => {
                        self.bump();
                        self.skip_whitespace();
                    }
                    Some(']') => {
                        self.bump();
                        break;
                    }
                    _ => return Err(self.expected("`,` or `]` after an entry")),
                }
            }
        }

        self.skip_whitespace();
        if self.peek() == Some(';') {
            self.bump();
        }
        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(ScriptError::TrailingInput {
                line: self.line,
                column: self.column,
            });
        }

        Ok(entries)
    }

    fn parse_entry(&mut self) -> Result<SearchEntry, ScriptError> {
        self.expect_char('[', "`[` opening an entry")?;
        self.skip_whitespace();
        let key = self.parse_string()?;
        self.skip_whitespace();
        self.expect_char(',', "`,` after the entry key")?;
        self.skip_whitespace();
        self.expect_char('[', "`[` opening the label group")?;
        self.skip_whitespace();
        let label = self.parse_string()?;

        let mut targets = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                    targets.push(self.parse_target()?);
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.expected("`,` or `]` inside the label group")),
            }
        }

        self.skip_whitespace();
        self.expect_char(']', "`]` closing the entry")?;

        Ok(SearchEntry::new(key, label, targets))
    }

    fn parse_target(&mut self) -> Result<Anchor, ScriptError> {
        self.expect_char('[', "`[` opening a target")?;
        self.skip_whitespace();
        let href = self.parse_string()?;
        self.skip_whitespace();
        self.expect_char(',', "`,` after the target link")?;
        self.skip_whitespace();
        let flags = self.parse_flag()?;
        self.skip_whitespace();
        self.expect_char(',', "`,` after the link flag")?;
        self.skip_whitespace();
        let owner = self.parse_string()?;
        self.skip_whitespace();
        self.expect_char(']', "`]` closing a target")?;

        Ok(Anchor { href, flags, owner })
    }

    fn parse_string(&mut self) -> Result<String, ScriptError> {
        let (start_line, start_column) = (self.line, self.column);
        self.expect_char('\'', "a single-quoted string")?;

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => {
                        return Err(ScriptError::UnterminatedString {
                            line: start_line,
                            column: start_column,
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(ScriptError::UnterminatedString {
                        line: start_line,
                        column: start_column,
                    })
                }
            }
        }
    }

    fn parse_flag(&mut self) -> Result<u8, ScriptError> {
        let (line, column) = (self.line, self.column);

        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.bump();
        }

        if digits.is_empty() {
            return Err(self.expected("an integer link flag"));
        }

        match digits.parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ScriptError::InvalidFlag {
                value: digits,
                line,
                column,
            }),
        }
    }
}
