// This file is part of interp, a line-numbered BASIC interpreter.
//
// interp is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// interp is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with interp.  If not, see <http://www.gnu.org/licenses/>.

//! A byte-offset cursor into a single line's text, plus the small
//! scanning helpers the expression evaluator and statement executor
//! share: whitespace skipping, keyword recognition, identifier and
//! number-literal reading.

use crate::error::{InterpError, Result};

/// A mutable read position into a borrowed line of source text.
///
/// Lines are never pre-split into statements; `:` is just another
/// character the cursor walks past. Holding only a byte offset (not a
/// sub-slice) lets control-flow statements save and later restore a
/// position within the same line.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, c: char, what: &str) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(InterpError::syntax(format!("expected {}", what)))
        }
    }

    pub fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
    }

    /// Jumps to end-of-line, discarding the remainder — used when a
    /// `REM`/`'` comment or a false `IF` condition discards the rest
    /// of the statement line, `:` separators included.
    pub fn goto_end(&mut self) {
        self.pos = self.text.len();
    }

    /// True if a character following a matched keyword cannot extend
    /// an identifier — i.e. the match isn't actually the prefix of a
    /// longer name like `FORMAT` swallowing `FOR`.
    fn terminates_keyword(c: Option<char>) -> bool {
        match c {
            None => true,
            Some(c) => !(c.is_ascii_alphanumeric() || c == '$' || c == '_'),
        }
    }

    /// Case-insensitive keyword match at the cursor, requiring that
    /// the keyword not be immediately followed by an
    /// identifier-continuation character.
    pub fn peek_keyword(&self, kw: &str) -> bool {
        let rest = self.rest();
        if rest.len() < kw.len() {
            return false;
        }
        if !rest.is_char_boundary(kw.len()) {
            return false;
        }
        if !rest[..kw.len()].eq_ignore_ascii_case(kw) {
            return false;
        }
        Self::terminates_keyword(rest[kw.len()..].chars().next())
    }

    /// Consumes the keyword if present at the cursor; returns whether
    /// it matched.
    pub fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek_keyword(kw) {
            self.pos += kw.len();
            true
        } else {
            false
        }
    }

    /// Reads a variable or function identifier: a leading letter,
    /// then letters/digits, with an optional trailing `$` marking a
    /// string name.
    pub fn read_identifier(&mut self) -> Result<String> {
        let start = self.pos;
        if !matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            return Err(InterpError::syntax("expected identifier"));
        }
        self.advance();
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.advance();
        }
        if self.peek() == Some('$') {
            self.advance();
        }
        Ok(self.text[start..self.pos].to_string())
    }

    /// Reads a decimal number literal: digits, optional `.digits`,
    /// optional exponent.
    pub fn read_number(&mut self) -> Result<f64> {
        let start = self.pos;
        let mut saw_digit = false;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
            saw_digit = true;
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
                saw_digit = true;
            }
        }
        if !saw_digit {
            self.pos = start;
            return Err(InterpError::syntax("expected number"));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                self.pos = mark;
            }
        }
        self.text[start..self.pos]
            .parse()
            .map_err(|_| InterpError::syntax("malformed number"))
    }

    /// Reads a double-quoted string literal; the opening quote must
    /// still be at the cursor.
    pub fn read_string_literal(&mut self) -> Result<String> {
        self.expect('"', "opening '\"'")?;
        let mut s = String::new();
        loop {
            match self.peek() {
                None => return Err(InterpError::syntax("unterminated string")),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
            }
        }
        Ok(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skip_spaces_stops_at_non_space() {
        let mut c = Cursor::new("   X", 0);
        c.skip_spaces();
        assert_eq!(c.peek(), Some('X'));
    }

    #[test]
    fn keyword_match_requires_terminator() {
        let c = Cursor::new("FORMAT", 0);
        assert!(!c.peek_keyword("FOR"));
        let c = Cursor::new("FOR I", 0);
        assert!(c.peek_keyword("FOR"));
        let c = Cursor::new("FOR", 0);
        assert!(c.peek_keyword("FOR"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(Cursor::new("for x", 0).peek_keyword("FOR"));
        assert!(Cursor::new("For(", 0).peek_keyword("for"));
    }

    #[test]
    fn read_identifier_with_dollar_suffix() {
        let mut c = Cursor::new("A$=5", 0);
        assert_eq!(c.read_identifier().unwrap(), "A$");
        assert_eq!(c.peek(), Some('='));
    }

    #[test]
    fn read_number_with_exponent() {
        let mut c = Cursor::new("1.5e2 ", 0);
        assert_eq!(c.read_number().unwrap(), 150.0);
    }

    #[test]
    fn read_string_literal_stops_at_closing_quote() {
        let mut c = Cursor::new("\"hi\" ", 0);
        assert_eq!(c.read_string_literal().unwrap(), "hi");
        assert_eq!(c.peek(), Some(' '));
    }
}
