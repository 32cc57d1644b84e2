// This file is part of falsec, an interpreter for a minimalist stack
// language in the tradition of FALSE.
// Copyright 2026 Falsec Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// falsec is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// falsec is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with falsec.  If not, see <http://www.gnu.org/licenses/>.

//! Lexical analyzer.
//!
//! The grammar has no multi-byte ambiguity beyond digit runs and `'x`
//! character literals, so scanning is a plain match on the leading byte
//! rather than a table-driven DFA.

use super::token::{Kind, Token};

/// Converts a byte buffer into an ordered array of tokens, plus a trailing
/// [`Kind::Eof`] sentinel.
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`.
    pub fn new(source: &'a [u8]) -> Self {
        Self { source, pos: 0, line: 1, line_start: 0 }
    }

    /// Scans the entire source buffer and returns its token stream.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.source.len());

        while self.pos < self.source.len() {
            tokens.push(self.next_token());
        }

        tokens.push(Token {
            kind: Kind::Eof,
            offset: self.source.len(),
            len: 0,
            line: self.line,
            line_start: self.line_start,
        });

        tokens
    }

    fn next_token(&mut self) -> Token {
        let b = self.source[self.pos];

        if b.is_ascii_whitespace() {
            return self.scan_whitespace(b);
        }
        if b.is_ascii_lowercase() {
            return self.make(Kind::VarAddr, self.pos, 1);
        }
        if b.is_ascii_digit() {
            return self.scan_value();
        }
        if b == b'\'' {
            return self.scan_char();
        }

        let offset = self.pos;
        self.pos += 1;
        self.make(Kind::from_byte(b), offset, 1)
    }

    /// Scans a single whitespace byte. A newline advances the line counter
    /// and moves `line_start` *before* the newline's own token is recorded,
    /// so a `\n` token's `(line, line_start)` describes the line beginning
    /// immediately after it — a faithful reproduction of the reference
    /// lexer's token-recording order, not an off-by-one bug.
    fn scan_whitespace(&mut self, b: u8) -> Token {
        let offset = self.pos;
        if b == b'\n' {
            self.line += 1;
            self.line_start = offset + 1;
        }
        let token = self.make(Kind::Whitespace, offset, 1);
        self.pos += 1;
        token
    }

    fn scan_value(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        self.make(Kind::Value, start, self.pos - start)
    }

    /// `'x` — the apostrophe is consumed but not part of the span; if input
    /// ends right after the apostrophe, the span is zero-length.
    fn scan_char(&mut self) -> Token {
        self.pos += 1; // consume '\''
        if self.pos >= self.source.len() {
            return self.make(Kind::Char, self.pos, 0);
        }
        let offset = self.pos;
        self.pos += 1;
        self.make(Kind::Char, offset, 1)
    }

    #[inline]
    fn make(&self, kind: Kind, offset: usize, len: usize) -> Token {
        Token { kind, offset, len, line: self.line, line_start: self.line_start }
    }
}
