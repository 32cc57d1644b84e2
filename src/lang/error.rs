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

//! Errors raised while lexing, bracket-matching, or evaluating a program.

use std::fmt::{self, Display, Formatter};
use std::io;

/// A fault detected while lexing, bracket-matching, or evaluating a program.
///
/// Every variant is tagged, by its caller, with the index of the token
/// whose action raised it (see [`crate::util::with::With`]) — a
/// [`Contexted<EvalError, usize>`](crate::util::with::Contexted) is what
/// actually propagates out of [`evaluate`](super::eval::Evaluator::evaluate).
#[derive(Clone, Debug)]
pub enum EvalError {
    /// A `{` or `[` with no matching closer before the enclosing range ends.
    UnmatchedOpener(u8),

    /// A `}` or `]` encountered with no corresponding opener (reached by
    /// bracket-matching a sibling range, rather than recursive descent).
    UnmatchedCloser(u8),

    /// A `"` string literal with no closing `"` before the enclosing range ends.
    UnmatchedQuote,

    /// A source byte outside the language's closed token set.
    UnknownToken(u8),

    /// An operator popped from an empty stack.
    StackUnderflow,

    /// An operator popped a value whose tag didn't match what it required.
    TypeMismatch { expected: &'static str, actual: &'static str },

    /// `;` read a variable slot that has never been written.
    UninitializedVariable(char),

    /// `/` with a zero divisor.
    DivideByZero,

    /// The operand stack was non-empty at top-level program exit.
    NonEmptyStackAtExit(usize),

    /// A read from stdin or write to stdout failed at the OS level.
    Io(io::ErrorKind),
}

impl From<io::Error> for EvalError {
    fn from(e: io::Error) -> Self {
        EvalError::Io(e.kind())
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use EvalError::*;
        match *self {
            UnmatchedOpener(b) =>
                write!(f, "unmatched '{}': no closing bracket before end of range", b as char),
            UnmatchedCloser(b) =>
                write!(f, "unmatched '{}': no opening bracket for this closer", b as char),
            UnmatchedQuote =>
                write!(f, "unmatched '\"': no closing quote before end of range"),
            UnknownToken(b) =>
                write!(f, "unknown token {:?}", b as char),
            StackUnderflow =>
                write!(f, "stack underflow: operator needs a value that isn't there"),
            TypeMismatch { expected, actual } =>
                write!(f, "type mismatch: expected {}, found {}", expected, actual),
            UninitializedVariable(name) =>
                write!(f, "variable '{}' read before it was ever assigned", name),
            DivideByZero =>
                write!(f, "division by zero"),
            NonEmptyStackAtExit(depth) =>
                write!(f, "program exited with {} value(s) still on the stack", depth),
            Io(kind) =>
                write!(f, "I/O error: {}", kind),
        }
    }
}
