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

//! The interpreter's value domain: a closed sum of three variants.

use std::ops::Range;

/// An immutable half-open interval `[first, last)` of token indices: the
/// body of a matched `[...]` quotation.
///
/// A plain pair of indices rather than [`std::ops::Range`], which isn't
/// `Copy` — copying a code-range is meant to be a bytewise duplication of
/// the two indices, not something that needs `.clone()`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CodeRange {
    pub first: usize,
    pub last: usize,
}

impl CodeRange {
    #[inline]
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Returns the equivalent [`Range`], for slicing the token stream.
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.first..self.last
    }
}

/// A stack/variable value. `Copy`, since every variant is a plain scalar or
/// a pair of indices — there is no heap payload and thus no destructor to
/// run on pop-and-discard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    /// A machine-width signed integer. Booleans are encoded as integers:
    /// `true = -1` (all bits set), `false = 0`.
    Integer(i64),

    /// A reference to one of the 26 variable slots, by index `0..26`.
    VarAddr(u8),

    /// The body of a matched `[...]` quotation.
    Code(CodeRange),
}

impl Value {
    /// Returns the value's type name, for `TypeMismatch` diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::VarAddr(_) => "variable address",
            Value::Code(_)    => "code quotation",
        }
    }

    /// `true` encoded as an integer: all bits set.
    pub const TRUE: Value = Value::Integer(-1);

    /// `false` encoded as an integer.
    pub const FALSE: Value = Value::Integer(0);

    /// Encodes a Rust `bool` the FALSE way: `-1` for `true`, `0` for `false`.
    #[inline]
    pub fn from_bool(b: bool) -> Value {
        Value::Integer(if b { -1 } else { 0 })
    }
}
