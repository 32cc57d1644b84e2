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

//! The fixed table of 26 global variable slots.

use super::error::EvalError;
use super::value::Value;

/// A fixed array of 26 slots, indexed by `letter - 'a'`.
///
/// Slot `a` starts holding integer `0`; slots `b`..`z` start uninitialised.
/// This mirrors the reference interpreter, which seeds every non-`a` slot
/// with an out-of-range type tag so that any read fails a type check — here
/// that failure is made explicit as [`EvalError::UninitializedVariable`]
/// instead of an implicit out-of-bounds sentinel.
#[derive(Debug)]
pub struct VarTable {
    slots: [Option<Value>; 26],
}

impl Default for VarTable {
    fn default() -> Self {
        let mut slots: [Option<Value>; 26] = Default::default();
        slots[0] = Some(Value::Integer(0));
        Self { slots }
    }
}

impl VarTable {
    /// Creates a new table with slot `a` initialised to `0` and all other
    /// slots uninitialised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a copy of `value` into the slot addressed by `slot` (`0..26`).
    pub fn set(&mut self, slot: u8, value: Value) {
        self.slots[slot as usize] = Some(value);
    }

    /// Reads the slot addressed by `slot`.
    ///
    /// Fails with [`EvalError::UninitializedVariable`] if the slot has never
    /// been written.
    pub fn get(&self, slot: u8) -> Result<Value, EvalError> {
        self.slots[slot as usize]
            .ok_or_else(|| EvalError::UninitializedVariable((b'a' + slot) as char))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_a_starts_at_zero() {
        let vars = VarTable::new();
        assert_eq!(vars.get(0).unwrap(), Value::Integer(0));
    }

    #[test]
    fn other_slots_start_uninitialised() {
        let vars = VarTable::new();
        assert!(matches!(
            vars.get(1),
            Err(EvalError::UninitializedVariable('b'))
        ));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut vars = VarTable::new();
        vars.set(25, Value::Integer(99));
        assert_eq!(vars.get(25).unwrap(), Value::Integer(99));
    }
}
