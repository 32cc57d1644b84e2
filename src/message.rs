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

//! Diagnostics: formatting and emitting error messages tied to a source span.

use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

use colored::Colorize;

use crate::util::Location;

/// Where a diagnostic is about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Origin<'a> {
    /// The diagnostic originates from the interpreter itself, before any
    /// source file was even opened (e.g. a missing or unreadable path).
    General,

    /// The diagnostic is tied to a specific line:column of a source file.
    Source { path: &'a str, loc: Location },
}

impl Display for Origin<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Origin::General            => write!(f, "{}", crate::PROGRAM_NAME),
            Origin::Source { path, loc } => write!(f, "{}:{}", path, loc),
        }
    }
}

/// Writes one diagnostic to `w`: a source-location prefix, the message, and
/// — for a [`Origin::Source`] diagnostic — a reproduction of the offending
/// line with a `^` caret under the offending column. Colour is applied when
/// writing to a terminal-attached stream but carries no information of its
/// own; every diagnostic is fully readable with colour stripped.
pub fn emit<W: Write>(mut w: W, origin: Origin, message: &str, source_line: Option<&str>) -> io::Result<()> {
    writeln!(w, "{} {}", format!("{}:", origin).bold().red(), message)?;

    if let (Origin::Source { loc, .. }, Some(line)) = (origin, source_line) {
        writeln!(w, "{}", line)?;
        if loc.column > 0 {
            let indent = caret_indent(line, loc.column);
            writeln!(w, "{}{}", indent, "^".bold().red())?;
        }
    }

    Ok(())
}

/// Builds the whitespace indent for a caret under `column`, preserving any
/// leading tab characters from `line` so the caret still lines up when the
/// source mixes tabs and spaces.
fn caret_indent(line: &str, column: u32) -> String {
    let width = (column - 1) as usize;
    line.bytes()
        .take(width)
        .map(|b| if b == b'\t' { '\t' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_origin_has_no_location() {
        assert_eq!(format!("{}", Origin::General), crate::PROGRAM_NAME);
    }

    #[test]
    fn source_origin_formats_path_and_location() {
        let origin = Origin::Source { path: "prog.f", loc: Location::new(3, 5) };
        assert_eq!(format!("{}", origin), "prog.f:3:5");
    }

    #[test]
    fn caret_indent_preserves_tabs() {
        assert_eq!(caret_indent("\tabc", 3), "\t ");
    }

    #[test]
    fn caret_indent_all_spaces() {
        assert_eq!(caret_indent("abcdef", 4), "   ");
    }
}
