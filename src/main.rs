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

mod driver;
mod lang;
mod message;
mod util;

use std::env;
use std::process;

use driver::Driver;

/// The name of the interpreter, used as the general-origin prefix on
/// diagnostics that have no source location.
pub const PROGRAM_NAME: &str = "falsec";

fn main() {
    let mut args = env::args();
    args.next(); // argv[0]

    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("usage: {} <path>", PROGRAM_NAME);
            process::exit(2);
        }
    };

    let mut driver = Driver::new();
    process::exit(driver.run(&path));
}
