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

//! Interpreter driver: turns a source path into tokens, an evaluation, and
//! finally a process exit code. The thing both the CLI and the test suite
//! call.

use std::fs;
use std::io::{self, Read, Write};

use crate::lang::error::EvalError;
use crate::lang::eval::Evaluator;
use crate::lang::lexer::Lexer;
use crate::message::{self, Origin};

/// Owns the per-run error count and drives one interpretation from source
/// path to exit code.
#[derive(Default)]
pub struct Driver {
    error_count: usize,
}

impl Driver {
    /// Creates a new driver with a zeroed error count.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of errors reported by the most recent run.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Reads `path`, interprets it against the process's real stdin/stdout,
    /// and returns a process exit code: `0` on success, non-zero on any
    /// I/O, lex, or evaluation failure, or on a non-empty final stack.
    pub fn run(&mut self, path: &str) -> i32 {
        let source = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.error_count += 1;
                let _ = message::emit(
                    io::stderr(),
                    Origin::General,
                    &format!("could not open '{}': {}", path, e),
                    None,
                );
                return 1;
            }
        };

        self.run_source(&source, path, io::stdin(), io::stdout(), io::stderr())
    }

    /// The same pipeline as [`Self::run`], but over already-read bytes and
    /// with stdin/stdout/stderr injected — the entry point tests use to
    /// drive the core in-process without a real file or terminal.
    pub fn run_source<R: Read, W: Write, E: Write>(
        &mut self,
        source: &[u8],
        path: &str,
        stdin: R,
        stdout: W,
        mut stderr: E,
    ) -> i32 {
        let tokens = Lexer::new(source).tokenize();
        let end = tokens.len() - 1; // exclude the Eof sentinel from dispatch

        let mut eval = Evaluator::new(&tokens, source, stdin, stdout);

        match eval.evaluate(0..end) {
            Ok(()) => {
                let depth = eval.stack().len();
                if depth == 0 {
                    0
                } else {
                    self.error_count += 1;
                    let loc = tokens[end].location();
                    let line = source_line(source, loc.line);
                    let _ = message::emit(
                        &mut stderr,
                        Origin::Source { path, loc },
                        &EvalError::NonEmptyStackAtExit(depth).to_string(),
                        line.as_deref(),
                    );
                    1
                }
            }
            Err(tagged) => {
                self.error_count += 1;
                let loc = tokens[tagged.context].location();
                let line = source_line(source, loc.line);
                let _ = message::emit(
                    &mut stderr,
                    Origin::Source { path, loc },
                    &tagged.value.to_string(),
                    line.as_deref(),
                );
                1
            }
        }
    }
}

/// Returns the 1-based `line_no`'th line of `source`, for reproduction in a
/// diagnostic. `source` need not be valid UTF-8 in general, but source lines
/// that trigger diagnostics are always ASCII token text in practice.
fn source_line(source: &[u8], line_no: u32) -> Option<String> {
    if line_no == 0 {
        return None;
    }
    String::from_utf8_lossy(source)
        .lines()
        .nth((line_no - 1) as usize)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> (i32, String, String) {
        run_with_stdin(src, &[][..])
    }

    fn run_with_stdin(src: &str, stdin: &[u8]) -> (i32, String, String) {
        let mut driver = Driver::new();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = driver.run_source(src.as_bytes(), "<test>", stdin, &mut stdout, &mut stderr);
        (code, String::from_utf8(stdout).unwrap(), String::from_utf8(stderr).unwrap())
    }

    #[test]
    fn successful_program_exits_zero() {
        let (code, stdout, stderr) = run("3 4 + .");
        assert_eq!(code, 0);
        assert_eq!(stdout, "7");
        assert!(stderr.is_empty());
    }

    #[test]
    fn non_empty_stack_at_exit_fails() {
        let (code, _stdout, stderr) = run("1 2 3");
        assert_ne!(code, 0);
        assert!(stderr.contains("still on the stack"));
    }

    #[test]
    fn unmatched_opener_points_to_column_one() {
        let (code, _stdout, stderr) = run("[");
        assert_ne!(code, 0);
        assert!(stderr.contains("<test>:1:1"));
    }

    #[test]
    fn stack_underflow_reports_failure() {
        let (code, _stdout, stderr) = run(".");
        assert_ne!(code, 0);
        assert!(stderr.contains("stack underflow"));
    }

    #[test]
    fn type_mismatch_reports_failure() {
        let (code, _stdout, stderr) = run("[ 1 ] .");
        assert_ne!(code, 0);
        assert!(stderr.contains("type mismatch"));
    }

    #[test]
    fn reading_past_eof_yields_sentinel() {
        let (code, stdout, _stderr) = run_with_stdin("^ ^ +  -2 = .", b"");
        assert_eq!(code, 0);
        assert_eq!(stdout, "-1");
    }

    #[test]
    fn missing_file_reports_general_origin() {
        let mut driver = Driver::new();
        let code = driver.run("/nonexistent/path/to/a/false/program.f");
        assert_ne!(code, 0);
        assert_eq!(driver.error_count(), 1);
    }
}
