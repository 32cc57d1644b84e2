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

//! The evaluator: token-by-token dispatch over a range, with recursive
//! re-entry for `!`, `?`, and `#`.

use std::io::{Read, Write};
use std::ops::Range;

use crate::util::with::{Contexted, With};

use super::brackets::find_closer;
use super::error::EvalError;
use super::stack::Stack;
use super::token::{Kind, Token};
use super::value::{CodeRange, Value};
use super::vars::VarTable;

/// A fault tagged with the index, within the token stream, of the token
/// whose action raised it.
pub type TaggedError = Contexted<EvalError, usize>;

/// Walks a program's token stream, driving the operand stack and variable
/// table. One evaluator instance owns its stack and variable table
/// directly — nothing here is global or static, so a fresh interpreter run
/// never interferes with another.
pub struct Evaluator<'a, R, W> {
    tokens: &'a [Token],
    source: &'a [u8],
    stack: Stack,
    vars: VarTable,
    stdin: R,
    stdout: W,
}

impl<'a, R: Read, W: Write> Evaluator<'a, R, W> {
    /// Creates a new evaluator over `tokens` (lexed from `source`), reading
    /// from `stdin` and writing to `stdout`.
    pub fn new(tokens: &'a [Token], source: &'a [u8], stdin: R, stdout: W) -> Self {
        Self {
            tokens,
            source,
            stack: Stack::new(),
            vars: VarTable::new(),
            stdin,
            stdout,
        }
    }

    /// The operand stack, as left by the most recent [`Self::evaluate`] call.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Walks tokens in `[range.start, range.end)`, performing the action for
    /// each. On failure, the caller is responsible for draining the stack
    /// if it wishes to terminate — `evaluate` itself never clears the stack,
    /// since a caller midway through its own operator may still need the
    /// values it already pushed.
    pub fn evaluate(&mut self, range: Range<usize>) -> Result<(), TaggedError> {
        let mut i = range.start;

        while i < range.end {
            let token = self.tokens[i];

            match token.kind {
                Kind::Whitespace => { i += 1; }

                Kind::VarAddr => {
                    let letter = self.source[token.offset];
                    self.stack.push(Value::VarAddr(letter - b'a'));
                    i += 1;
                }

                Kind::Value => {
                    let n = parse_value(token.text(self.source));
                    self.stack.push(Value::Integer(n));
                    i += 1;
                }

                Kind::Char => {
                    let byte = if token.len == 0 { 0 } else { token.text(self.source)[0] };
                    self.stack.push(Value::Integer(byte as i64));
                    i += 1;
                }

                Kind::LBrace => {
                    match find_closer(self.tokens, i + 1, range.end, Kind::LBrace, Kind::RBrace) {
                        Some(close) => i = close + 1,
                        None => return Err(EvalError::UnmatchedOpener(b'{').with(i)),
                    }
                }

                Kind::LBracket => {
                    match find_closer(self.tokens, i + 1, range.end, Kind::LBracket, Kind::RBracket) {
                        Some(close) => {
                            self.stack.push(Value::Code(CodeRange::new(i + 1, close)));
                            i = close + 1;
                        }
                        None => return Err(EvalError::UnmatchedOpener(b'[').with(i)),
                    }
                }

                Kind::RBrace  => return Err(EvalError::UnmatchedCloser(b'}').with(i)),
                Kind::RBracket => return Err(EvalError::UnmatchedCloser(b']').with(i)),

                Kind::DQuote => {
                    match find_quote_close(self.tokens, i + 1, range.end) {
                        Some(close) => {
                            self.emit_literal(i + 1, close).map_err(|e| e.with(i))?;
                            i = close + 1;
                        }
                        None => return Err(EvalError::UnmatchedQuote.with(i)),
                    }
                }

                Kind::Colon => {
                    let addr = self.stack.pop_varaddr().map_err(|e| e.with(i))?;
                    let value = self.stack.pop().map_err(|e| e.with(i))?;
                    self.vars.set(addr, value);
                    i += 1;
                }

                Kind::Semi => {
                    let addr = self.stack.pop_varaddr().map_err(|e| e.with(i))?;
                    let value = self.vars.get(addr).map_err(|e| e.with(i))?;
                    self.stack.push(value);
                    i += 1;
                }

                Kind::Bang => {
                    let body = self.stack.pop_code().map_err(|e| e.with(i))?;
                    self.evaluate(body.as_range())?;
                    i += 1;
                }

                Kind::Plus | Kind::Minus | Kind::Star | Kind::Slash => {
                    let b = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let result = match token.kind {
                        Kind::Plus  => a.wrapping_add(b),
                        Kind::Minus => a.wrapping_sub(b),
                        Kind::Star  => a.wrapping_mul(b),
                        Kind::Slash => {
                            if b == 0 {
                                return Err(EvalError::DivideByZero.with(i));
                            }
                            a.wrapping_div(b)
                        }
                        _ => unreachable!(),
                    };
                    self.stack.push(Value::Integer(result));
                    i += 1;
                }

                Kind::Underscore => {
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::Integer(a.wrapping_neg()));
                    i += 1;
                }

                Kind::Equal => {
                    let b = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::from_bool(a == b));
                    i += 1;
                }

                Kind::Greater => {
                    let b = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::from_bool(a > b));
                    i += 1;
                }

                Kind::Amp => {
                    let b = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::from_bool(a == -1 && b == -1));
                    i += 1;
                }

                Kind::Pipe => {
                    let b = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::from_bool(a == -1 || b == -1));
                    i += 1;
                }

                Kind::Tilde => {
                    let a = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stack.push(Value::from_bool(a == 0));
                    i += 1;
                }

                Kind::Dollar => {
                    let a = self.stack.pop().map_err(|e| e.with(i))?;
                    self.stack.push(a);
                    self.stack.push(a);
                    i += 1;
                }

                Kind::Percent => {
                    self.stack.pop().map_err(|e| e.with(i))?;
                    i += 1;
                }

                Kind::Backslash => {
                    let b = self.stack.pop().map_err(|e| e.with(i))?;
                    let a = self.stack.pop().map_err(|e| e.with(i))?;
                    self.stack.push(b);
                    self.stack.push(a);
                    i += 1;
                }

                Kind::At => {
                    let c = self.stack.pop().map_err(|e| e.with(i))?;
                    let b = self.stack.pop().map_err(|e| e.with(i))?;
                    let a = self.stack.pop().map_err(|e| e.with(i))?;
                    self.stack.push(b);
                    self.stack.push(c);
                    self.stack.push(a);
                    i += 1;
                }

                Kind::Quest => {
                    let body = self.stack.pop_code().map_err(|e| e.with(i))?;
                    let cond = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    if cond != 0 {
                        self.evaluate(body.as_range())?;
                    }
                    i += 1;
                }

                Kind::Hash => {
                    let body = self.stack.pop_code().map_err(|e| e.with(i))?;
                    let guard = self.stack.pop_code().map_err(|e| e.with(i))?;
                    loop {
                        self.evaluate(guard.as_range())?;
                        let r = self.stack.pop_integer().map_err(|e| e.with(i))?;
                        if r == 0 {
                            break;
                        }
                        self.evaluate(body.as_range())?;
                    }
                    i += 1;
                }

                Kind::Dot => {
                    let n = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    write!(self.stdout, "{}", n).map_err(EvalError::from).map_err(|e| e.with(i))?;
                    i += 1;
                }

                Kind::Comma => {
                    let n = self.stack.pop_integer().map_err(|e| e.with(i))?;
                    self.stdout.write_all(&[n as u8]).map_err(EvalError::from).map_err(|e| e.with(i))?;
                    i += 1;
                }

                Kind::Caret => {
                    let mut byte = [0u8; 1];
                    let read = self.stdin.read(&mut byte).map_err(EvalError::from).map_err(|e| e.with(i))?;
                    let n = if read == 0 { -1 } else { byte[0] as i64 };
                    self.stack.push(Value::Integer(n));
                    i += 1;
                }

                Kind::Unknown(b) => return Err(EvalError::UnknownToken(b).with(i)),

                Kind::Eof => { i += 1; }
            }
        }

        Ok(())
    }

    /// `"..."` — writes the first source byte of every token strictly
    /// between `first` and `last` (exclusive), whitespace tokens included.
    /// A multi-digit number literal inside the quoted range thus contributes
    /// only its leading digit; this mirrors the reference lexer's
    /// token-at-a-time emission loop rather than reproducing the quoted
    /// source text byte-for-byte.
    fn emit_literal(&mut self, first: usize, last: usize) -> Result<(), EvalError> {
        for token in &self.tokens[first..last] {
            let byte = if token.len == 0 { 0 } else { token.text(self.source)[0] };
            self.stdout.write_all(&[byte])?;
        }
        Ok(())
    }
}

/// Finds the next `"` token in `[start, end)`. String literals don't nest.
fn find_quote_close(tokens: &[Token], start: usize, end: usize) -> Option<usize> {
    (start..end).find(|&i| tokens[i].kind == Kind::DQuote)
}

/// Parses a greedy digit run into a machine-width integer, wrapping on
/// overflow rather than panicking — consistent with this language's silent
/// two's-complement arithmetic elsewhere.
fn parse_value(digits: &[u8]) -> i64 {
    let mut n: i64 = 0;
    for &b in digits {
        n = n.wrapping_mul(10).wrapping_add((b - b'0') as i64);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::lexer::Lexer;

    fn run(src: &str) -> (Result<(), TaggedError>, Vec<Value>, String) {
        run_with_stdin(src, &[][..])
    }

    fn run_with_stdin(src: &str, stdin: &[u8]) -> (Result<(), TaggedError>, Vec<Value>, String) {
        let source = src.as_bytes();
        let tokens = Lexer::new(source).tokenize();
        let end = tokens.len() - 1; // exclude Eof sentinel
        let mut stdout = Vec::new();
        let (r, stack) = {
            let mut eval = Evaluator::new(&tokens, source, stdin, &mut stdout);
            let r = eval.evaluate(0..end);
            (r, eval.stack)
        };
        let values = drain(stack);
        (r, values, String::from_utf8(stdout).unwrap())
    }

    fn drain(mut stack: Stack) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(v) = stack.pop() {
            out.push(v);
        }
        out.reverse();
        out
    }

    #[test]
    fn arithmetic_scenario_b() {
        let (r, stack, stdout) = run("3 4 + .");
        assert!(r.is_ok());
        assert!(stack.is_empty());
        assert_eq!(stdout, "7");
    }

    #[test]
    fn variable_round_trip_scenario_c() {
        let (r, _stack, stdout) = run("42 a : a ; .");
        assert!(r.is_ok());
        assert_eq!(stdout, "42");
    }

    #[test]
    fn conditional_true_scenario_d() {
        let (r, _stack, stdout) = run("1 [ 5 . ] ?");
        assert!(r.is_ok());
        assert_eq!(stdout, "5");
    }

    #[test]
    fn conditional_false_scenario_d() {
        let (r, _stack, stdout) = run("0 [ 5 . ] ?");
        assert!(r.is_ok());
        assert_eq!(stdout, "");
    }

    #[test]
    fn while_loop_counts_down_scenario_e() {
        let (r, _stack, stdout) = run("3 a : [ a ; 0 > ] [ a ; . a ; 1 - a : ] #");
        assert!(r.is_ok());
        assert_eq!(stdout, "321");
    }

    #[test]
    fn nested_quotation_apply_scenario_f() {
        let (r, _stack, stdout) = run("[ [ 9 . ] ! ] !");
        assert!(r.is_ok());
        assert_eq!(stdout, "9");
    }

    #[test]
    fn hello_world_literal_scenario_a() {
        let (r, _stack, stdout) = run("\"Hello\"");
        assert!(r.is_ok());
        assert_eq!(stdout, "Hello");
    }

    #[test]
    fn unmatched_opener_scenario_g() {
        let (r, _stack, _stdout) = run("[");
        let err = r.unwrap_err();
        assert!(matches!(err.value, EvalError::UnmatchedOpener(b'[')));
    }

    #[test]
    fn stack_underflow_scenario_h() {
        let (r, _stack, _stdout) = run(". ");
        assert!(matches!(r.unwrap_err().value, EvalError::StackUnderflow));
    }

    #[test]
    fn type_mismatch_scenario_i() {
        let (r, _stack, _stdout) = run("[ 1 ] .");
        let err = r.unwrap_err().value;
        assert!(matches!(
            err,
            EvalError::TypeMismatch { expected: "integer", actual: "code quotation" }
        ));
    }

    #[test]
    fn read_past_eof_yields_negative_one_scenario_l() {
        let (r, _stack, stdout) = run_with_stdin("^ ^ +  -2 = .", b"");
        assert!(r.is_ok());
        assert_eq!(stdout, "-1");
    }

    #[test]
    fn dup_invariant_2() {
        let (r, stack, _stdout) = run("5 $");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(5), Value::Integer(5)]);
    }

    #[test]
    fn swap_swap_is_identity_invariant_3() {
        let (r, stack, _stdout) = run("1 2 \\ \\");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn rot_three_times_is_identity_invariant_4() {
        let (r, stack, _stdout) = run("1 2 3 @ @ @");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    }

    #[test]
    fn double_negate_is_identity_invariant_6() {
        let (r, stack, _stdout) = run("7 _ _");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(7)]);
    }

    #[test]
    fn double_not_invariant_7() {
        let (r, stack, _stdout) = run("0 ~ ~");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(-1)]);

        let (r, stack, _stdout) = run("5 ~ ~");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(0)]);
    }

    #[test]
    fn and_or_treat_only_negative_one_as_true() {
        // 5 is truthy for `?` but not for `&`/`|`.
        let (r, stack, _stdout) = run("5 -1 &");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(0)]);

        let (r, stack, _stdout) = run("-1 -1 &");
        assert!(r.is_ok());
        assert_eq!(stack, vec![Value::Integer(-1)]);
    }

    #[test]
    fn apply_literal_quotation_invariant_8() {
        let (r1, _s1, out1) = run("[ 9 . ] !");
        let (r2, _s2, out2) = run("9 .");
        assert!(r1.is_ok() && r2.is_ok());
        assert_eq!(out1, out2);
    }

    #[test]
    fn dup_drop_apply_runs_quotation_once_invariant_9() {
        let (r, _stack, stdout) = run("[ 9 . ] $ % !");
        assert!(r.is_ok());
        assert_eq!(stdout, "9");
    }

    #[test]
    fn uninitialized_variable_fails() {
        let (r, _stack, _stdout) = run("b ;");
        assert!(matches!(r.unwrap_err().value, EvalError::UninitializedVariable('b')));
    }

    #[test]
    fn divide_by_zero_fails() {
        let (r, _stack, _stdout) = run("1 0 /");
        assert!(matches!(r.unwrap_err().value, EvalError::DivideByZero));
    }

    #[test]
    fn unknown_token_surfaces_at_evaluation() {
        let (r, _stack, _stdout) = run("`");
        assert!(matches!(r.unwrap_err().value, EvalError::UnknownToken(b'`')));
    }

    #[test]
    fn string_literal_embeds_only_leading_digit_of_numbers() {
        let (r, _stack, stdout) = run("\"a12b\"");
        assert!(r.is_ok());
        assert_eq!(stdout, "a1b");
    }
}
