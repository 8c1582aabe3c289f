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

//! Recursive-descent expression evaluator.
//!
//! Precedence, low to high:
//! `or_expr -> and_expr -> compare -> add -> mul -> pow -> factor`.
//! `^` is right-associative; everything else here is left-associative
//! or non-chaining (`compare` accepts at most one operator, matching
//! the dialect's lack of `1 < 2 < 3` chaining).

use crate::error::{InterpError, Result};
use crate::interpreter::Interpreter;
use crate::lang::intrinsics;
use crate::lang::Cursor;
use crate::value::Value;

pub fn eval(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    eval_or(interp, cursor)
}

fn eval_or(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut left = eval_and(interp, cursor)?;
    loop {
        cursor.skip_spaces();
        if cursor.eat_keyword("OR") {
            let right = eval_and(interp, cursor)?;
            left = left.op_or(right)?;
        } else {
            break;
        }
    }
    Ok(left)
}

fn eval_and(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut left = eval_compare(interp, cursor)?;
    loop {
        cursor.skip_spaces();
        if cursor.eat_keyword("AND") {
            let right = eval_compare(interp, cursor)?;
            left = left.op_and(right)?;
        } else {
            break;
        }
    }
    Ok(left)
}

fn eval_compare(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let left = eval_add(interp, cursor)?;
    cursor.skip_spaces();
    let rest = cursor.rest();
    let op: Option<(&str, usize)> = if rest.starts_with("<=") {
        Some(("<=", 2))
    } else if rest.starts_with(">=") {
        Some((">=", 2))
    } else if rest.starts_with("<>") {
        Some(("<>", 2))
    } else if rest.starts_with('<') {
        Some(("<", 1))
    } else if rest.starts_with('>') {
        Some((">", 1))
    } else if rest.starts_with('=') {
        Some(("=", 1))
    } else {
        None
    };
    match op {
        None => Ok(left),
        Some((sym, len)) => {
            cursor.set_pos(cursor.pos() + len);
            let right = eval_add(interp, cursor)?;
            match sym {
                "<=" => left.op_le(right),
                ">=" => left.op_ge(right),
                "<>" => left.op_ne(right),
                "<" => left.op_lt(right),
                ">" => left.op_gt(right),
                "=" => left.op_eq(right),
                _ => unreachable!(),
            }
        }
    }
}

fn eval_add(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut left = eval_mul(interp, cursor)?;
    loop {
        cursor.skip_spaces();
        match cursor.peek() {
            Some('+') => {
                cursor.advance();
                let right = eval_mul(interp, cursor)?;
                left = left.op_add(right)?;
            }
            Some('-') => {
                cursor.advance();
                let right = eval_mul(interp, cursor)?;
                left = left.op_sub(right)?;
            }
            _ => break,
        }
    }
    Ok(left)
}

fn eval_mul(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut left = eval_pow(interp, cursor)?;
    loop {
        cursor.skip_spaces();
        match cursor.peek() {
            Some('*') => {
                cursor.advance();
                let right = eval_pow(interp, cursor)?;
                left = left.op_mul(right)?;
            }
            Some('/') => {
                cursor.advance();
                let right = eval_pow(interp, cursor)?;
                left = left.op_div(right)?;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Right-associative, so `2^3^2 == 2^(3^2) == 512`.
fn eval_pow(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let base = eval_factor(interp, cursor)?;
    cursor.skip_spaces();
    if cursor.peek() == Some('^') {
        cursor.advance();
        let exp = eval_pow(interp, cursor)?;
        base.op_pow(exp)
    } else {
        Ok(base)
    }
}

/// Unary `+`/`-` bind here, tighter than any binary operator, so
/// `-2^2` parses as `-(2^2) == -4`.
fn eval_factor(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    cursor.skip_spaces();
    match cursor.peek() {
        Some('(') => {
            cursor.advance();
            let v = eval_or(interp, cursor)?;
            cursor.skip_spaces();
            cursor.expect(')', "')'")?;
            Ok(v)
        }
        Some('"') => Ok(Value::str(cursor.read_string_literal()?)),
        Some('+') => {
            cursor.advance();
            eval_factor(interp, cursor)?.op_pos()
        }
        Some('-') => {
            cursor.advance();
            eval_factor(interp, cursor)?.op_neg()
        }
        Some(c) if c.is_ascii_digit() || c == '.' => Ok(Value::num(cursor.read_number()?)),
        Some(c) if c.is_ascii_alphabetic() => eval_name(interp, cursor),
        _ => Err(InterpError::syntax("unexpected character in expression")),
    }
}

/// An identifier in value position is either a bare/array variable
/// reference or an intrinsic function call; both share the same
/// `name(` lookahead.
fn eval_name(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    let name = cursor.read_identifier()?;
    cursor.skip_spaces();
    if cursor.peek() != Some('(') {
        return interp.vars.get(&name);
    }
    if let Some(func) = intrinsics::lookup(&name) {
        cursor.advance();
        intrinsics::dispatch(interp, func, cursor)
    } else {
        cursor.advance();
        let index = eval_or(interp, cursor)?.as_num()?;
        cursor.skip_spaces();
        cursor.expect(')', "')'")?;
        interp.vars.get_indexed(&name, index)
    }
}
