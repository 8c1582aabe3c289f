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

//! The statement executor: dispatch by keyword, one function per
//! statement, all sharing the same `Cursor` the expression evaluator
//! reads from.

use crate::config::PRINT_ZONE;
use crate::control::{ForFrame, Pos};
use crate::error::{InterpError, Result};
use crate::interpreter::Interpreter;
use crate::lang::expr;
use crate::lang::Cursor;
use crate::num::{format_number, parse_lenient, trunc_index};
use crate::program::ProgramStore;
use crate::value::Value;
use crate::vars::key_of;

/// What the driver should do after a statement returns.
pub enum Flow {
    /// Fall through to ordinary `:`/end-of-line handling.
    Next,
    /// Control was transferred explicitly; resume at this position.
    Goto(Pos),
    /// `END`/`STOP` reached.
    Halt,
}

pub fn execute(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();

    if cursor.peek() == Some('\'') || cursor.eat_keyword("REM") {
        cursor.goto_end();
        return Ok(Flow::Next);
    }
    if cursor.eat('?') {
        return stmt_print(interp, cursor);
    }
    if cursor.eat_keyword("PRINT") {
        return stmt_print(interp, cursor);
    }
    if cursor.eat_keyword("INPUT") {
        return stmt_input(interp, cursor);
    }
    if cursor.eat_keyword("LET") {
        return stmt_let(interp, cursor);
    }
    if cursor.eat_keyword("GOSUB") {
        return stmt_gosub(interp, cursor);
    }
    if cursor.eat_keyword("GOTO") {
        return stmt_goto(interp, cursor);
    }
    if cursor.eat_keyword("RETURN") {
        return stmt_return(interp);
    }
    if cursor.eat_keyword("IF") {
        return stmt_if(interp, cursor);
    }
    if cursor.eat_keyword("FOR") {
        return stmt_for(interp, cursor);
    }
    if cursor.eat_keyword("NEXT") {
        return stmt_next(interp, cursor);
    }
    if cursor.eat_keyword("DIM") {
        return stmt_dim(interp, cursor);
    }
    if cursor.eat_keyword("END") || cursor.eat_keyword("STOP") {
        return Ok(Flow::Halt);
    }
    if cursor.eat_keyword("SLEEP") {
        return stmt_sleep(interp, cursor);
    }
    if matches!(cursor.peek(), Some(c) if c.is_ascii_alphabetic()) {
        return stmt_let(interp, cursor);
    }
    Err(InterpError::syntax("unknown statement"))
}

fn read_line_number(cursor: &mut Cursor<'_>) -> Result<u32> {
    cursor.skip_spaces();
    let n = cursor.read_number()?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(InterpError::range("invalid line number"));
    }
    Ok(n as u32)
}

fn print_value(interp: &mut Interpreter, v: &Value) -> Result<()> {
    match v {
        Value::Str(s) => interp.emit(s),
        Value::Num(n) => interp.emit(&format_number(*n)),
    }
}

fn stmt_print(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    let mut newline = true;
    loop {
        cursor.skip_spaces();
        if cursor.at_end() || cursor.peek() == Some(':') {
            break;
        }
        let v = expr::eval(interp, cursor)?;
        print_value(interp, &v)?;
        cursor.skip_spaces();
        match cursor.peek() {
            Some(';') => {
                newline = false;
                cursor.advance();
            }
            Some(',') => {
                newline = false;
                cursor.advance();
                let next_col = ((interp.print_col / PRINT_ZONE) + 1) * PRINT_ZONE;
                let next_col = next_col.max(interp.print_col);
                let pad = next_col - interp.print_col;
                if pad > 0 {
                    interp.emit(&" ".repeat(pad))?;
                }
            }
            _ => {
                newline = true;
                break;
            }
        }
    }
    if newline {
        interp.newline()?;
    }
    interp.flush()?;
    Ok(Flow::Next)
}

fn stmt_input(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();
    let mut prompt = None;
    if cursor.peek() == Some('"') {
        prompt = Some(cursor.read_string_literal()?);
        cursor.skip_spaces();
        if matches!(cursor.peek(), Some(';' | ',')) {
            cursor.advance();
        }
    }

    let mut first = true;
    loop {
        cursor.skip_spaces();
        if cursor.at_end() || cursor.peek() == Some(':') {
            break;
        }
        if !matches!(cursor.peek(), Some(c) if c.is_ascii_alphabetic()) {
            return Err(InterpError::syntax("expected variable in INPUT"));
        }
        let name = cursor.read_identifier()?;
        cursor.skip_spaces();
        let index = if cursor.peek() == Some('(') {
            cursor.advance();
            let idx = expr::eval(interp, cursor)?.as_num()?;
            cursor.skip_spaces();
            cursor.expect(')', "')'")?;
            Some(idx)
        } else {
            None
        };

        if first {
            if let Some(p) = &prompt {
                interp.emit(p)?;
            }
        }
        interp.emit("? ")?;
        interp.flush()?;

        let mut line = String::new();
        let n = std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| InterpError::io(e.to_string()))?;
        if n == 0 {
            return Err(InterpError::io("unexpected end of input"));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        let is_string = name.ends_with('$');
        let value = if is_string {
            Value::str(trimmed)
        } else {
            Value::num(parse_lenient(trimmed))
        };
        match index {
            Some(idx) => interp.vars.set_indexed(&name, idx, value)?,
            None => interp.vars.set(&name, value)?,
        }

        first = false;
        cursor.skip_spaces();
        if cursor.eat(',') {
            continue;
        }
        break;
    }
    Ok(Flow::Next)
}

fn stmt_let(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();
    let name = cursor.read_identifier()?;
    cursor.skip_spaces();
    if cursor.eat('(') {
        let index = expr::eval(interp, cursor)?.as_num()?;
        cursor.skip_spaces();
        cursor.expect(')', "')'")?;
        cursor.skip_spaces();
        cursor.expect('=', "'='")?;
        let value = expr::eval(interp, cursor)?;
        interp.vars.set_indexed(&name, index, value)?;
    } else {
        cursor.expect('=', "'='")?;
        let value = expr::eval(interp, cursor)?;
        interp.vars.set(&name, value)?;
    }
    Ok(Flow::Next)
}

fn stmt_goto(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    let n = read_line_number(cursor)?;
    let idx = interp.program.find_index(n)?;
    Ok(Flow::Goto(Pos { line: idx, offset: 0 }))
}

fn stmt_gosub(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    let n = read_line_number(cursor)?;
    let return_to = Pos { line: interp.current_line_index, offset: cursor.pos() };
    let idx = interp.program.find_index(n)?;
    interp.gosub.push(return_to)?;
    Ok(Flow::Goto(Pos { line: idx, offset: 0 }))
}

fn stmt_return(interp: &mut Interpreter) -> Result<Flow> {
    let pos = interp.gosub.pop()?;
    Ok(Flow::Goto(pos))
}

fn stmt_if(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    let cond = expr::eval(interp, cursor)?;
    cursor.skip_spaces();
    if !cursor.eat_keyword("THEN") {
        return Err(InterpError::syntax("expected THEN"));
    }
    cursor.skip_spaces();

    if !cond.truthy() {
        cursor.goto_end();
        return Ok(Flow::Next);
    }

    if matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        let n = read_line_number(cursor)?;
        let idx = interp.program.find_index(n)?;
        return Ok(Flow::Goto(Pos { line: idx, offset: 0 }));
    }
    execute(interp, cursor)
}

fn stmt_for(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();
    let name = cursor.read_identifier()?;
    if name.ends_with('$') {
        return Err(InterpError::TypeMismatch);
    }
    cursor.skip_spaces();
    cursor.expect('=', "'='")?;
    let start = expr::eval(interp, cursor)?.as_num()?;
    cursor.skip_spaces();
    if !cursor.eat_keyword("TO") {
        return Err(InterpError::syntax("expected TO"));
    }
    let end = expr::eval(interp, cursor)?.as_num()?;
    cursor.skip_spaces();
    let step = if cursor.eat_keyword("STEP") {
        expr::eval(interp, cursor)?.as_num()?
    } else {
        1.0
    };

    interp.vars.set(&name, Value::num(start))?;

    let enters = if step >= 0.0 { start <= end } else { start >= end };
    if !enters {
        let pos = skip_for_body(&interp.program, interp.current_line_index, cursor.pos())?;
        return Ok(Flow::Goto(pos));
    }

    let frame = ForFrame {
        key: key_of(&name),
        end,
        step,
        resume: Pos { line: interp.current_line_index, offset: cursor.pos() },
    };
    interp.for_stack.push(frame)?;
    Ok(Flow::Next)
}

/// Scans forward from just past a `FOR` clause to the position right
/// after its matching `NEXT`, tracking nesting depth so an inner
/// `FOR`/`NEXT` pair doesn't satisfy an outer one. Used when the
/// initial comparison fails and the loop body must run zero times.
fn skip_for_body(program: &ProgramStore, mut line_idx: usize, mut offset: usize) -> Result<Pos> {
    let mut depth = 1i32;
    loop {
        if line_idx >= program.len() {
            return Err(InterpError::syntax("FOR without matching NEXT"));
        }
        let text = program.line_at(line_idx).text.clone();
        let mut cursor = Cursor::new(&text, offset);
        loop {
            cursor.skip_spaces();
            if cursor.at_end() {
                break;
            }
            if cursor.peek() == Some('"') {
                cursor.read_string_literal()?;
                continue;
            }
            if cursor.peek() == Some('\'') || cursor.eat_keyword("REM") {
                break;
            }
            if cursor.eat_keyword("FOR") {
                depth += 1;
                continue;
            }
            if cursor.eat_keyword("NEXT") {
                depth -= 1;
                if depth == 0 {
                    cursor.skip_spaces();
                    if matches!(cursor.peek(), Some(c) if c.is_ascii_alphabetic()) {
                        cursor.read_identifier()?;
                    }
                    return Ok(Pos { line: line_idx, offset: cursor.pos() });
                }
                continue;
            }
            cursor.advance();
        }
        line_idx += 1;
        offset = 0;
    }
}

fn stmt_next(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();
    let key = if matches!(cursor.peek(), Some(c) if c.is_ascii_alphabetic()) {
        Some(key_of(&cursor.read_identifier()?))
    } else {
        None
    };

    let frame = interp.for_stack.resolve(key)?;
    let current = interp.vars.get_by_key(frame.key)?.as_num()?;
    let next_val = current + frame.step;
    interp.vars.set_by_key(frame.key, Value::num(next_val))?;

    let continues = if frame.step >= 0.0 { next_val <= frame.end } else { next_val >= frame.end };
    if continues {
        interp.for_stack.push_back(frame)?;
        Ok(Flow::Goto(frame.resume))
    } else {
        Ok(Flow::Next)
    }
}

fn stmt_dim(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    loop {
        cursor.skip_spaces();
        let name = cursor.read_identifier()?;
        cursor.skip_spaces();
        cursor.expect('(', "'('")?;
        let size = expr::eval(interp, cursor)?.as_num()?;
        cursor.skip_spaces();
        cursor.expect(')', "')'")?;
        if size < 0.0 {
            return Err(InterpError::range("negative DIM size"));
        }
        interp.vars.dim(&name, trunc_index(size) as usize)?;
        cursor.skip_spaces();
        if !cursor.eat(',') {
            break;
        }
    }
    Ok(Flow::Next)
}

fn stmt_sleep(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Flow> {
    cursor.skip_spaces();
    let ticks = if cursor.eat('(') {
        let v = expr::eval(interp, cursor)?.as_num()?;
        cursor.skip_spaces();
        cursor.expect(')', "')'")?;
        v
    } else {
        expr::eval(interp, cursor)?.as_num()?
    };
    if ticks > 0.0 {
        let micros = (ticks * (1_000_000.0 / 60.0) + 0.5) as u64;
        if micros > 0 {
            std::thread::sleep(std::time::Duration::from_micros(micros));
        }
    }
    Ok(Flow::Next)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::program::ProgramStore;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn run_program(lines: &[(u32, &str)]) -> Interpreter {
        let map: BTreeMap<u32, Rc<str>> =
            lines.iter().map(|(n, t)| (*n, Rc::from(*t))).collect();
        let mut interp = Interpreter::new(ProgramStore::from_map(map).unwrap());
        interp.run().unwrap();
        interp
    }

    #[test]
    fn implicit_let_and_print() {
        let mut interp = run_program(&[(10, "X=5"), (20, "END")]);
        assert_eq!(interp.vars.get("X").unwrap(), Value::num(5.0));
    }

    #[test]
    fn if_then_false_discards_rest_of_line_including_colon() {
        let mut interp = run_program(&[(10, "IF 0 THEN X=1 : Y=2"), (20, "END")]);
        assert_eq!(interp.vars.get("X").unwrap(), Value::num(0.0));
        assert_eq!(interp.vars.get("Y").unwrap(), Value::num(0.0));
    }

    #[test]
    fn if_then_true_runs_rest_of_line() {
        let mut interp = run_program(&[(10, "IF 1 THEN X=1 : Y=2"), (20, "END")]);
        assert_eq!(interp.vars.get("X").unwrap(), Value::num(1.0));
        assert_eq!(interp.vars.get("Y").unwrap(), Value::num(2.0));
    }

    #[test]
    fn for_next_completes_one_past_end() {
        let mut interp = run_program(&[
            (10, "FOR I=1 TO 3"),
            (20, "NEXT I"),
            (30, "END"),
        ]);
        assert_eq!(interp.vars.get("I").unwrap(), Value::num(4.0));
    }

    #[test]
    fn negative_step_loop_below_end_runs_zero_times() {
        let mut interp = run_program(&[
            (10, "FOR I=1 TO 5 STEP -1"),
            (20, "NEXT I"),
            (30, "END"),
        ]);
        assert_eq!(interp.vars.get("I").unwrap(), Value::num(1.0));
    }

    #[test]
    fn negative_step_loop_below_end_skips_body_entirely() {
        let mut interp = run_program(&[
            (10, "FOR I=1 TO 5 STEP -1"),
            (20, "X=99"),
            (30, "NEXT I"),
            (40, "END"),
        ]);
        assert_eq!(interp.vars.get("X").unwrap(), Value::num(0.0));
    }

    #[test]
    fn gosub_return_resumes_after_call_site() {
        let mut interp = run_program(&[
            (10, "GOSUB 100"),
            (20, "X=9"),
            (30, "END"),
            (100, "Y=1"),
            (110, "RETURN"),
        ]);
        assert_eq!(interp.vars.get("Y").unwrap(), Value::num(1.0));
        assert_eq!(interp.vars.get("X").unwrap(), Value::num(9.0));
    }

    #[test]
    fn dim_zero_yields_one_element_array() {
        let mut interp = run_program(&[(10, "DIM A(0)"), (20, "A(0)=7"), (30, "END")]);
        assert_eq!(interp.vars.get_indexed("A", 0.0).unwrap(), Value::num(7.0));
    }
}
