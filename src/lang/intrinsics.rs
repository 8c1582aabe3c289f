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

//! Intrinsic function dispatch: math, string, and the print-cursor
//! introspection functions (`TAB`, `POS`, `FRE`).
//!
//! Dispatch is entered with the cursor positioned just past the
//! opening `(`; every arm is responsible for consuming its own
//! trailing `)`.

use crate::config::{FRE_BYTES, PRINT_WIDTH};
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::lang::Cursor;
use crate::num::{format_number, parse_lenient, trunc_index};
use crate::value::Value;

use super::expr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Atn,
    Abs,
    Int,
    Sqr,
    Sgn,
    Exp,
    Log,
    Rnd,
    Len,
    Val,
    StrD,
    ChrD,
    Asc,
    Not,
    Fre,
    Pos,
    Tab,
    LeftD,
    RightD,
    MidD,
    Instr,
}

/// Recognizes an intrinsic function by name (case-insensitive, `$`
/// significant). Returns `None` for anything else, which the caller
/// treats as an array variable reference instead.
pub fn lookup(name: &str) -> Option<Func> {
    use Func::*;
    let upper = name.to_ascii_uppercase();
    Some(match upper.as_str() {
        "SIN" => Sin,
        "COS" => Cos,
        "TAN" => Tan,
        "ATN" => Atn,
        "ABS" => Abs,
        "INT" => Int,
        "SQR" => Sqr,
        "SGN" => Sgn,
        "EXP" => Exp,
        "LOG" => Log,
        "RND" => Rnd,
        "LEN" => Len,
        "VAL" => Val,
        "STR$" => StrD,
        "CHR$" => ChrD,
        "ASC" => Asc,
        "NOT" => Not,
        "FRE" => Fre,
        "POS" => Pos,
        "TAB" => Tab,
        "LEFT$" => LeftD,
        "RIGHT$" => RightD,
        "MID$" => MidD,
        "INSTR" => Instr,
        _ => return None,
    })
}

fn close_paren(cursor: &mut Cursor<'_>) -> Result<()> {
    cursor.skip_spaces();
    cursor.expect(')', "')'")
}

fn next_arg(interp: &mut Interpreter, cursor: &mut Cursor<'_>) -> Result<Value> {
    cursor.skip_spaces();
    cursor.expect(',', "','")?;
    expr::eval(interp, cursor)
}

pub fn dispatch(interp: &mut Interpreter, func: Func, cursor: &mut Cursor<'_>) -> Result<Value> {
    use Func::*;

    match func {
        Sin | Cos | Tan | Atn | Abs | Int | Sqr | Sgn | Exp | Log | Rnd => {
            let arg = expr::eval(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            Ok(Value::num(match func {
                Sin => arg.sin(),
                Cos => arg.cos(),
                Tan => arg.tan(),
                Atn => arg.atan(),
                Abs => arg.abs(),
                Int => arg.floor(),
                Sqr => arg.sqrt(),
                Sgn => {
                    if arg > 0.0 {
                        1.0
                    } else if arg < 0.0 {
                        -1.0
                    } else {
                        0.0
                    }
                }
                Exp => arg.exp(),
                Log => arg.ln(),
                Rnd => {
                    if arg < 0.0 {
                        interp.rng.reseed(trunc_index(-arg) as u64);
                    }
                    interp.rng.next()
                }
                _ => unreachable!(),
            }))
        }

        Len => {
            let arg = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            Ok(Value::num(arg.as_str()?.len() as f64))
        }

        Val => {
            let arg = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            Ok(Value::num(parse_lenient(arg.as_str()?)))
        }

        StrD => {
            let arg = expr::eval(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            Ok(Value::str(format_number(arg)))
        }

        ChrD => {
            let arg = expr::eval(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            let byte = (trunc_index(arg) & 0xff) as u8;
            Ok(Value::str((byte as char).to_string()))
        }

        Asc => {
            let arg = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            let s = arg.as_str()?;
            Ok(Value::num(s.bytes().next().unwrap_or(0) as f64))
        }

        Not => {
            let arg = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            arg.op_not()
        }

        Fre => {
            let _ = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            Ok(Value::num(FRE_BYTES))
        }

        Pos => {
            let _ = expr::eval(interp, cursor)?;
            close_paren(cursor)?;
            Ok(Value::num((interp.print_col + 1) as f64))
        }

        Tab => {
            let arg = expr::eval(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            let width = PRINT_WIDTH as i64;
            let mut target = trunc_index(arg) % width;
            if target < 0 {
                target += width;
            }
            if (target as usize) < interp.print_col {
                interp.newline()?;
            }
            let pad = target as usize - interp.print_col;
            if pad > 0 {
                interp.emit(&" ".repeat(pad))?;
            }
            Ok(Value::str(""))
        }

        LeftD => {
            let s = expr::eval(interp, cursor)?;
            let s = s.as_str()?.to_string();
            let n = next_arg(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            let n = (trunc_index(n).max(0) as usize).min(s.chars().count());
            Ok(Value::str(s.chars().take(n).collect::<String>()))
        }

        RightD => {
            let s = expr::eval(interp, cursor)?;
            let s = s.as_str()?.to_string();
            let n = next_arg(interp, cursor)?.as_num()?;
            close_paren(cursor)?;
            let total = s.chars().count();
            let n = (trunc_index(n).max(0) as usize).min(total);
            Ok(Value::str(s.chars().skip(total - n).collect::<String>()))
        }

        MidD => {
            let s = expr::eval(interp, cursor)?;
            let s = s.as_str()?.to_string();
            let start = next_arg(interp, cursor)?.as_num()?;
            cursor.skip_spaces();
            let len = if cursor.peek() == Some(',') {
                cursor.advance();
                Some(expr::eval(interp, cursor)?.as_num()?)
            } else {
                None
            };
            close_paren(cursor)?;

            let chars: Vec<char> = s.chars().collect();
            let total = chars.len();
            let mut start = trunc_index(start);
            if start < 1 {
                start = 1;
            }
            let start = (start - 1) as usize;
            if start >= total {
                return Ok(Value::str(""));
            }
            let mut len = match len {
                Some(l) => trunc_index(l).max(0) as usize,
                None => total,
            };
            if start + len > total {
                len = total - start;
            }
            Ok(Value::str(chars[start..start + len].iter().collect::<String>()))
        }

        Instr => {
            let haystack = expr::eval(interp, cursor)?;
            let haystack = haystack.as_str()?.to_string();
            let needle = next_arg(interp, cursor)?;
            let needle = needle.as_str()?.to_string();
            close_paren(cursor)?;
            match haystack.find(&needle) {
                Some(byte_idx) => {
                    let char_idx = haystack[..byte_idx].chars().count();
                    Ok(Value::num((char_idx + 1) as f64))
                }
                None => Ok(Value::num(0.0)),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::program::ProgramStore;
    use std::collections::BTreeMap;

    fn eval_str(src: &str) -> Value {
        let mut interp = Interpreter::new(ProgramStore::from_map(BTreeMap::new()).unwrap());
        let mut cursor = Cursor::new(src, 0);
        expr::eval(&mut interp, &mut cursor).unwrap()
    }

    #[test]
    fn left_right_mid_instr() {
        assert_eq!(eval_str("LEFT$(\"HELLO\",2)"), Value::str("HE"));
        assert_eq!(eval_str("RIGHT$(\"HELLO\",2)"), Value::str("LO"));
        assert_eq!(eval_str("MID$(\"HELLO\",2,2)"), Value::str("EL"));
        assert_eq!(eval_str("MID$(\"HELLO\",2)"), Value::str("ELLO"));
        assert_eq!(eval_str("INSTR(\"HELLO\",\"LL\")"), Value::num(3.0));
        assert_eq!(eval_str("INSTR(\"HELLO\",\"Z\")"), Value::num(0.0));
    }

    #[test]
    fn left_right_clamp_to_string_length() {
        assert_eq!(eval_str("LEFT$(\"HI\",99)"), Value::str("HI"));
        assert_eq!(eval_str("RIGHT$(\"HI\",99)"), Value::str("HI"));
    }

    #[test]
    fn str_and_val_round_trip() {
        assert_eq!(eval_str("VAL(STR$(42))"), Value::num(42.0));
    }

    #[test]
    fn chr_and_asc_round_trip() {
        assert_eq!(eval_str("ASC(CHR$(65))"), Value::num(65.0));
    }

    #[test]
    fn not_is_bitwise_complement() {
        assert_eq!(eval_str("NOT(0)"), Value::num(-1.0));
    }

    #[test]
    fn sgn_abs_int() {
        assert_eq!(eval_str("SGN(-5)"), Value::num(-1.0));
        assert_eq!(eval_str("ABS(-5)"), Value::num(5.0));
        assert_eq!(eval_str("INT(3.9)"), Value::num(3.0));
    }
}
