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

//! The driver: owns all interpreter state and runs the statement
//! loop described in `DESIGN.md`'s cursor-into-line resumption note.

use std::io::Write;

use tracing::{debug, trace};

use crate::config::PRINT_WIDTH;
use crate::control::{ForStack, GosubStack};
use crate::error::{InterpError, Result};
use crate::lang::stmt::{self, Flow};
use crate::lang::Cursor;
use crate::num::Rng;
use crate::program::ProgramStore;
use crate::vars::VariableStore;

pub struct Interpreter {
    pub program: ProgramStore,
    pub vars: VariableStore,
    pub gosub: GosubStack,
    pub for_stack: ForStack,
    pub print_col: usize,
    pub rng: Rng,
    /// Index of the line currently being executed; `GOSUB` and `FOR`
    /// read this to record their resume position.
    pub current_line_index: usize,
    halted: bool,
}

impl Interpreter {
    pub fn new(program: ProgramStore) -> Self {
        Self {
            program,
            vars: VariableStore::new(),
            gosub: GosubStack::new(),
            for_stack: ForStack::new(),
            print_col: 0,
            rng: Rng::new(),
            current_line_index: 0,
            halted: false,
        }
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Writes `s` to stdout, keeping `print_col` in `[0, PRINT_WIDTH)`
    /// by wrapping with a newline when it would overflow.
    pub fn emit(&mut self, s: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for c in s.chars() {
            if c == '\n' {
                out.write_all(b"\n").map_err(|e| InterpError::io(e.to_string()))?;
                self.print_col = 0;
                continue;
            }
            if self.print_col >= PRINT_WIDTH {
                out.write_all(b"\n").map_err(|e| InterpError::io(e.to_string()))?;
                self.print_col = 0;
            }
            let mut buf = [0u8; 4];
            out.write_all(c.encode_utf8(&mut buf).as_bytes())
                .map_err(|e| InterpError::io(e.to_string()))?;
            self.print_col += 1;
        }
        Ok(())
    }

    pub fn newline(&mut self) -> Result<()> {
        std::io::stdout()
            .write_all(b"\n")
            .map_err(|e| InterpError::io(e.to_string()))?;
        self.print_col = 0;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush().map_err(|e| InterpError::io(e.to_string()))
    }

    /// Runs the program to completion. Returns the line number active
    /// when a runtime error occurred, if any, paired with the error.
    pub fn run(&mut self) -> std::result::Result<(), (Option<u32>, InterpError)> {
        let mut cur_line = 0usize;
        let mut pos = 0usize;

        while cur_line < self.program.len() && !self.halted {
            let line = self.program.line_at(cur_line).clone();
            let mut cursor = Cursor::new(&line.text, pos);
            cursor.skip_spaces();

            if cursor.at_end() {
                cur_line += 1;
                pos = 0;
                continue;
            }

            trace!(line = line.number, offset = cursor.pos(), "dispatch");
            self.current_line_index = cur_line;

            match stmt::execute(self, &mut cursor) {
                Ok(Flow::Halt) => {
                    self.halted = true;
                }
                Ok(Flow::Goto(target)) => {
                    debug!(from = line.number, to_index = target.line, "control transfer");
                    cur_line = target.line;
                    pos = target.offset;
                }
                Ok(Flow::Next) => {
                    cursor.skip_spaces();
                    if cursor.at_end() {
                        cur_line += 1;
                        pos = 0;
                    } else if cursor.eat(':') {
                        cursor.skip_spaces();
                        pos = cursor.pos();
                    } else {
                        return Err((
                            Some(line.number),
                            InterpError::syntax("expected ':' or end of line"),
                        ));
                    }
                }
                Err(e) => return Err((Some(line.number), e)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn interp(lines: &[(u32, &str)]) -> Interpreter {
        let map: BTreeMap<u32, Rc<str>> =
            lines.iter().map(|(n, t)| (*n, Rc::from(*t))).collect();
        Interpreter::new(ProgramStore::from_map(map).unwrap())
    }

    #[test]
    fn empty_program_halts_immediately() {
        let mut i = interp(&[]);
        assert!(i.run().is_ok());
    }

    #[test]
    fn end_statement_halts() {
        let mut i = interp(&[(10, "END")]);
        assert!(i.run().is_ok());
    }
}
