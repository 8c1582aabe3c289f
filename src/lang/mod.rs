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

//! The textual-interpretation core: lexer helpers, the recursive
//! descent expression evaluator, intrinsic functions, and the
//! statement executor. These operate directly on source text through
//! a [`Cursor`] rather than pre-tokenizing lines, so that `FOR`,
//! `GOSUB`, and inline `IF ... THEN` can resume execution mid-line.

pub mod expr;
pub mod intrinsics;
pub mod lexer;
pub mod stmt;

pub use lexer::Cursor;
