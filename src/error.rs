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

//! The interpreter's error taxonomy.
//!
//! Every error is fatal: the driver catches it once, reports it, and
//! stops. There is no in-language recovery, so the variant names exist
//! for tests and diagnostics rather than for branching logic.

use thiserror::Error;

/// A single interpreter-wide result alias.
pub type Result<T> = std::result::Result<T, InterpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("type mismatch")]
    TypeMismatch,

    #[error("{0}")]
    SyntaxError(String),

    #[error("stack overflow")]
    StackOverflow,

    #[error("{0}")]
    StackUnderflow(String),

    #[error("undefined line number")]
    BadLineRef,

    #[error("{0}")]
    RangeError(String),

    #[error("{0}")]
    ResourceExhausted(String),

    #[error("{0}")]
    IOError(String),
}

impl InterpError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::SyntaxError(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }

    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::IOError(msg.into())
    }

    pub fn underflow(msg: impl Into<String>) -> Self {
        Self::StackUnderflow(msg.into())
    }
}
