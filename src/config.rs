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

//! Compile-time capacity and formatting constants shared across the
//! interpreter. Kept in one place so the bounds in the error taxonomy
//! (`ResourceExhausted`, `StackOverflow`) and the loader's validation
//! all agree on the same numbers.

/// Maximum number of distinct line numbers a program may contain.
pub const MAX_LINES: usize = 1024;

/// Maximum length, in bytes, of a single source line's body.
pub const MAX_LINE_LEN: usize = 256;

/// Maximum number of distinct variable buckets.
pub const MAX_VARS: usize = 128;

/// Maximum depth of the `GOSUB` return stack.
pub const MAX_GOSUB: usize = 64;

/// Maximum depth of the `FOR` loop stack.
pub const MAX_FOR: usize = 32;

/// Maximum length, in bytes, of any runtime string value.
pub const MAX_STR_LEN: usize = 255;

/// Column width used by `PRINT`'s comma tab stops and `TAB()`'s modulo.
pub const PRINT_WIDTH: usize = 80;

/// Initial capacity given to an array created by indexing alone
/// (without an explicit `DIM`).
pub const DEFAULT_ARRAY_SIZE: usize = 11;

/// Smallest line number accepted by the loader.
pub const MIN_LINE_NUMBER: u32 = 0;

/// Largest line number accepted by the loader.
pub const MAX_LINE_NUMBER: u32 = 65535;

/// Width of the `,` tab-stop zone used by `PRINT`.
pub const PRINT_ZONE: usize = 10;

/// Constant returned by `FRE(x)`; historical BASICs reported a
/// plausible free-memory figure rather than a real measurement.
pub const FRE_BYTES: f64 = 32768.0;
