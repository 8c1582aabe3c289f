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

//! The variable store: a flat, linearly-scanned table keyed by the
//! two-letter name convention. Deliberately not a `HashMap` — at this
//! scale (at most [`MAX_VARS`] entries) a linear scan is both simpler
//! and no slower than hashing.

use crate::config::{DEFAULT_ARRAY_SIZE, MAX_VARS};
use crate::error::{InterpError, Result};
use crate::num::trunc_index;
use crate::value::Value;

/// The two-byte uppercase key plus string flag that identifies a
/// variable bucket, per the historical dialect's two-letter naming.
pub type Key = (u8, u8, bool);

/// Derives a variable's key from its source name: the first two
/// alphanumeric characters, uppercased, space-padded if the name is
/// one character long; a trailing `$` sets the string flag and is not
/// itself part of the key.
pub fn key_of(name: &str) -> Key {
    let (body, is_string) = match name.strip_suffix('$') {
        Some(b) => (b, true),
        None => (name, false),
    };
    let mut chars = body.chars();
    let c1 = chars.next().map(|c| c.to_ascii_uppercase() as u8).unwrap_or(b' ');
    let c2 = chars.next().map(|c| c.to_ascii_uppercase() as u8).unwrap_or(b' ');
    (c1, c2, is_string)
}

enum Slot {
    Scalar(Value),
    Array(Vec<Value>),
}

struct Var {
    key: Key,
    slot: Slot,
}

#[derive(Default)]
pub struct VariableStore {
    vars: Vec<Var>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    fn find(&self, key: Key) -> Option<usize> {
        self.vars.iter().position(|v| v.key == key)
    }

    fn find_or_create(&mut self, key: Key) -> Result<usize> {
        if let Some(idx) = self.find(key) {
            return Ok(idx);
        }
        if self.vars.len() >= MAX_VARS {
            return Err(InterpError::exhausted("too many variables"));
        }
        let zero = if key.2 { Value::str("") } else { Value::num(0.0) };
        self.vars.push(Var { key, slot: Slot::Scalar(zero) });
        Ok(self.vars.len() - 1)
    }

    pub fn get_by_key(&mut self, key: Key) -> Result<Value> {
        let idx = self.find_or_create(key)?;
        match &self.vars[idx].slot {
            Slot::Scalar(v) => Ok(v.clone()),
            Slot::Array(_) => Err(InterpError::TypeMismatch),
        }
    }

    pub fn set_by_key(&mut self, key: Key, value: Value) -> Result<()> {
        let idx = self.find_or_create(key)?;
        match &mut self.vars[idx].slot {
            Slot::Scalar(v) => {
                *v = value;
                Ok(())
            }
            Slot::Array(_) => Err(InterpError::TypeMismatch),
        }
    }

    pub fn get(&mut self, name: &str) -> Result<Value> {
        let idx = self.find_or_create(key_of(name))?;
        match &self.vars[idx].slot {
            Slot::Scalar(v) => Ok(v.clone()),
            Slot::Array(_) => Err(InterpError::TypeMismatch),
        }
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let key = key_of(name);
        if value.is_string() != key.2 {
            return Err(InterpError::TypeMismatch);
        }
        let idx = self.find_or_create(key)?;
        match &mut self.vars[idx].slot {
            Slot::Scalar(v) => {
                *v = value;
                Ok(())
            }
            Slot::Array(_) => Err(InterpError::TypeMismatch),
        }
    }

    /// Allocates (or re-allocates) an array via `DIM`, sized to hold
    /// indices `0..=size`.
    pub fn dim(&mut self, name: &str, size: usize) -> Result<()> {
        let key = key_of(name);
        let idx = self.find_or_create(key)?;
        let fill = if key.2 { Value::str("") } else { Value::num(0.0) };
        self.vars[idx].slot = Slot::Array(vec![fill; size + 1]);
        Ok(())
    }

    fn array_slot(&mut self, key: Key) -> Result<&mut Vec<Value>> {
        let idx = self.find_or_create(key)?;
        let fill = if key.2 { Value::str("") } else { Value::num(0.0) };
        if matches!(self.vars[idx].slot, Slot::Scalar(_)) {
            self.vars[idx].slot = Slot::Array(vec![fill; DEFAULT_ARRAY_SIZE]);
        }
        match &mut self.vars[idx].slot {
            Slot::Array(a) => Ok(a),
            Slot::Scalar(_) => unreachable!(),
        }
    }

    pub fn get_indexed(&mut self, name: &str, index: f64) -> Result<Value> {
        if index < 0.0 {
            return Err(InterpError::range("negative array index"));
        }
        let i = trunc_index(index);
        let array = self.array_slot(key_of(name))?;
        let i = i as usize;
        if i >= array.len() {
            let fill = if key_of(name).2 { Value::str("") } else { Value::num(0.0) };
            Ok(fill)
        } else {
            Ok(array[i].clone())
        }
    }

    pub fn set_indexed(&mut self, name: &str, index: f64, value: Value) -> Result<()> {
        let key = key_of(name);
        if value.is_string() != key.2 {
            return Err(InterpError::TypeMismatch);
        }
        if index < 0.0 {
            return Err(InterpError::range("negative array index"));
        }
        let i = trunc_index(index);
        let i = i as usize;
        let array = self.array_slot(key)?;
        if i >= array.len() {
            let fill = if key.2 { Value::str("") } else { Value::num(0.0) };
            array.resize(i + 1, fill);
        }
        array[i] = value;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn two_letter_aliasing() {
        assert_eq!(key_of("ABCD"), key_of("ABEF"));
        assert_ne!(key_of("AB"), key_of("AC"));
    }

    #[test]
    fn one_letter_name_pads_with_space() {
        assert_eq!(key_of("A"), (b'A', b' ', false));
    }

    #[test]
    fn string_flag_from_dollar_suffix() {
        assert_eq!(key_of("A$"), (b'A', b' ', true));
    }

    #[test]
    fn scalar_roundtrip() {
        let mut v = VariableStore::new();
        v.set("X", Value::num(5.0)).unwrap();
        assert_eq!(v.get("X").unwrap(), Value::num(5.0));
    }

    #[test]
    fn type_mismatch_on_wrong_flag() {
        let mut v = VariableStore::new();
        assert!(v.set("X", Value::str("oops")).is_err());
    }

    #[test]
    fn array_grows_on_out_of_bounds_write() {
        let mut v = VariableStore::new();
        v.set_indexed("A", 15.0, Value::num(1.0)).unwrap();
        assert_eq!(v.get_indexed("A", 15.0).unwrap(), Value::num(1.0));
        assert_eq!(v.get_indexed("A", 3.0).unwrap(), Value::num(0.0));
    }

    #[test]
    fn array_access_promotes_scalar() {
        let mut v = VariableStore::new();
        v.set("A", Value::num(9.0)).unwrap();
        v.set_indexed("A", 0.0, Value::num(1.0)).unwrap();
        assert_eq!(v.get_indexed("A", 0.0).unwrap(), Value::num(1.0));
    }

    #[test]
    fn negative_index_is_range_error() {
        let mut v = VariableStore::new();
        assert!(v.get_indexed("A", -1.0).is_err());
    }
}
