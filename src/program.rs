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

//! The loaded program: a sorted table of numbered lines with
//! binary-search lookup and a one-entry cache for the common case of
//! a tight loop jumping to the same target repeatedly.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::MAX_LINES;
use crate::error::{InterpError, Result};

#[derive(Clone, Debug)]
pub struct Line {
    pub number: u32,
    pub text: Rc<str>,
}

pub struct ProgramStore {
    lines: Vec<Line>,
    cache: Cell<Option<(u32, usize)>>,
}

impl ProgramStore {
    /// Builds a program from a map of line number to body text. A
    /// `BTreeMap` gives us sorted-ascending, duplicate-replacing
    /// (last write wins) semantics for free.
    pub fn from_map(map: BTreeMap<u32, Rc<str>>) -> Result<Self> {
        if map.len() > MAX_LINES {
            return Err(InterpError::exhausted("program has too many lines"));
        }
        let lines = map
            .into_iter()
            .map(|(number, text)| Line { number, text })
            .collect();
        Ok(Self { lines, cache: Cell::new(None) })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_at(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Finds the index of the line numbered `number`, consulting and
    /// refreshing the one-slot cache.
    pub fn find_index(&self, number: u32) -> Result<usize> {
        if let Some((n, idx)) = self.cache.get() {
            if n == number {
                return Ok(idx);
            }
        }
        let idx = self
            .lines
            .binary_search_by_key(&number, |l| l.number)
            .map_err(|_| InterpError::BadLineRef)?;
        self.cache.set(Some((number, idx)));
        Ok(idx)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn store(pairs: &[(u32, &str)]) -> ProgramStore {
        let map = pairs.iter().map(|(n, t)| (*n, Rc::from(*t))).collect();
        ProgramStore::from_map(map).unwrap()
    }

    #[test]
    fn sorted_and_deduplicated() {
        let s = store(&[(30, "c"), (10, "a"), (20, "b")]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.line_at(0).number, 10);
        assert_eq!(s.line_at(2).number, 30);
    }

    #[test]
    fn duplicate_line_number_replaces() {
        let mut map: BTreeMap<u32, Rc<str>> = BTreeMap::new();
        map.insert(10, Rc::from("first"));
        map.insert(10, Rc::from("second"));
        let s = ProgramStore::from_map(map).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(&*s.line_at(0).text, "second");
    }

    #[test]
    fn find_index_uses_cache_and_binary_search() {
        let s = store(&[(10, "a"), (20, "b"), (30, "c")]);
        assert_eq!(s.find_index(20).unwrap(), 1);
        assert_eq!(s.find_index(20).unwrap(), 1);
        assert!(s.find_index(99).is_err());
    }

    #[test]
    fn too_many_lines_is_resource_exhausted() {
        let map: BTreeMap<u32, Rc<str>> =
            (0..=(MAX_LINES as u32)).map(|n| (n, Rc::from(""))).collect();
        assert!(ProgramStore::from_map(map).is_err());
    }
}
