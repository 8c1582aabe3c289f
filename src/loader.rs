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

//! Reads a source file into a [`ProgramStore`], entirely before
//! execution begins.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::config::{MAX_LINE_LEN, MAX_LINE_NUMBER, MIN_LINE_NUMBER};
use crate::error::{InterpError, Result};
use crate::program::ProgramStore;

pub fn load_program(path: &Path) -> Result<ProgramStore> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| InterpError::io(format!("{}: {}", path.display(), e)))?;
    let text = raw.strip_prefix('\u{FEFF}').unwrap_or(&raw);

    let mut map: BTreeMap<u32, Rc<str>> = BTreeMap::new();
    for raw_line in text.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (number, body) = parse_source_line(trimmed)?;
        if body.len() > MAX_LINE_LEN {
            return Err(InterpError::exhausted(format!(
                "line {} exceeds maximum length of {} bytes",
                number, MAX_LINE_LEN
            )));
        }
        map.insert(number, Rc::from(body));
    }

    debug!(lines = map.len(), "program loaded");
    ProgramStore::from_map(map)
}

/// Parses `<number> <body>` out of an already-whitespace-trimmed
/// source line. The single separating whitespace character is
/// consumed; the body is kept verbatim afterward.
fn parse_source_line(line: &str) -> Result<(u32, &str)> {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return Err(InterpError::syntax(format!("missing line number: {:?}", line)));
    }
    let number: u32 = line[..digits_end]
        .parse()
        .map_err(|_| InterpError::range(format!("line number out of range: {:?}", line)))?;
    if !(MIN_LINE_NUMBER..=MAX_LINE_NUMBER).contains(&number) {
        return Err(InterpError::range(format!(
            "line number {} out of range [0, {}]",
            number, MAX_LINE_NUMBER
        )));
    }
    let rest = &line[digits_end..];
    let body = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('\t')).unwrap_or(rest);
    Ok((number, body))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_program(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_and_sorts_lines() {
        let f = write_program("20 PRINT \"B\"\n10 PRINT \"A\"\n");
        let p = load_program(f.path()).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.line_at(0).number, 10);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let f = write_program("10 PRINT \"A\"\n\n   \n20 PRINT \"B\"\n");
        let p = load_program(f.path()).unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn strips_bom_on_first_line_only() {
        let f = write_program("\u{FEFF}10 PRINT \"A\"\n20 PRINT \"B\"\n");
        let p = load_program(f.path()).unwrap();
        assert_eq!(&*p.line_at(0).text, "PRINT \"A\"");
    }

    #[test]
    fn rejects_out_of_range_line_number() {
        let f = write_program("70000 PRINT \"A\"\n");
        assert!(load_program(f.path()).is_err());
    }

    #[test]
    fn accepts_boundary_line_numbers() {
        let f = write_program("0 PRINT \"A\"\n65535 PRINT \"B\"\n");
        let p = load_program(f.path()).unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn duplicate_line_number_replaces_prior_text() {
        let f = write_program("10 PRINT \"A\"\n10 PRINT \"B\"\n");
        let p = load_program(f.path()).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(&*p.line_at(0).text, "PRINT \"B\"");
    }

    #[test]
    fn empty_program_loads_with_zero_lines() {
        let f = write_program("");
        let p = load_program(f.path()).unwrap();
        assert!(p.is_empty());
    }
}
