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

//! End-to-end tests driving the built binary against fixture programs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn program(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::with_suffix(".bas").unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn run(contents: &str) -> assert_cmd::assert::Assert {
    let f = program(contents);
    Command::cargo_bin("interp")
        .unwrap()
        .arg(f.path())
        .assert()
}

#[test]
fn classic_counter() {
    run("10 FOR I=1 TO 3\n20 PRINT I\n30 NEXT I\n40 END\n")
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn gosub_with_trailing_statement() {
    run("10 GOSUB 100 : PRINT \"B\"\n20 END\n100 PRINT \"A\"\n110 RETURN\n")
        .success()
        .stdout("A\nB\n");
}

#[test]
fn truthiness_of_comparison() {
    run("10 A = (3 < 5)\n20 PRINT A\n30 IF A THEN PRINT \"Y\"\n")
        .success()
        .stdout("-1\nY\n");
}

#[test]
fn string_ops() {
    run("10 A$=\"HELLO\"\n20 PRINT LEFT$(A$,2);RIGHT$(A$,2);MID$(A$,2,2)\n30 PRINT INSTR(A$,\"LL\")\n")
        .success()
        .stdout("HELOEL\n3\n");
}

#[test]
fn two_letter_name_aliasing() {
    run("10 ABCD=5\n20 ABEF=7\n30 PRINT ABCD, ABEF\n")
        .success()
        .stdout("7         7\n");
}

#[test]
fn tab_wrap() {
    run("10 PRINT \"X\"; TAB(5); \"Y\"\n").success().stdout("X    Y\n");
}

#[test]
fn cli_exit_code_contract_success() {
    run("10 FOR I=1 TO 3\n20 PRINT I\n30 NEXT I\n40 END\n").success();
}

#[test]
fn cli_exit_code_contract_load_error() {
    run("70000 PRINT \"A\"\n")
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn runtime_error_reports_line_number() {
    run("10 RETURN\n")
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error at line 10"));
}

#[test]
fn empty_program_exits_zero_with_no_output() {
    run("").success().stdout("");
}

#[test]
fn missing_file_is_a_load_error() {
    Command::cargo_bin("interp")
        .unwrap()
        .arg("/nonexistent/path/to/program.bas")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn negative_step_loop_runs_zero_times() {
    run("10 FOR I=1 TO 3 STEP -1\n20 PRINT I\n30 NEXT I\n40 PRINT \"DONE\"\n")
        .success()
        .stdout("DONE\n");
}

#[test]
fn if_false_suppresses_both_statements() {
    run("10 IF 0 THEN PRINT \"a\" : PRINT \"b\"\n20 PRINT \"C\"\n")
        .success()
        .stdout("C\n");
}

#[test]
fn dim_zero_allows_single_element() {
    run("10 DIM A(0)\n20 A(0)=9\n30 PRINT A(0)\n").success().stdout("9\n");
}

#[test]
fn val_str_round_trip() {
    run("10 PRINT VAL(STR$(3.5))\n").success().stdout("3.5\n");
}

#[test]
fn str_variable_type_mismatch_is_fatal() {
    run("10 A$=5\n").failure().code(1);
}
