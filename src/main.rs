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

mod config;
mod control;
mod error;
mod interpreter;
mod lang;
mod loader;
mod num;
mod program;
mod value;
mod vars;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use interpreter::Interpreter;

/// A line-numbered BASIC interpreter.
#[derive(Parser, Debug)]
#[command(name = "interp", version, about)]
struct Args {
    /// Path to the `.bas` program to run.
    program: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let program = match loader::load_program(&args.program) {
        Ok(p) => p,
        Err(e) => {
            report(None, &e);
            return ExitCode::FAILURE;
        }
    };

    let mut interp = Interpreter::new(program);
    match interp.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err((line, e)) => {
            report(line, &e);
            ExitCode::FAILURE
        }
    }
}

fn report(line: Option<u32>, e: &error::InterpError) {
    let message = match line {
        Some(n) => format!("Error at line {}: {}", n, e),
        None => format!("Error: {}", e),
    };
    eprintln!("{}", message.red());
}

