use clap::Parser;
use cmast::{
    prelude::{Session, Tree},
    session::{is_binding, statements},
};
use owo_colors::OwoColorize;
use std::{
    io::{self, Write},
    process::ExitCode,
};

/// A complex-valued calculator with variables and user-defined functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the tree each statement builds before evaluating it.
    #[arg(short, long)]
    dump_tree: bool,

    /// Show the tokens that failed to parse alongside syntax errors.
    #[arg(short, long)]
    verbose: bool,

    /// Statements to evaluate, separated by `;`. Starts an interactive
    /// session when omitted.
    input: Option<String>,
}

fn main() -> Result<ExitCode, io::Error> {
    let args = Args::parse();
    let mut session = Session::new().with_diagnostics(args.verbose);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    if let Some(input) = &args.input {
        let ok = run(&mut stdout, &mut stderr, &mut session, input, &args, true)?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    loop {
        write!(stdout, "{} ", ">".green())?;
        stdout.flush()?;

        let Some(Ok(input)) = io::stdin().lines().next() else {
            writeln!(stdout, "{}", "exiting...".yellow())?;
            return Ok(ExitCode::SUCCESS);
        };
        match input.trim() {
            "" => continue,
            "exit" => return Ok(ExitCode::SUCCESS),
            _ => {}
        }

        run(&mut stdout, &mut stderr, &mut session, &input, &args, false)?;
    }
}

///
/// Run every statement of `input`, returning whether all of them succeeded.
///
/// Values go to `out` and errors to `err_out`. Batch runs do not echo the
/// values of assignments.
///
fn run(
    out: &mut impl Write,
    err_out: &mut impl Write,
    session: &mut Session,
    input: &str,
    args: &Args,
    batch: bool,
) -> Result<bool, io::Error> {
    let mut ok = true;

    for statement in statements(input).filter(|s| !s.trim().is_empty()) {
        if args.dump_tree && !is_binding(statement) {
            if let Ok(tree) = session.parse(statement) {
                write!(out, "{}", Tree(&*tree).dimmed())?;
            }
        }

        match session.process(statement) {
            Ok(Some(value)) if !(batch && is_binding(statement)) => {
                writeln!(out, "{} {}", "=".green(), value.bold())?;
            }
            Ok(_) => {}
            Err(err) => {
                ok = false;
                writeln!(err_out, "{}", err.red())?;
            }
        }
    }

    Ok(ok)
}
