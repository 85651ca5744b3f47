use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stepplex_format::{Normalized, ProblemFile, Relation};
use stepplex_solver::{FirstPivot, Pivot, PivotRule, RandomPivot, Session, Status};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod render;

#[derive(Parser)]
#[command(name = "stepplex")]
#[command(about = "Walk the two-phase tableau simplex one pivot at a time", long_about = None)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file to the end
    Solve {
        /// Problem file (.json or plain text)
        file: PathBuf,
        /// Seed for the random pivot choice
        #[arg(long)]
        seed: Option<u64>,
        /// Always take the smallest row, then smallest column
        #[arg(long)]
        first: bool,
        /// Give up after this many pivots
        #[arg(long, default_value_t = 10_000)]
        max_steps: usize,
        /// Print every tableau and the pivot taken
        #[arg(short, long)]
        trace: bool,
        /// Show values as decimals instead of fractions
        #[arg(short, long)]
        decimals: bool,
    },
    /// Walk a problem interactively, choosing pivots and undoing them
    Step {
        /// Problem file (.json or plain text)
        file: PathBuf,
        /// Seed for the suggested pivot
        #[arg(long)]
        seed: Option<u64>,
        /// Show values as decimals instead of fractions
        #[arg(short, long)]
        decimals: bool,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
    /// Rewrite a problem file as JSON
    Convert {
        /// Problem file (.json or plain text)
        file: PathBuf,
        /// Where to write the JSON
        output: PathBuf,
    },
}

enum Input {
    Suggested,
    Pivot(Pivot),
    Undo,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] | ["n"] => Some(Input::Suggested),
        ["u"] => Some(Input::Undo),
        ["q"] => Some(Input::Quit),
        [row, column] => Some(Input::Pivot(Pivot::new(row.parse().ok()?, column.parse().ok()?))),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve { file, seed, first, max_steps, trace, decimals } => {
            let (_, normalized) = load(&file);
            let mut session = start(&normalized);

            let mut rule: Box<dyn PivotRule> = if first {
                Box::new(FirstPivot)
            } else {
                match seed {
                    Some(seed) => Box::new(RandomPivot::seeded(seed)),
                    None => Box::new(RandomPivot::from_entropy()),
                }
            };

            for _ in 0..max_steps {
                if session.is_finished() {
                    break;
                }
                let Some(pivot) = session.suggest(rule.as_mut()) else {
                    break;
                };
                if trace {
                    println!("{}", session.phase().label());
                    println!("{}", render::tableau(session.tableau(), decimals));
                    println!("Pivot: ({}, {})", pivot.row, pivot.column);
                    println!();
                }
                if let Err(e) = session.step(pivot) {
                    eprintln!("Solver error: {}", e);
                    std::process::exit(1);
                }
            }

            if !session.is_finished() {
                eprintln!("Stopped after {} steps without reaching an answer", max_steps);
                std::process::exit(1);
            }
            if trace {
                println!("{}", session.phase().label());
                println!("{}", render::tableau(session.tableau(), decimals));
                println!();
            }
            match report(&mut io::stdout().lock(), &session, &normalized, decimals) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Step { file, seed, decimals } => {
            let (_, normalized) = load(&file);
            let mut session = start(&normalized);
            let mut rule = match seed {
                Some(seed) => RandomPivot::seeded(seed),
                None => RandomPivot::from_entropy(),
            };
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let result = walk(
                &mut session,
                &normalized,
                &mut rule,
                decimals,
                stdin.lock(),
                &mut stdout,
            );
            if let Err(e) = result {
                eprintln!("Error in interactive session: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let (problem, normalized) = load(&file);
            let count = |relation| {
                problem
                    .constraints
                    .iter()
                    .filter(|c| c.relation == relation)
                    .count()
            };

            println!("✓ {} is valid", file.display());
            println!("  {} variables", problem.num_variables());
            println!("  {} constraints", problem.constraints.len());
            println!("    {} with =", count(Relation::Eq));
            println!("    {} with <=", count(Relation::Le));
            println!("    {} with >=", count(Relation::Ge));
            println!("  {} slack/surplus columns added", normalized.added.len());
            println!("  sense: {:?}", problem.minmax);
        }
        Commands::Convert { file, output } => {
            let (problem, _) = load(&file);
            if let Err(e) = problem.save_json(&output) {
                eprintln!("Error writing file: {}", e);
                std::process::exit(1);
            }
            println!("Wrote {}", output.display());
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }
}

fn load(file: &Path) -> (ProblemFile, Normalized) {
    let problem = match ProblemFile::load(file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading problem: {}", e);
            std::process::exit(1);
        }
    };
    match problem.to_lp() {
        Ok(normalized) => (problem, normalized),
        Err(e) => {
            eprintln!("Error in problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn start(normalized: &Normalized) -> Session {
    match Session::new(&normalized.problem) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Solver error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Write the outcome of a finished session. False unless optimal.
fn report<W: Write>(
    out: &mut W,
    session: &Session,
    normalized: &Normalized,
    decimals: bool,
) -> io::Result<bool> {
    match session.solution() {
        Ok(solution) => {
            writeln!(out, "Status: OPTIMAL")?;
            writeln!(
                out,
                "x* = {}",
                render::vector(&normalized.project(&solution), decimals)
            )?;
            writeln!(out, "F = {}", render::value(&solution.objective, decimals))?;
            Ok(true)
        }
        Err(e) => {
            match session.status() {
                Status::Infeasible => writeln!(out, "Status: INFEASIBLE")?,
                Status::Unbounded => writeln!(out, "Status: UNBOUNDED")?,
                _ => writeln!(out, "Status: UNFINISHED")?,
            }
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

/// Interactive walk: read one command per line from `input` until `q` or
/// end of input.
fn walk<P: PivotRule, R: BufRead, W: Write>(
    session: &mut Session,
    normalized: &Normalized,
    rule: &mut P,
    decimals: bool,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        writeln!(out, "{}", session.phase().label())?;
        writeln!(out, "{}", render::tableau(session.tableau(), decimals))?;

        let suggestion = session.suggest(rule);
        if session.is_finished() {
            report(out, session, normalized, decimals)?;
            writeln!(out, "u: undo, q: quit")?;
        } else {
            writeln!(out, "Candidates: {}", render::pivots(session.candidates()))?;
            if let Some(p) = suggestion {
                writeln!(out, "Suggested: ({}, {})", p.row, p.column)?;
            }
            writeln!(out, "ROW COL: pivot, n or enter: suggested, u: undo, q: quit")?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let result = match parse_input(&line) {
            Some(Input::Quit) => break,
            Some(Input::Undo) => session.undo().map(|_| session.status()),
            Some(Input::Suggested) => match suggestion {
                Some(pivot) => session.step(pivot),
                None => Ok(session.status()),
            },
            Some(Input::Pivot(pivot)) => session.step(pivot),
            None => {
                writeln!(out, "Unrecognized input: {}", line.trim())?;
                continue;
            }
        };
        if let Err(e) = result {
            writeln!(out, "{}", e)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
