use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use hashmatch::algorithm::AlgorithmSelection;
use hashmatch::engine::{ComparisonEngine, ComparisonOutcome};
use hashmatch::report::{self, Reporter};
use hashmatch::validate;

/// Compare cryptographic digests of files against each other or an
/// expected digest
#[derive(Parser)]
#[command(name = "hashmatch", version)]
struct Cli {
    /// Files to compare (two or more, or one with --expected)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Hash algorithms to run; "all" expands to the full set strongest-first
    #[arg(short, long, value_enum, value_delimiter = ',')]
    algorithms: Option<Vec<AlgorithmSelection>>,

    /// Expected hex digest; the algorithm is inferred from its length
    #[arg(short, long)]
    expected: Option<String>,

    /// Suppress per-file digest rows, print only the verdict
    #[arg(short, long)]
    quiet: bool,

    /// Stop after the first algorithm whose digests match
    #[arg(short, long)]
    fast: bool,

    /// Render the outcome as JSON instead of the table and verdict
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(outcome) if outcome.matched => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ComparisonOutcome> {
    let config = validate::validate(
        cli.files,
        cli.algorithms,
        cli.expected,
        cli.quiet || cli.json,
        cli.fast,
    )?;

    let mut reporter = Reporter::new(config.quiet);
    let mut engine = ComparisonEngine::new(config);
    let outcome = engine.run(&mut reporter)?;

    if cli.json {
        println!("{}", report::to_json(&outcome, engine.entries())?);
    } else {
        reporter.verdict(&outcome);
    }

    Ok(outcome)
}
