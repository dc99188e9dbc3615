//! src/main.rs
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use wordcount::configuration::{MissingSeparatorPolicy, get_configuration};
use wordcount::stage::{StageOptions, run_mapper, run_reducer};
use wordcount::telemetry::init_tracing;

/// Word count as two streaming stages. Sort the mapper's output by key
/// (e.g. `LC_ALL=C sort`) before handing it to the reducer.
#[derive(Parser, Debug)]
#[command(name = "wordcount", version, about)]
struct Cli {
    /// Read from this file instead of stdin.
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Write to this file instead of stdout.
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    stage: Stage,
}

#[derive(Subcommand, Debug)]
enum Stage {
    /// Emit `word<TAB>1` for every word of the input text.
    Map,
    /// Sum `key<TAB>count` records that arrive sorted by key.
    Reduce {
        /// Fail on a line without a tab instead of skipping it.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = get_configuration().context("Failed to read configuration")?;
    init_tracing(&settings.telemetry.level, std::io::stderr)
        .context("Failed to initialise tracing")?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut options = StageOptions::from(&settings);
    match cli.stage {
        Stage::Map => {
            run_mapper(input, output, options)?;
        }
        Stage::Reduce { strict } => {
            if strict {
                options.missing_separator = MissingSeparatorPolicy::Abort;
            }
            run_reducer(input, output, options)?;
        }
    }
    Ok(())
}
