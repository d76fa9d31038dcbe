//! lutgen CLI - Markdown lookup table generator

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lutgen::prelude::*;
use std::path::{Path, PathBuf};
use std::process;

const EXAMPLES: &str = r#"Examples:
  # 2D function
  lutgen \
    --function "lambda args: args[0] * args[1]" \
    --ranges "x:1:10:1" "y:1:5:1" \
    --title "Multiplication Table" \
    --output-dir "multiply_tables"

  # 3D function from Dart file
  lutgen \
    --function "model.dart" \
    --ranges "weight:50:150:5" "height:150:200:5" "age:20:80:10" \
    --title "BMI Prediction" \
    --notes "notes.md" \
    --output-dir "bmi_tables"
"#;

#[derive(Parser)]
#[command(name = "lutgen")]
#[command(
    author,
    version,
    about = "Generate markdown tables from mathematical functions",
    after_help = EXAMPLES
)]
struct Cli {
    /// Function definition (lambda/def/expression) or Dart file path
    #[arg(short, long)]
    function: String,

    /// Input ranges in format "name:start:stop:step" (2-3 ranges)
    #[arg(short, long, required = true, num_args = 1..)]
    ranges: Vec<String>,

    /// Title for the generated tables
    #[arg(short, long)]
    title: String,

    /// Output directory for generated tables
    #[arg(short, long, default_value = "output_tables")]
    output_dir: PathBuf,

    /// Explanatory notes (multiline string) or path to .md file
    #[arg(short, long, default_value = "")]
    notes: String,

    /// Round numeric cells to this many decimal places
    #[arg(short, long)]
    decimals: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    if !(2..=3).contains(&cli.ranges.len()) {
        Cli::command()
            .error(ErrorKind::WrongNumberOfValues, "Must specify 2-3 input ranges")
            .exit();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let function = load_function(&cli.function)?;

    let ranges = cli
        .ranges
        .iter()
        .map(|spec| NamedRange::parse(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let dimensions = ranges.len();

    let notes = load_notes(&cli.notes)?;

    let options = GenerateOptions {
        decimals: cli.decimals,
        ..Default::default()
    };

    let report = generate_tables(
        &cli.output_dir,
        &cli.title,
        ranges,
        &function,
        &notes,
        &options,
    )
    .map_err(|e| with_output_context(e, &cli.output_dir))?;

    for failure in &report.failures {
        eprintln!(
            "Warning: Error calculating function({}): {}",
            failure, failure.error
        );
    }

    if dimensions == 2 {
        for path in &report.files {
            println!("Generated table file: {}", path.display());
        }
    } else {
        println!(
            "Generated {} table files in '{}' directory",
            report.files.len(),
            cli.output_dir.display()
        );
    }

    Ok(())
}

/// Name the output directory on write failures
fn with_output_context(err: lutgen::Error, output_dir: &Path) -> anyhow::Error {
    match err {
        lutgen::Error::Io(_) | lutgen::Error::Markdown(_) => anyhow::Error::new(err)
            .context(format!("Failed to write tables to '{}'", output_dir.display())),
        other => other.into(),
    }
}
