//! sdiff - Structured Diff CLI tool
//!
//! A command line tool for diffing, patching and sorting YAML/JSON files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path as FsPath, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use structured_diff::value::from_yaml_with;
use structured_diff::{best_diff, diff, from_json, patch, sort, unpatch, Changeset, Options, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sdiff", version, about = "Structural diff and patch for YAML/JSON files")]
struct Cli {
    #[command(flatten)]
    options: OptionArgs,

    /// Output location. Use '-' for stdout.
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the changes that turn A into B
    Diff { a: PathBuf, b: PathBuf },
    /// Like diff, trying several similarity thresholds and keeping the smallest result
    BestDiff { a: PathBuf, b: PathBuf },
    /// Apply a changeset to a file
    Patch { file: PathBuf, changes: PathBuf },
    /// Revert a changeset on a file
    Unpatch { file: PathBuf, changes: PathBuf },
    /// Print a file in canonical order
    Sort { file: PathBuf },
}

/// Flags mirroring the diff options.
#[derive(Debug, Args)]
struct OptionArgs {
    /// YAML or JSON file with diff options; flags override it
    #[arg(long = "options", value_name = "FILE", global = true)]
    options_file: Option<PathBuf>,

    /// Similarity threshold for aligning list elements
    #[arg(long, global = true)]
    similarity: Option<f64>,

    /// Path delimiter
    #[arg(long, global = true, conflicts_with = "array_path")]
    delimiter: Option<String>,

    /// Encode paths as lists of keys and indexes
    #[arg(long, global = true)]
    array_path: bool,

    /// Treat integers and floats as comparable
    #[arg(long, global = true)]
    no_strict: bool,

    /// Numbers closer than this are equal
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Ignore surrounding whitespace in strings
    #[arg(long, global = true)]
    strip: bool,

    /// Ignore case in strings
    #[arg(long, global = true)]
    case_insensitive: bool,

    /// Sort both inputs before diffing
    #[arg(long, global = true)]
    sort: bool,

    /// Compare lists linearly instead of with LCS
    #[arg(long, global = true)]
    linear: bool,
}

impl OptionArgs {
    fn to_options(&self) -> Result<Options, Box<dyn std::error::Error>> {
        let mut options = match &self.options_file {
            Some(file) => Options::from_yaml(&read(file)?)?,
            None => Options::default(),
        };
        if let Some(similarity) = self.similarity {
            if !(similarity > 0.0 && similarity <= 1.0) {
                return Err(format!("similarity must be in (0, 1], got {}", similarity).into());
            }
            options = options.similarity(similarity);
        }
        if let Some(delimiter) = &self.delimiter {
            options = options.delimiter(delimiter.clone());
        }
        if self.array_path {
            options = options.array_path();
        }
        if self.no_strict {
            options = options.strict(false);
        }
        if let Some(tolerance) = self.tolerance {
            options = options.numeric_tolerance(tolerance);
        }
        if self.strip {
            options = options.strip(true);
        }
        if self.case_insensitive {
            options = options.case_insensitive(true);
        }
        if self.sort {
            options = options.sort(true);
        }
        if self.linear {
            options = options.use_lcs(false);
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options.to_options()?;
    debug!(?options, "options loaded");

    // Open output
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };

    match cli.command {
        Command::Diff { a, b } => {
            let changes = diff(&load(&a, &options)?, &load(&b, &options)?, &options)?;
            write_changes(&changes, &options, &mut output)?;
        }
        Command::BestDiff { a, b } => {
            let changes = best_diff(&load(&a, &options)?, &load(&b, &options)?, &options)?;
            write_changes(&changes, &options, &mut output)?;
        }
        Command::Patch { file, changes } => {
            let mut root = load(&file, &options)?;
            patch(&mut root, &load_changes(&changes, &options)?)?;
            write_value(&root, &mut output)?;
        }
        Command::Unpatch { file, changes } => {
            let mut root = load(&file, &options)?;
            unpatch(&mut root, &load_changes(&changes, &options)?)?;
            write_value(&root, &mut output)?;
        }
        Command::Sort { file } => {
            write_value(&sort(&load(&file, &options)?)?, &mut output)?;
        }
    }

    Ok(())
}

fn read(file: &FsPath) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(file).map_err(|e| format!("Failed to read file {:?}: {}", file, e))?)
}

/// Loads a document, as YAML when the extension says so and JSON otherwise.
fn load(file: &FsPath, options: &Options) -> Result<Value, Box<dyn std::error::Error>> {
    let content = read(file)?;
    let is_yaml = matches!(
        file.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let value = if is_yaml {
        from_yaml_with(&content, options.stringify_keys)
    } else {
        from_json(&content)
    };
    Ok(value.map_err(|e| format!("Failed to parse {:?}: {}", file, e))?)
}

fn load_changes(file: &FsPath, options: &Options) -> Result<Changeset, Box<dyn std::error::Error>> {
    let changes = Changeset::from_json(&read(file)?, &options.path_style)?;
    debug!(file = ?file, changes = changes.len(), "changeset loaded");
    Ok(changes)
}

fn write_changes(
    changes: &Changeset,
    options: &Options,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&changes.to_json_value(&options.path_style)?)?;
    writeln!(output, "{}", json)?;
    Ok(())
}

fn write_value(value: &Value, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(output, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
