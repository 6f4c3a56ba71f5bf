//! Command-line interface for codesplit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::archive::{save_archive, Compression, PackOptions};
use crate::config::{DEFAULT_ARCHIVE_NAME, DEFAULT_DELIMITER, PREVIEW_CHARS};
use crate::error::Result;
use crate::input::InputSource;
use crate::render::{render_json, render_table};
use crate::session::Session;
use crate::types::FileRecord;

/// codesplit - Split a single text bundle into separate files.
#[derive(Parser)]
#[command(name = "codesplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input options shared by every command.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Text file holding the concatenated files ("-" or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Text that appears before each file path
    #[arg(short, long, env = "CODESPLIT_DELIMITER", default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the files found in the input.
    List {
        #[command(flatten)]
        input: InputArgs,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Number of content characters shown per file
        #[arg(long, default_value_t = PREVIEW_CHARS)]
        preview: usize,
    },

    /// Split the input and write the files into a zip archive.
    Pack {
        #[command(flatten)]
        input: InputArgs,

        /// Archive to write
        #[arg(short, long, default_value = DEFAULT_ARCHIVE_NAME)]
        output: PathBuf,

        /// Compression for file entries
        #[arg(long, value_enum, default_value_t = Compression::Stored)]
        compression: Compression,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            input,
            json,
            preview,
        } => list_command(&input, json, preview),
        Commands::Pack {
            input,
            output,
            compression,
        } => pack_command(&input, &output, compression),
    }
}

/// Read the input and split it through a session.
fn process_input(args: &InputArgs) -> Result<Session> {
    let source = InputSource::from_arg(args.input.as_deref());
    let text = source.read()?;

    Session::new()
        .with_delimiter(args.delimiter.as_str())
        .with_input(text)
        .process()
}

/// Paths that occur more than once, in first-seen order.
fn duplicate_paths(records: &[FileRecord]) -> Vec<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.path.as_str()).or_default() += 1;
    }

    let mut duplicates: Vec<&str> = Vec::new();
    for record in records {
        let path = record.path.as_str();
        if counts.get(path).is_some_and(|&n| n > 1) && !duplicates.contains(&path) {
            duplicates.push(path);
        }
    }
    duplicates
}

/// Execute the list command.
fn list_command(args: &InputArgs, json: bool, preview: usize) -> Result<()> {
    let session = process_input(args)?;

    if json {
        println!("{}", render_json(session.files())?);
        return Ok(());
    }

    println!("{}", render_table(session.files(), preview));

    let duplicates = duplicate_paths(session.files());
    if !duplicates.is_empty() {
        println!();
        println!(
            "  {} {} (the last occurrence wins in the archive)",
            style("Duplicate paths:").yellow().bold(),
            duplicates.join(", ")
        );
    }

    Ok(())
}

/// Execute the pack command.
fn pack_command(args: &InputArgs, output: &Path, compression: Compression) -> Result<()> {
    let session = process_input(args)?;

    println!(
        "{} {} files into {}",
        style("Packaging").bold(),
        style(session.files().len()).cyan(),
        style(output.display()).green()
    );

    let duplicates = duplicate_paths(session.files());
    if !duplicates.is_empty() {
        println!(
            "  Duplicate paths: {}",
            style(duplicates.len()).yellow().bold()
        );
    }

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Writing archive...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let options = PackOptions::default().with_compression(compression);
    let summary = match save_archive(session.files(), output, &options) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Files: {}", summary.files);
    println!("  Directories: {}", summary.directories);
    println!("  Size: {} bytes", summary.bytes);
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.path.display()
    );

    Ok(())
}
