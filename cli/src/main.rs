//! unsheet CLI - dump .xlsx workbooks as header-keyed records
//!
//! A command-line tool for inspecting and exporting XLSX workbooks.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use unsheet::render::JsonFormat;
use unsheet::{ReadOptions, Workbook};

/// Read XLSX workbooks into header-keyed records
#[derive(Parser)]
#[command(
    name = "unsheet",
    author = "iyulab",
    version,
    about = "Read XLSX workbooks into header-keyed records",
    long_about = "unsheet - tolerant XLSX reader.\n\n\
                  Promotes each sheet's first row to field names and prints the\n\
                  remaining rows as JSON records."
)]
struct Cli {
    /// Log decoding progress (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a workbook to JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Keep sheet names as authored instead of lower-casing them
        #[arg(long)]
        preserve_names: bool,
    },

    /// Show sheets, fields, record counts and read diagnostics
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// List sheet names in workbook order
    Sheets {
        /// Input file path
        input: PathBuf,

        /// Keep sheet names as authored instead of lower-casing them
        #[arg(long)]
        preserve_names: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Json {
            input,
            output,
            compact,
            preserve_names,
        } => {
            let workbook = read_with_spinner(&input, preserve_names)?;

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = unsheet::render::to_json(&workbook, format)?;

            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} sheets to {}",
                    "✓".green().bold(),
                    workbook.len(),
                    path.display()
                );
            }
        }

        Commands::Info { input } => {
            let workbook = read_with_spinner(&input, false)?;

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Sheets".bold(), workbook.len());

            for sheet in &workbook {
                println!();
                println!("{}", sheet.name.cyan().bold());
                println!("  {}: {}", "Records".bold(), sheet.table.len());
                println!("  {}: {}", "Fields".bold(), sheet.table.headers().join(", "));
            }

            if !workbook.diagnostics().is_empty() {
                println!("\n{}", "Diagnostics".yellow().bold());
                println!("{}", "─".repeat(40));
                for diagnostic in workbook.diagnostics() {
                    println!("{} {}", "!".yellow().bold(), diagnostic);
                }
            }
        }

        Commands::Sheets {
            input,
            preserve_names,
        } => {
            let workbook = read_with_spinner(&input, preserve_names)?;
            for name in workbook.sheet_names() {
                println!("{}", name);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn read_with_spinner(input: &Path, preserve_names: bool) -> unsheet::Result<Workbook> {
    let pb = create_spinner("Reading workbook...");

    let mut options = ReadOptions::new();
    if preserve_names {
        options = options.preserve_sheet_names();
    }
    let result = unsheet::read_workbook_with_options(input, &options);

    pb.finish_and_clear();
    result
}

fn print_version() {
    println!("{} {}", "unsheet".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Tolerant XLSX reader producing header-keyed records");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
