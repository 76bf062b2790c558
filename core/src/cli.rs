use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::interpreter::{self, disassemble, tokenize, ListingEntry, ReaderInput};

#[derive(Parser)]
#[command(name = "ujihisa")]
#[command(about = "ujihisa - a stack machine written in three keywords and line breaks", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program
    Run {
        /// Program file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Trace decoding and execution to stderr
        #[arg(short = 'd', long = "debug")]
        debug: bool,
    },

    /// Print the decoded instruction listing
    Disasm {
        /// Program file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the marker-token stream in S/T/L/E notation
    Tokens {
        /// Program file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

/// Internal function that handles CLI commands
fn run_cli_with_args(cli: Cli) -> Result<()> {
    // A .env file only fills in variables that are not already set
    dotenvy::dotenv().ok();

    let debug = matches!(cli.command, Commands::Run { debug: true, .. });

    // Load configuration before doing anything so config errors surface first
    let config = Config::builder()
        .config_path(cli.config.clone())
        .trace(debug.then_some(true))
        .build()
        .context("Failed to load configuration")?;

    init_logging(&config);

    match cli.command {
        Commands::Run { file, .. } => {
            let source = read_source(file.as_deref())?;

            let stdin = io::stdin();
            let mut input = ReaderInput::new(stdin.lock());
            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());

            interpreter::run(&source, &mut input, &mut output)?;
        }

        Commands::Disasm { file, json } => {
            let source = read_source(file.as_deref())?;
            let program = tokenize(&source)?;
            let listing = disassemble(&program)?;

            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", render_listing(&listing, json)?)?;
        }

        Commands::Tokens { file } => {
            let source = read_source(file.as_deref())?;
            let program = tokenize(&source)?;
            println!("{}", program);
        }
    }

    Ok(())
}

/// Install the stderr subscriber
///
/// Tracing enabled in config wins, then `RUST_LOG`, then the configured level.
fn init_logging(config: &Config) {
    let filter = if config.interpreter.trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Read program text from a file, or all of stdin
///
/// Invalid UTF-8 is replaced rather than rejected; it can only ever be
/// commentary.
fn read_source(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read program from stdin")?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Format a listing as text columns or pretty JSON
fn render_listing(listing: &[ListingEntry], json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(listing)?;
        out.push('\n');
        return Ok(out);
    }

    Ok(listing
        .iter()
        .map(|entry| format!("{:>6}  {}\n", entry.position, entry.instruction))
        .collect())
}
