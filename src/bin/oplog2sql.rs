//! oplog2sql — oplog to SQL on the command line
//!
//! # Usage
//!
//! ```bash
//! # Translate a file holding one entry or an array of entries
//! oplog2sql oplog.json
//!
//! # JSON Lines dump from stdin, JSON output
//! cat oplog.jsonl | oplog2sql --lines --format json
//!
//! # Show what each entry produces
//! oplog2sql explain oplog.json
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use oplog2sql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oplog2sql")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate MongoDB-style oplog entries into SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    oplog2sql oplog.json
    cat oplog.jsonl | oplog2sql --lines
    oplog2sql oplog.json --format json --config oplog2sql.toml
    oplog2sql explain oplog.json")]
struct Cli {
    /// Oplog file (one entry or an array); stdin when omitted or '-'
    input: Option<PathBuf>,

    /// Read JSON Lines: one entry per line
    #[arg(short, long)]
    lines: bool,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file path
    #[arg(short, long, env = "OPLOG2SQL_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each entry and the statements it produces
    Explain {
        /// Oplog file; stdin when omitted or '-'
        input: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Explain { input }) => explain(input.as_deref(), &cli),
        None => translate(cli.input.as_deref(), &cli),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "oplog2sql=debug" } else { "oplog2sql=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn load_entries(path: Option<&Path>, lines: bool) -> Result<Vec<OplogEntry>> {
    let input = read_input(path)?;
    let entries = if lines {
        parse_lines(&input)?
    } else {
        parse(&input)?
    };
    tracing::debug!("Parsed {} oplog entries", entries.len());
    Ok(entries)
}

/// Translate the batch and print it. Returns false when an entry failed.
fn translate(path: Option<&Path>, cli: &Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;
    let cache = SchemaCache::from_config(&config.cache)?;
    let format = cli.format.unwrap_or(config.output.format);

    let entries = load_entries(path, cli.lines)?;
    let out = translate_batch(&entries, cache);

    match format {
        OutputFormat::Plain => {
            for sql in &out.statements {
                println!("{}", sql);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    if let Some(e) = &out.error {
        eprintln!(
            "{} entry {}: {}",
            "Error:".red().bold(),
            out.processed.to_string().yellow(),
            e
        );
        return Ok(false);
    }
    Ok(true)
}

fn explain(path: Option<&Path>, cli: &Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;
    let mut cache = SchemaCache::from_config(&config.cache)?;
    let entries = load_entries(path, cli.lines)?;

    println!("{}", "Oplog Explanation".cyan().bold());
    println!();

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{} {} {} {}",
            format!("#{}", i).dimmed(),
            entry.op.name().cyan(),
            "on".dimmed(),
            entry.ns.white()
        );
        if let Some(o) = &entry.o {
            let keys: Vec<&str> = o.keys().map(String::as_str).collect();
            println!("  {} {}", "o: ".dimmed(), keys.join(", "));
        }
        if let Some(o2) = &entry.o2 {
            let keys: Vec<&str> = o2.keys().map(String::as_str).collect();
            println!("  {} {}", "o2:".dimmed(), keys.join(", "));
        }

        match translate_entry(entry, &mut cache) {
            Ok(stmts) if stmts.is_empty() => {
                println!("  {}", "(skipped: no SQL for this operation)".dimmed());
            }
            Ok(stmts) => {
                for stmt in &stmts {
                    println!(
                        "  {} {}",
                        format!("[{}]", stmt.kind()).green(),
                        stmt.to_sql().white()
                    );
                }
            }
            Err(e) => {
                println!("  {} {}", "✗".red(), e.to_string().red());
                return Ok(false);
            }
        }
        println!();
    }

    println!("{} entries explained", entries.len().to_string().cyan());
    Ok(true)
}
