//! binast: inspect, round-trip and convert BinAST containers.
//!
//! # Usage
//!
//! ```bash
//! # Header, section sizes and table sizes
//! binast inspect script.binjs --tables
//!
//! # Decode and re-encode; fails unless the bytes match
//! binast roundtrip script.binjs
//!
//! # Convert to and from JSON
//! binast to-json script.binjs -o script.json --pretty
//! binast from-json script.json -o script.binjs
//!
//! # Run with debug logging
//! binast --debug inspect script.binjs
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use binast::codec::Container;
use binast::{decode_script, encode_script, read_container, Script};

/// Inspect, round-trip and convert BinAST containers.
#[derive(Parser, Debug)]
#[command(name = "binast")]
#[command(version)]
#[command(about = "Inspect, round-trip and convert BinAST containers", long_about = None)]
struct Cli {
    /// Log at INFO level (the default)
    #[arg(long, global = true)]
    verbose: bool,

    /// Log at DEBUG level, including per-section events
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(long, global = true, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the container header and section sizes
    Inspect {
        file: PathBuf,

        /// List every grammar and string table entry with its index
        #[arg(long)]
        tables: bool,
    },

    /// Decode then re-encode, and check that the bytes are identical
    Roundtrip { file: PathBuf },

    /// Decode a container and write its tree as JSON
    ToJson {
        file: PathBuf,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Read a JSON tree and write it as a container
    FromJson {
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    match cli.command {
        Commands::Inspect { file, tables } => cmd_inspect(&file, tables),
        Commands::Roundtrip { file } => cmd_roundtrip(&file),
        Commands::ToJson { file, output, pretty } => cmd_to_json(&file, output.as_deref(), pretty),
        Commands::FromJson { file, output } => cmd_from_json(&file, &output),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), len = bytes.len(), "read input");
    Ok(bytes)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), len = bytes.len(), "wrote output");
    Ok(())
}

fn cmd_inspect(path: &Path, show_tables: bool) -> Result<()> {
    let bytes = read_file(path)?;
    let container = read_container(&bytes)
        .with_context(|| format!("invalid container {}", path.display()))?;

    let mut out = io::stdout().lock();
    print_summary(&mut out, &container, bytes.len())?;
    if show_tables {
        print_tables(&mut out, &container)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, container: &Container<'_>, total: usize) -> io::Result<()> {
    writeln!(out, "version:   {}", container.version)?;
    writeln!(out, "size:      {total} bytes")?;
    writeln!(
        out,
        "[GRAMMAR] {} bytes, {} kinds",
        container.grammar_len,
        container.tables.kinds.len()
    )?;
    writeln!(
        out,
        "[STRINGS] {} bytes, {} strings",
        container.strings_len,
        container.tables.atoms.len()
    )?;
    writeln!(out, "[TREE]    {} bytes", container.tree.len())
}

fn print_tables(out: &mut impl Write, container: &Container<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "grammar:")?;
    for (index, kind) in container.tables.kinds.iter().enumerate() {
        writeln!(out, "  {index:>5}  {kind}")?;
    }
    writeln!(out)?;
    writeln!(out, "strings:")?;
    for (index, atom) in container.tables.atoms.iter().enumerate() {
        match atom {
            Some(text) => writeln!(out, "  {index:>5}  {text:?}")?,
            None => writeln!(out, "  {index:>5}  <absent>")?,
        }
    }
    Ok(())
}

fn cmd_roundtrip(path: &Path) -> Result<()> {
    let bytes = read_file(path)?;
    let script = decode_script(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let reencoded = encode_script(&script)
        .with_context(|| format!("failed to re-encode {}", path.display()))?;

    if reencoded != bytes {
        let first_diff = bytes
            .iter()
            .zip(&reencoded)
            .position(|(a, b)| a != b)
            .unwrap_or(bytes.len().min(reencoded.len()));
        bail!(
            "{}: re-encoded container differs at byte {first_diff} ({} bytes in, {} bytes out)",
            path.display(),
            bytes.len(),
            reencoded.len()
        );
    }

    info!(path = %path.display(), len = bytes.len(), "round-trip is byte-identical");
    println!("ok: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn cmd_to_json(path: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
    let bytes = read_file(path)?;
    let script = decode_script(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let json = script_to_json(&script, pretty)?;

    match output {
        Some(output) => write_file(output, json.as_bytes()),
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{json}")?;
            Ok(())
        }
    }
}

fn cmd_from_json(path: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let script = script_from_json(&text)
        .with_context(|| format!("invalid JSON tree in {}", path.display()))?;
    debug!(statements = script.statements.len(), "parsed JSON tree");

    let bytes = encode_script(&script)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    write_file(output, &bytes)
}

fn script_to_json(script: &Script<'_>, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(script)?
    } else {
        serde_json::to_string(script)?
    };
    Ok(json)
}

fn script_from_json(text: &str) -> Result<Script<'static>> {
    Ok(serde_json::from_str(text)?)
}
