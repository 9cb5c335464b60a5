//! Cache hierarchy simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Two-level run:** Exclusive L1/L2 hierarchy from positional arguments; L2 shares L1's block size.
//! 2. **Single-level run:** One cache in front of memory.
//! 3. **Config run:** Any hierarchy described by a JSON file.
//!
//! The report goes to stdout. Diagnostics and `RUST_LOG`-filtered tracing go to stderr.

use std::path::{Path, PathBuf};
use std::{fs, io, process};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{ConfigError, TraceError};
use cachesim_core::config::{CacheConfig, HierarchyConfig};
use cachesim_core::sim::{Hierarchy, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven exclusive cache hierarchy simulator",
    long_about = "Replay a memory-access trace (`R 0x..` / `W 0x..` lines, `#` ends the trace) against a set-associative cache hierarchy and report memory traffic and hit/miss counts.\n\nAssociativity is `direct`, `assoc` or `assoc:N`; policy is `fifo` or `lru`.\n\nExamples:\n  cachesim run 32 assoc:2 fifo 4 64 assoc lru trace1.txt\n  cachesim single 32 direct lru 4 trace1.txt\n  cachesim config hierarchy.json trace1.txt --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print the report as JSON instead of `key:value` lines.
    #[arg(long, global = true)]
    json: bool,

    /// Drop L1 victims instead of forwarding them to the next level.
    #[arg(long, global = true)]
    no_forward: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exclusive L1/L2 hierarchy. L2 uses the L1 block size.
    Run {
        /// L1 cache size in bytes (power of two).
        l1_size: String,
        /// L1 associativity: direct, assoc, or assoc:N.
        l1_assoc: String,
        /// L1 replacement policy: fifo or lru.
        l1_policy: String,
        /// Block size in bytes (power of two), shared by both levels.
        block_size: String,
        /// L2 cache size in bytes (power of two).
        l2_size: String,
        /// L2 associativity: direct, assoc, or assoc:N.
        l2_assoc: String,
        /// L2 replacement policy: fifo or lru.
        l2_policy: String,
        /// Trace file.
        trace: PathBuf,
    },

    /// A single cache in front of memory.
    Single {
        /// Cache size in bytes (power of two).
        size: String,
        /// Associativity: direct, assoc, or assoc:N.
        assoc: String,
        /// Replacement policy: fifo or lru.
        policy: String,
        /// Block size in bytes (power of two).
        block_size: String,
        /// Trace file.
        trace: PathBuf,
    },

    /// Hierarchy described by a JSON file.
    Config {
        /// JSON hierarchy description.
        path: PathBuf,
        /// Trace file.
        trace: PathBuf,
    },
}

/// Anything that stops a run before a report is printed.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not render report: {0}")]
    Render(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Some(Commands::Run {
            l1_size,
            l1_assoc,
            l1_policy,
            block_size,
            l2_size,
            l2_assoc,
            l2_policy,
            trace,
        }) => two_level_config(
            [l1_size.as_str(), l1_assoc.as_str(), l1_policy.as_str()],
            &block_size,
            [l2_size.as_str(), l2_assoc.as_str(), l2_policy.as_str()],
        )
        .map_err(CliError::from)
        .and_then(|config| simulate(config, cli.no_forward, &trace, cli.json)),
        Some(Commands::Single {
            size,
            assoc,
            policy,
            block_size,
            trace,
        }) => CacheConfig::from_args(&size, &assoc, &policy, &block_size)
            .map_err(CliError::from)
            .and_then(|l1| simulate(HierarchyConfig::single(l1), cli.no_forward, &trace, cli.json)),
        Some(Commands::Config { path, trace }) => load_config(&path)
            .and_then(|config| simulate(config, cli.no_forward, &trace, cli.json)),
        None => {
            eprintln!("Cache Simulator — pass a subcommand");
            eprintln!();
            eprintln!("  cachesim run <l1 size> <l1 assoc> <l1 policy> <block> <l2 size> <l2 assoc> <l2 policy> <trace>");
            eprintln!("  cachesim single <size> <assoc> <policy> <block> <trace>");
            eprintln!("  cachesim config <hierarchy.json> <trace>");
            eprintln!();
            eprintln!("  cachesim --help  for full options");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        println!("error");
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the L1/L2 description from positional arguments.
///
/// # Arguments
///
/// * `l1` - L1 size, associativity, and policy strings.
/// * `block_size` - Block size string, used for both levels.
/// * `l2` - L2 size, associativity, and policy strings.
fn two_level_config(
    l1: [&str; 3],
    block_size: &str,
    l2: [&str; 3],
) -> Result<HierarchyConfig, ConfigError> {
    let [l1_size, l1_assoc, l1_policy] = l1;
    let [l2_size, l2_assoc, l2_policy] = l2;
    let l1 = CacheConfig::from_args(l1_size, l1_assoc, l1_policy, block_size)?;
    let l2 = CacheConfig::from_args(l2_size, l2_assoc, l2_policy, block_size)?;
    Ok(HierarchyConfig::two_level(l1, l2))
}

/// Reads and validates a JSON hierarchy description.
fn load_config(path: &Path) -> Result<HierarchyConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(HierarchyConfig::from_json(&text)?)
}

/// Builds the hierarchy, turning forwarding off when `no_forward` is set.
fn build_hierarchy(
    mut config: HierarchyConfig,
    no_forward: bool,
) -> Result<Hierarchy, ConfigError> {
    if no_forward {
        config.exclusive = false;
    }
    Hierarchy::new(&config)
}

/// Replays `trace` through the hierarchy and prints the report.
///
/// # Arguments
///
/// * `config` - Validated hierarchy description.
/// * `no_forward` - Overrides the description's forwarding setting when set.
/// * `trace` - Trace file path.
/// * `json` - Print JSON instead of text.
fn simulate(
    config: HierarchyConfig,
    no_forward: bool,
    trace: &Path,
    json: bool,
) -> Result<(), CliError> {
    let mut hierarchy = build_hierarchy(config, no_forward)?;
    let reader = TraceReader::open(trace)?;
    let stats = hierarchy.try_run(reader)?;
    info!(
        mem_reads = stats.mem_reads,
        mem_writes = stats.mem_writes,
        depth = stats.levels.len(),
        "trace replayed"
    );

    let report = hierarchy.report();
    if json {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }
    Ok(())
}
