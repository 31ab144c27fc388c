//! eolscan: LTS lifecycle scanner.
//!
//! Audits the host OS, kernel, applications, and Dockerfile base images
//! against cached endoflife.date lifecycle schedules.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use eolscan::catalog::source;
use eolscan::{HostPlatform, ScanConfig, Scanner, SystemRunner};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eolscan")]
#[command(version)]
#[command(about = "Warn about end-of-life operating systems, applications, and base images", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No end-of-life components detected
    1  One or more warnings emitted
    2  Error occurred

EXAMPLES:
    # Scan the host and the current working tree
    eolscan

    # Refresh cached lifecycle data first
    eolscan --update

    # Warn three months ahead of each end-of-life date
    eolscan --lead-months 3")]
struct Cli {
    /// Force lifecycle data cache update
    #[arg(short, long)]
    update: bool,

    /// Remove cached lifecycle data and exit
    #[arg(long)]
    clean: bool,

    /// Skip applications installed in stock system directories
    #[arg(short, long)]
    quiet: bool,

    /// Months of early warning ahead of each end-of-life date
    #[arg(long, default_value_t = eolscan::scan::DEFAULT_LEAD_MONTHS, allow_hyphen_values = true)]
    lead_months: i64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if let Some(Commands::Completions { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "eolscan", &mut io::stdout());
        return Ok(0);
    }

    if cli.clean {
        source::clean().context("failed to remove cache")?;
        return Ok(0);
    }

    let catalog = source::load(cli.update).context("failed to load lifecycle catalog")?;

    let config = ScanConfig {
        lead_months: cli.lead_months,
        quiet: cli.quiet,
        debug: cli.verbose || catalog.debug,
    };

    let platform = HostPlatform;
    let runner = SystemRunner;
    let scanner = Scanner::new(&catalog, config, &platform, &runner);

    let root = std::env::current_dir().context("cannot determine current directory")?;
    let outcome = scanner.scan(&root)?;

    for warning in &outcome.warnings {
        println!("warning: {warning}");
    }

    if let Some(err) = outcome.walk_error {
        // Partial result: warnings above are real, but the tree walk
        // did not complete.
        eprintln!("error: {err}");
        return Ok(2);
    }

    Ok(if outcome.warnings.is_empty() { 0 } else { 1 })
}
