#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use sociogram_core::config::{AnalysisConfig, EdgePolicy, MergePolicy, resolve_config};
use sociogram_core::error::ErrorCode;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sociogram: peer-nomination graph analytics",
    long_about = None
)]
struct Cli {
    /// Log at debug level (ignored when `SOCIOGRAM_LOG` is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (overrides ./sociogram.toml and the user config).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Reject graphs with unknown nodes, self-loops or duplicates.
    #[arg(long, global = true)]
    strict: bool,

    /// Recompute metrics even for nodes that already carry them.
    #[arg(long, global = true)]
    recompute: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }

    /// Apply command-line overrides on top of the resolved config.
    const fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if self.strict {
            config.edge_policy = EdgePolicy::Strict;
        }
        if self.recompute {
            config.merge_policy = MergePolicy::Recompute;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze a sociogram",
        long_about = "Compute per-participant metrics, group metrics and ingestion diagnostics for a graph.",
        after_help = "EXAMPLES:\n    # Analyze a survey export\n    sociogram analyze class-4a.json\n\n    # Read from stdin, emit JSON\n    cat class-4a.json | sociogram analyze - --format json"
    )]
    Analyze(cmd::InputArgs),

    #[command(
        about = "Show group metrics",
        long_about = "Compute only the group-level metrics: densities, cohesion, reciprocity and status distribution.",
        after_help = "EXAMPLES:\n    # Group metrics as key=value lines\n    sociogram metrics class-4a.json --format text"
    )]
    Metrics(cmd::InputArgs),

    #[command(
        about = "Check a graph for structural problems",
        long_about = "Report unknown-node references, self-loops, duplicate nominations and duplicate ids. Exits non-zero when any are found.",
        after_help = "EXAMPLES:\n    # Gate an import in CI\n    sociogram validate class-4a.json --json"
    )]
    Validate(cmd::InputArgs),
}

/// Filter used when `SOCIOGRAM_LOG` is unset.
const fn default_filter(verbose: bool, debug_env: bool) -> &'static str {
    if verbose || debug_env {
        "sociogram=debug,sociogram_core=debug,info"
    } else {
        "sociogram=info,sociogram_core=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SOCIOGRAM_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_filter(verbose, env::var("DEBUG").is_ok()))
    });

    let format = env::var("SOCIOGRAM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(cli: &Cli, output: OutputMode) -> anyhow::Result<AnalysisConfig> {
    let working_dir = env::current_dir().context("Failed to resolve working directory")?;
    let mut config = match resolve_config(cli.config.as_deref(), &working_dir) {
        Ok(config) => config,
        Err(err) => {
            render_error(
                output,
                &CliError::coded(format!("{err:#}"), ErrorCode::ConfigParseError),
            )?;
            return Err(err);
        }
    };
    cli.apply_overrides(&mut config);
    debug!(?config, "resolved analysis config");
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let output = cli.output_mode();
    let config = load_config(&cli, output)?;

    match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, &config, output),
        Commands::Metrics(ref args) => cmd::metrics::run_metrics(args, &config, output),
        Commands::Validate(ref args) => cmd::validate::run_validate(args, output),
    }
}
