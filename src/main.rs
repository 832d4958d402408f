//! procfind - version 0.1.0
//!
//! Process lookup over /proc with tracing logging.
//! This is the main entry point that resolves configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use cli::{Args, Commands, LogLevel};
use commands::{
    command_check, command_config, command_exists, command_grep, command_name, command_pid,
    command_pids, command_ps, command_state, command_tree,
};
use config::{resolve_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
/// Logs go to stderr so command output on stdout stays machine-readable.
fn setup_logging(config: &Config) {
    let log_level = match config.log_level() {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    debug!("Logging initialized with level: {:?}", log_level);
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Main application entry point.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_validated_config(&args)?;

    setup_logging(&config);

    let procfs = config.proc_fs();
    debug!(
        "Using process root {} with {} records",
        procfs.root().display(),
        procfs.format()
    );

    let output = args.output;
    let result = match &args.command {
        Commands::Pids => command_pids(&procfs, output),
        Commands::Ps => command_ps(&procfs, output),
        Commands::Pid { pid } => command_pid(&procfs, *pid, output),
        Commands::Name { name } => command_name(&procfs, name, output),
        Commands::Grep { pattern } => command_grep(&procfs, pattern, output),
        Commands::Tree { name, children } => command_tree(&procfs, name, *children, output),
        Commands::State { pid } => command_state(&procfs, *pid),
        Commands::Exists { name, pid } => command_exists(&procfs, name, *pid),
        Commands::Check => command_check(&config),
        Commands::Config { format } => command_config(&config, *format),
    };

    // Lookup misses and environment failures both exit 1 with a message
    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}
