//! CLI arguments and subcommands for procfind.
//!
//! This module defines the command-line interface structure using the clap library,
//! including global flags and one subcommand per lookup operation.

use clap::{Parser, Subcommand, ValueEnum};
use procfind::RecordFormat;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Record format options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Read /proc/<pid>/stat (no command lines)
    Stat,
    /// Read /proc/<pid>/status and /proc/<pid>/cmdline
    Status,
}

impl From<FormatArg> for RecordFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Stat => RecordFormat::Stat,
            FormatArg::Status => RecordFormat::Status,
        }
    }
}

/// Output format for process records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "procfind",
    about = "Look up Linux processes by pid, name, command line or ancestry",
    long_about = "Look up Linux processes by pid, name, command line or ancestry.\n\n\
                  Every invocation reads a fresh snapshot of the process root; nothing \
                  is cached between runs.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Process root to read (default: /proc)
    #[arg(long, global = true)]
    pub proc_root: Option<PathBuf>,

    /// Per-process record format
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Maximum number of records in an ancestry chain
    #[arg(long, global = true)]
    pub max_ancestry_depth: Option<usize>,

    /// Output format for process records
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    pub output: OutputFormat,
}

/// Subcommands, one per lookup
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List live process ids
    Pids,

    /// List all processes
    Ps,

    /// Show the process with the given pid
    Pid { pid: u32 },

    /// Show the first process whose executable name matches exactly
    Name { name: String },

    /// List processes whose command line contains a substring
    Grep { pattern: String },

    /// Show the parent chain of a process, root first
    Tree {
        name: String,

        /// Also list direct children of the process
        #[arg(long)]
        children: bool,
    },

    /// Show the decoded state of a process
    State { pid: u32 },

    /// Exit 0 if a process with this name exists, 1 otherwise
    Exists {
        name: String,

        /// Treat the argument as a pid
        #[arg(long)]
        pid: bool,
    },

    /// Check process root accessibility and record parsing
    Check,

    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_with_globals() {
        let args = Args::try_parse_from([
            "procfind",
            "name",
            "sshd",
            "--format",
            "stat",
            "--proc-root",
            "/tmp/fakeproc",
        ])
        .expect("valid arguments");

        assert!(matches!(args.command, Commands::Name { ref name } if name == "sshd"));
        assert_eq!(args.format, Some(FormatArg::Stat));
        assert_eq!(args.proc_root, Some(PathBuf::from("/tmp/fakeproc")));
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn test_parse_pid_rejects_non_numeric() {
        assert!(Args::try_parse_from(["procfind", "pid", "abc"]).is_err());
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(RecordFormat::from(FormatArg::Stat), RecordFormat::Stat);
        assert_eq!(RecordFormat::from(FormatArg::Status), RecordFormat::Status);
    }
}
