//! Configuration management for procfind.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use clap::ValueEnum;
use procfind::{ProcFs, RecordFormat, DEFAULT_PROC_ROOT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Process root directory
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    /// "stat" | "status"
    pub format: Option<RecordFormat>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,

    /// Upper bound on ancestry chain length
    #[serde(alias = "max-ancestry-depth")]
    pub max_ancestry_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            format: Some(RecordFormat::default()),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            max_ancestry_depth: None,
        }
    }
}

impl Config {
    /// Builds the process root handle for this configuration.
    pub fn proc_fs(&self) -> ProcFs {
        let root = self
            .proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT));
        let procfs = ProcFs::new(root, self.format.unwrap_or_default());
        match self.max_ancestry_depth {
            Some(depth) => procfs.with_max_ancestry_depth(depth),
            None => procfs,
        }
    }

    /// Effective log level, falling back to the default on unknown names.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
            .unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".into());
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_str(level, true).is_err() {
            return Err(format!(
                "Invalid log_level '{}', expected one of off, error, warn, info, debug, trace",
                level
            )
            .into());
        }
    }

    if cfg.max_ancestry_depth == Some(0) {
        return Err("max_ancestry_depth must be greater than 0".into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(format) = args.format {
        config.format = Some(format.into());
    }
    if let Some(level) = args.log_level {
        if let Some(value) = level.to_possible_value() {
            config.log_level = Some(value.get_name().to_string());
        }
    }
    if let Some(depth) = args.max_ancestry_depth {
        config.max_ancestry_depth = Some(depth);
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => PathBuf::from(p),
        None => {
            // Try default locations
            let defaults = [
                "/etc/procfind/procfind.yaml",
                "/etc/procfind/procfind.yml",
                "./procfind.yaml",
                "./procfind.yml",
                "./procfind.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;

    let config = parse_config(&content, path.extension().and_then(|s| s.to_str()))?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses config content by file extension, defaulting to YAML.
fn parse_config(content: &str, extension: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config: Config = match extension {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };

    // Unset fields in a partial file keep their defaults
    let defaults = Config::default();
    if config.proc_root.is_none() {
        config.proc_root = defaults.proc_root;
    }
    if config.format.is_none() {
        config.format = defaults.format;
    }
    if config.log_level.is_none() {
        config.log_level = defaults.log_level;
    }

    Ok(config)
}

/// Renders configuration in requested format
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}
