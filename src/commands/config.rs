//! Config command implementation.
//!
//! Prints the effective configuration in various formats.

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Prints the effective (merged) configuration.
pub fn command_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    let content = render_config(config, format)?;
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}
