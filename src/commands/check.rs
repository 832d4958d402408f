//! Check command implementation.
//!
//! Validates process root access, record parsing and configuration.

use procfind::ProcFs;

use crate::config::{validate_effective_config, Config};

/// Number of pids sampled for the parse check.
const SAMPLE_PIDS: usize = 5;

/// Validates system requirements and configuration.
pub fn command_check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 procfind - System Check");
    println!("==========================");

    let procfs = config.proc_fs();
    let mut all_ok = check_proc_root(&procfs);

    // Check configuration
    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => {
            println!("   ✅ Configuration is valid");
        }
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}

/// Lists the process root, builds a snapshot and prints a few of its records.
fn check_proc_root(procfs: &ProcFs) -> bool {
    println!("\n📁 Checking process root {}...", procfs.root().display());

    let pids = match procfs.list_pids() {
        Ok(p) if p.is_empty() => {
            println!("   ❌ No process entries found");
            return false;
        }
        Ok(p) => {
            println!("   ✅ Found {} process entries", p.len());
            p
        }
        Err(e) => {
            println!("   ❌ {}", e);
            return false;
        }
    };

    println!("\n📄 Checking {} records...", procfs.format());
    let snapshot = match procfs.snapshot() {
        Ok(snapshot) => {
            println!("   ✅ Snapshot built with {} processes", snapshot.len());
            snapshot
        }
        Err(e) => {
            println!("   ❌ Snapshot failed: {}", e);
            return false;
        }
    };

    let mut sampled = 0;
    for pid in pids.iter().take(SAMPLE_PIDS) {
        match snapshot.find_by_pid(*pid) {
            Ok(p) => {
                sampled += 1;
                println!(
                    "   ├─ {} (PID: {}, PPID: {}, State: {})",
                    p.comm,
                    p.pid,
                    p.ppid,
                    p.state_label().unwrap_or("unknown")
                );
            }
            // Exited or unparsable between listing and snapshot
            Err(_) => continue,
        }
    }
    if sampled == 0 {
        println!("   ⚠️  None of the sampled processes could be read");
    }

    true
}
