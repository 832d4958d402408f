//! Lookup command implementations.
//!
//! Each command builds its own snapshot through `ProcFs`, so results
//! reflect the system state at the time the command ran.

use procfind::{decode_state, Process, ProcFs};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Lists live pids, one per line.
pub fn command_pids(procfs: &ProcFs, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let pids = procfs.list_pids()?;
    match structured(output) {
        None => {
            for pid in pids {
                println!("{}", pid);
            }
        }
        Some(format) => print_structured(&pids, format)?,
    }
    Ok(())
}

/// Lists every process in the snapshot.
pub fn command_ps(procfs: &ProcFs, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let procs = procfs.get_all_processes()?;
    print_processes(&procs, output)
}

pub fn command_pid(
    procfs: &ProcFs,
    pid: u32,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let p = procfs.find_by_pid(pid)?;
    print_processes(std::slice::from_ref(&p), output)
}

pub fn command_name(
    procfs: &ProcFs,
    name: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let p = procfs.find_by_name(name)?;
    print_processes(std::slice::from_ref(&p), output)
}

/// Lists processes whose command line contains `pattern`. No match is not an error.
pub fn command_grep(
    procfs: &ProcFs,
    pattern: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let procs = procfs.find_all_by_cmdline_contains(pattern)?;
    print_processes(&procs, output)
}

/// Prints the parent chain of `name`, root first, optionally with its children.
pub fn command_tree(
    procfs: &ProcFs,
    name: &str,
    children: bool,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = procfs.snapshot()?;
    let chain = snapshot.ancestry_chain(name)?;
    let kids = match (children, chain.last()) {
        (true, Some(leaf)) => snapshot.children(leaf.pid),
        _ => Vec::new(),
    };

    match structured(output) {
        None => print!("{}", render_tree(&chain, &kids)),
        Some(format) => {
            #[derive(Serialize)]
            struct Tree<'a> {
                ancestry: Vec<&'a Process>,
                #[serde(skip_serializing_if = "Vec::is_empty")]
                children: Vec<&'a Process>,
            }
            print_structured(
                &Tree {
                    ancestry: chain,
                    children: kids,
                },
                format,
            )?;
        }
    }
    Ok(())
}

/// Prints the state code and its label.
pub fn command_state(procfs: &ProcFs, pid: u32) -> Result<(), Box<dyn std::error::Error>> {
    let p = procfs.find_by_pid(pid)?;
    let label = decode_state(&p.state).unwrap_or("unknown");
    println!("{} ({})", p.state, label);
    Ok(())
}

/// Prints `true`/`false`; exits 1 when the process does not exist.
pub fn command_exists(
    procfs: &ProcFs,
    target: &str,
    by_pid: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let found = if by_pid {
        let pid: u32 = target
            .parse()
            .map_err(|_| format!("Invalid pid '{}'", target))?;
        procfs.pid_exists(pid)?
    } else {
        procfs.exists(target)?
    };

    println!("{}", found);
    if !found {
        std::process::exit(1);
    }
    Ok(())
}

fn print_processes<P>(procs: &[P], output: OutputFormat) -> Result<(), Box<dyn std::error::Error>>
where
    P: std::borrow::Borrow<Process> + Serialize,
{
    match structured(output) {
        None => {
            print!("{}", render_table(procs));
            Ok(())
        }
        Some(format) => print_structured(procs, format),
    }
}

/// Machine-readable output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructuredFormat {
    Json,
    Yaml,
}

/// `None` for text output, which each command renders itself.
fn structured(output: OutputFormat) -> Option<StructuredFormat> {
    match output {
        OutputFormat::Text => None,
        OutputFormat::Json => Some(StructuredFormat::Json),
        OutputFormat::Yaml => Some(StructuredFormat::Yaml),
    }
}

fn print_structured<T: Serialize + ?Sized>(
    value: &T,
    format: StructuredFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render_structured(value, format)?);
    Ok(())
}

fn render_structured<T: Serialize + ?Sized>(
    value: &T,
    format: StructuredFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        StructuredFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        StructuredFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

/// Renders processes as an aligned table.
fn render_table<P: std::borrow::Borrow<Process>>(procs: &[P]) -> String {
    let mut out = format!(
        "{:>7} {:>7} {:>7} {:<2} {:<16} {}\n",
        "PID", "PPID", "PGRP", "S", "COMM", "CMD"
    );
    for p in procs {
        let p = p.borrow();
        let cmd = match &p.cmdline {
            Some(_) => p.argv().join(" "),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:>7} {:>7} {:>7} {:<2} {:<16} {}\n",
            p.pid, p.ppid, p.pgrp, p.state, p.comm, cmd
        ));
    }
    out
}

/// Renders an ancestry chain as an indented tree, children below the leaf.
fn render_tree(chain: &[&Process], children: &[&Process]) -> String {
    let mut out = String::new();
    for (depth, p) in chain.iter().enumerate() {
        if depth == 0 {
            out.push_str(&format!("{}({})\n", p.comm, p.pid));
        } else {
            out.push_str(&format!("{}└─ {}({})\n", "   ".repeat(depth - 1), p.comm, p.pid));
        }
    }
    let indent = "   ".repeat(chain.len().saturating_sub(1));
    for (i, c) in children.iter().enumerate() {
        let branch = if i + 1 == children.len() { "└─" } else { "├─" };
        out.push_str(&format!("{}{} {}({})\n", indent, branch, c.comm, c.pid));
    }
    out
}
