//! Record parsing for the two per-process metadata formats.
//!
//! - Delimited (`/proc/<pid>/stat`): `pid (comm) state ppid pgrp ...`
//! - Key-value (`/proc/<pid>/status`): one `Label:\tvalue` pair per line
//!
//! Numeric fields go through [`parse_or_zero`]: a field that does not parse
//! reads as 0, same as an absent field. Only a zero pid rejects the record.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::error::ParseError;
use crate::process::reader::RawRecord;
use crate::process::{Process, RecordFormat};

/// `Label:<whitespace>value`
static STATUS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w[^:]*):\s+(.+)$").expect("status line regex is valid"));

/// Parses a numeric field, returning zero (the type's default) on failure.
///
/// A zero result cannot be told apart from an absent field. Callers rely on
/// that: pid 0 never matches a lookup, ppid 0 marks the root.
pub fn parse_or_zero<T: FromStr + Default>(s: &str) -> T {
    s.trim().parse().unwrap_or_default()
}

/// Parses a raw record with the strategy for `format`.
pub fn parse_record(format: RecordFormat, raw: &RawRecord) -> Result<Process, ParseError> {
    match format {
        RecordFormat::Stat => parse_stat(&raw.primary),
        RecordFormat::Status => parse_status(&raw.primary, raw.cmdline.as_deref()),
    }
}

/// Parses the delimited `stat` form.
///
/// `comm` is taken between the first `(` and the last `)`, so names containing
/// spaces or parentheses survive. Without parentheses the line is split on
/// single spaces and the name is trimmed of parenthesis characters.
pub fn parse_stat(content: &str) -> Result<Process, ParseError> {
    let line = content.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let (pid_field, comm, rest): (&str, &str, Vec<&str>) = match (line.find('('), line.rfind(')'))
    {
        (Some(open), Some(close)) if open < close => (
            line[..open].trim(),
            &line[open + 1..close],
            line[close + 1..].split_whitespace().collect(),
        ),
        _ => {
            let mut fields = line.split(' ');
            let pid_field = fields.next().unwrap_or("");
            let comm = fields
                .next()
                .unwrap_or("")
                .trim_matches(['(', ')']);
            (pid_field, comm, fields.collect())
        }
    };

    let pid: u32 = parse_or_zero(pid_field);
    if pid == 0 {
        return Err(ParseError::InvalidPid {
            raw: pid_field.to_string(),
        });
    }

    let field = |i: usize| rest.get(i).copied().unwrap_or("");

    Ok(Process {
        pid,
        comm: comm.to_string(),
        cmdline: None,
        state: field(0).to_string(),
        ppid: parse_or_zero(field(1)),
        pgrp: parse_or_zero(field(2)),
        uid: None,
        gid: None,
    })
}

/// Parses the key-value `status` form.
///
/// Unknown labels are ignored and absent labels leave their field at zero.
/// `State` keeps only the code before the first space (`S (sleeping)` -> `S`).
/// `Uid`/`Gid` list real, effective, saved and filesystem ids; the real id is kept.
pub fn parse_status(content: &str, cmdline: Option<&str>) -> Result<Process, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut p = Process {
        cmdline: cmdline.map(str::to_string),
        uid: Some(0),
        gid: Some(0),
        ..Default::default()
    };
    let mut pid_raw = "";

    for line in content.lines() {
        let caps = match STATUS_LINE.captures(line) {
            Some(c) => c,
            None => continue,
        };
        let (label, value) = match (caps.get(1), caps.get(2)) {
            (Some(l), Some(v)) => (l.as_str(), v.as_str()),
            _ => continue,
        };

        match label {
            "Name" => p.comm = value.to_string(),
            "State" => p.state = first_token(value).to_string(),
            "Pid" => {
                pid_raw = value;
                p.pid = parse_or_zero(value);
            }
            "PPid" => p.ppid = parse_or_zero(value),
            "Tgid" => p.pgrp = parse_or_zero(value),
            "Uid" => p.uid = Some(parse_or_zero(first_token(value))),
            "Gid" => p.gid = Some(parse_or_zero(first_token(value))),
            _ => {}
        }
    }

    if p.pid == 0 {
        return Err(ParseError::InvalidPid {
            raw: pid_raw.to_string(),
        });
    }

    Ok(p)
}

fn first_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEMD_STAT: &str = "1 (systemd) S 0 1 1 0 -1 4194560 96519 5298046 81 2131 338 305 14006 4462 20 0 1 0 8 172654592 3235 18446744073709551615 1 1 0 0 0 0 671173123 4096 1260 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n";

    const SSHD_STATUS: &str = "Name:\tsshd\n\
Umask:\t0022\n\
State:\tS (sleeping)\n\
Tgid:\t812\n\
Ngid:\t0\n\
Pid:\t812\n\
PPid:\t1\n\
TracerPid:\t0\n\
Uid:\t0\t0\t0\t0\n\
Gid:\t0\t0\t0\t0\n\
FDSize:\t64\n\
Groups:\t\n\
VmPeak:\t   15436 kB\n\
Threads:\t1\n";

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero::<u32>("42"), 42);
        assert_eq!(parse_or_zero::<u32>(" 42\n"), 42);
        assert_eq!(parse_or_zero::<u32>("abc"), 0);
        assert_eq!(parse_or_zero::<u32>(""), 0);
        assert_eq!(parse_or_zero::<u32>("-1"), 0);
    }

    #[test]
    fn test_parse_stat_unwraps_comm() {
        let p = parse_stat(SYSTEMD_STAT).expect("valid stat line");
        assert_eq!(p.pid, 1);
        assert_eq!(p.comm, "systemd");
        assert_eq!(p.state, "S");
        assert_eq!(p.ppid, 0);
        assert_eq!(p.pgrp, 1);
        assert_eq!(p.cmdline, None);
        assert_eq!(p.uid, None);
        assert_eq!(p.gid, None);
    }

    #[test]
    fn test_parse_stat_comm_with_spaces_and_parens() {
        let p = parse_stat("4242 (tmux: server) S 1 4242 4242").expect("valid stat line");
        assert_eq!(p.comm, "tmux: server");
        assert_eq!(p.ppid, 1);

        let p = parse_stat("77 ((sd-pam)) S 76 76 76").expect("valid stat line");
        assert_eq!(p.comm, "(sd-pam)");
        assert_eq!(p.state, "S");
        assert_eq!(p.ppid, 76);
    }

    #[test]
    fn test_parse_stat_without_parens() {
        let p = parse_stat("9 kworker R 2 0").expect("valid stat line");
        assert_eq!(p.pid, 9);
        assert_eq!(p.comm, "kworker");
        assert_eq!(p.state, "R");
        assert_eq!(p.ppid, 2);
    }

    #[test]
    fn test_parse_stat_lenient_numbers() {
        let p = parse_stat("15 (odd) S x y").expect("pid still valid");
        assert_eq!(p.ppid, 0);
        assert_eq!(p.pgrp, 0);

        let p = parse_stat("16 (short)").expect("pid still valid");
        assert_eq!(p.state, "");
        assert_eq!(p.ppid, 0);
    }

    #[test]
    fn test_parse_stat_invalid_pid() {
        assert_eq!(
            parse_stat("abc (bad) S 1 1"),
            Err(ParseError::InvalidPid {
                raw: "abc".to_string()
            })
        );
        assert_eq!(parse_stat("\n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_status() {
        let p = parse_status(SSHD_STATUS, Some("sshd: /usr/sbin/sshd -D\0")).expect("valid status");
        assert_eq!(p.pid, 812);
        assert_eq!(p.comm, "sshd");
        assert_eq!(p.state, "S");
        assert_eq!(p.ppid, 1);
        assert_eq!(p.pgrp, 812);
        assert_eq!(p.uid, Some(0));
        assert_eq!(p.gid, Some(0));
        assert_eq!(p.cmdline.as_deref(), Some("sshd: /usr/sbin/sshd -D\0"));
    }

    #[test]
    fn test_parse_status_takes_real_ids() {
        let content = "Name:\tbash\nPid:\t100\nPPid:\t99\nUid:\t1000\t1001\t1002\t1003\nGid:\t100\t101\t102\t103\n";
        let p = parse_status(content, None).expect("valid status");
        assert_eq!(p.uid, Some(1000));
        assert_eq!(p.gid, Some(100));
        assert_eq!(p.cmdline, None);
    }

    #[test]
    fn test_parse_status_missing_labels_default_to_zero() {
        let p = parse_status("Pid:\t5\nSomethingNew:\tvalue\n", Some("")).expect("valid status");
        assert_eq!(p.pid, 5);
        assert_eq!(p.comm, "");
        assert_eq!(p.state, "");
        assert_eq!(p.ppid, 0);
        assert_eq!(p.pgrp, 0);
        assert_eq!(p.uid, Some(0));
    }

    #[test]
    fn test_parse_status_missing_pid_is_rejected() {
        assert_eq!(
            parse_status("Name:\tghost\nPPid:\t1\n", None),
            Err(ParseError::InvalidPid { raw: String::new() })
        );
        assert_eq!(
            parse_status("Name:\tghost\nPid:\tnope\n", None),
            Err(ParseError::InvalidPid {
                raw: "nope".to_string()
            })
        );
        assert_eq!(parse_status("", None), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_record_dispatch() {
        let raw = RawRecord {
            pid: 1,
            primary: SYSTEMD_STAT.to_string(),
            cmdline: None,
        };
        let p = parse_record(RecordFormat::Stat, &raw).expect("valid stat");
        assert_eq!(p.comm, "systemd");

        let raw = RawRecord {
            pid: 812,
            primary: SSHD_STATUS.to_string(),
            cmdline: Some("/usr/sbin/sshd\0".to_string()),
        };
        let p = parse_record(RecordFormat::Status, &raw).expect("valid status");
        assert_eq!(p.comm, "sshd");
        assert_eq!(p.argv(), vec!["/usr/sbin/sshd"]);
    }
}
