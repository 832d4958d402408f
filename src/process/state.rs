//! Kernel scheduling state codes.
//!
//! Maps the single-character state reported in `/proc/<pid>/stat` and
//! `/proc/<pid>/status` to a human-readable label (see proc(5)).

use ahash::AHashMap as HashMap;
use once_cell::sync::Lazy;

/// Static lookup table from state code to label.
static STATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("R", "Running");
    map.insert("S", "Sleeping");
    map.insert("D", "Waiting");
    map.insert("Z", "Zombie");
    map.insert("T", "Stopped");
    map.insert("t", "Tracing stop");
    map.insert("X", "Dead");
    map.insert("x", "Dead");
    map.insert("K", "Wakekill");
    map.insert("W", "Waking");
    map.insert("P", "Parked");
    map
});

/// Decodes a state code into its label.
///
/// Returns `None` for any code outside the known alphabet; this is the
/// "unrecognized" result, not a failure.
pub fn decode_state(code: &str) -> Option<&'static str> {
    STATES.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_codes() {
        let cases = [
            ("S", "Sleeping"),
            ("R", "Running"),
            ("D", "Waiting"),
            ("Z", "Zombie"),
            ("T", "Stopped"),
            ("t", "Tracing stop"),
            ("X", "Dead"),
            ("x", "Dead"),
            ("K", "Wakekill"),
            ("W", "Waking"),
            ("P", "Parked"),
        ];

        for (code, label) in cases {
            assert_eq!(decode_state(code), Some(label), "state {}", code);
        }
    }

    #[test]
    fn test_decode_unknown_codes() {
        assert_eq!(decode_state(""), None);
        assert_eq!(decode_state("Q"), None);
        assert_eq!(decode_state("s"), None);
        // Full status value must be split before decoding
        assert_eq!(decode_state("S (sleeping)"), None);
    }

    #[test]
    fn test_decode_is_pure() {
        assert_eq!(decode_state("Z"), decode_state("Z"));
    }
}
