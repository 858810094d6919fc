//! Static Axis Lexicon
//!
//! Maps operational vocabulary onto the four axes. Each term belongs to
//! exactly one axis; unmatched tokens contribute nothing. The tables are
//! fixed at compile time so embedding stays a pure function.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::layout::AXIS_COUNT;

const CONNECTIVITY_TERMS: &[&str] = &[
    "ping",
    "pingable",
    "reachable",
    "unreachable",
    "connect",
    "connection",
    "connected",
    "disconnected",
    "route",
    "routing",
    "gateway",
    "link",
    "uplink",
    "online",
    "offline",
    "timeout",
    "host",
    "hop",
    "path",
    "peer",
    "reachability",
    "alive",
    "dead",
    "lost",
    "icmp",
    "down",
    "up",
];

const POLICY_TERMS: &[&str] = &[
    "firewall",
    "blocked",
    "block",
    "blocking",
    "filtered",
    "filter",
    "filtering",
    "denied",
    "deny",
    "acl",
    "rule",
    "rules",
    "policy",
    "drop",
    "dropped",
    "reject",
    "rejected",
    "restricted",
    "forbidden",
    "closed",
    "allowed",
    "allow",
    "permit",
    "permitted",
    "whitelist",
    "blacklist",
    "enforcement",
];

const CAPACITY_TERMS: &[&str] = &[
    "slow",
    "fast",
    "latency",
    "bandwidth",
    "throughput",
    "congestion",
    "congested",
    "load",
    "overload",
    "overloaded",
    "saturated",
    "saturation",
    "jitter",
    "delay",
    "delayed",
    "loss",
    "lossy",
    "degraded",
    "performance",
    "utilization",
    "queue",
    "backlog",
    "capacity",
    "mbps",
    "gbps",
];

const VISIBILITY_TERMS: &[&str] = &[
    "scan",
    "scanned",
    "scanning",
    "port",
    "ports",
    "open",
    "exposed",
    "exposure",
    "visible",
    "discovered",
    "discovery",
    "detected",
    "banner",
    "service",
    "services",
    "fingerprint",
    "probe",
    "probed",
    "snmp",
    "response",
    "responding",
    "responsive",
    "advertised",
    "listening",
    "enumerated",
];

/// Axis term tables in layout order
const AXIS_TERMS: [&[&str]; AXIS_COUNT] = [
    CONNECTIVITY_TERMS,
    POLICY_TERMS,
    CAPACITY_TERMS,
    VISIBILITY_TERMS,
];

/// Common shorthand expanded before lexicon lookup
const ABBREVIATION_TABLE: &[(&str, &str)] = &[
    ("fw", "firewall"),
    ("gw", "gateway"),
    ("conn", "connection"),
    ("bw", "bandwidth"),
    ("lat", "latency"),
    ("perf", "performance"),
    ("util", "utilization"),
    ("svc", "service"),
    ("svcs", "services"),
    ("resp", "response"),
    ("cong", "congestion"),
    ("disc", "disconnected"),
];

static LEXICON: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (axis, terms) in AXIS_TERMS.iter().enumerate() {
        for term in terms.iter() {
            map.insert(*term, axis);
        }
    }
    map
});

static ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ABBREVIATION_TABLE.iter().copied().collect());

/// Axis index of a lexicon term, if it is one
pub fn lookup(token: &str) -> Option<usize> {
    LEXICON.get(token).copied()
}

/// Expansion of a known abbreviation
pub fn expand(token: &str) -> Option<&'static str> {
    ABBREVIATIONS.get(token).copied()
}

/// Total number of lexicon terms
pub fn lexicon_size() -> usize {
    LEXICON.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_map_to_one_axis() {
        // The HashMap would silently collapse duplicates; make sure the
        // tables do not overlap.
        let total: usize = AXIS_TERMS.iter().map(|t| t.len()).sum();
        assert_eq!(total, lexicon_size());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("ping"), Some(0));
        assert_eq!(lookup("firewall"), Some(1));
        assert_eq!(lookup("latency"), Some(2));
        assert_eq!(lookup("scan"), Some(3));
        assert_eq!(lookup("banana"), None);
    }

    #[test]
    fn test_expand() {
        assert_eq!(expand("fw"), Some("firewall"));
        assert_eq!(expand("bw"), Some("bandwidth"));
        assert_eq!(expand("ping"), None);
    }
}
