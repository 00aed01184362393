//! Syntactic IP literal detection
//!
//! Tracker lists mix named hosts with raw IPv4/IPv6 addresses. DNS override
//! rules only make sense for names, so numeric hosts are recognized here and
//! dropped. Nothing in this module touches the resolver.

use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted quad with every octet in 0-255, optional `:port`.
static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(?::[0-9]+)?$",
    )
    .expect("IPv4 pattern is valid")
});

/// Bracketed IPv6 with optional `:port`; the inner part is checked separately.
static BRACKETED_IPV6_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([0-9a-fA-F:.]+)\](?::[0-9]+)?$").expect("bracketed IPv6 pattern is valid")
});

/// Bare colon-separated hex groups.
static BARE_IPV6_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}$").expect("IPv6 pattern is valid")
});

/// Returns true if `hostname` is a numeric IPv4 or IPv6 address, optionally
/// carrying a port.
///
/// ```
/// use th_core::addr::is_ip_literal;
///
/// assert!(is_ip_literal("1.2.3.4:6969"));
/// assert!(is_ip_literal("[2001:db8::1]:443"));
/// assert!(!is_ip_literal("tracker.example.com"));
/// ```
pub fn is_ip_literal(hostname: &str) -> bool {
    let host = hostname.trim();
    if host.is_empty() {
        return false;
    }

    if IPV4_RE.is_match(host) {
        return true;
    }

    if let Some(caps) = BRACKETED_IPV6_RE.captures(host) {
        return caps.get(1).is_some_and(|inner| is_ipv6(inner.as_str()));
    }

    is_ipv6(host)
}

/// Returns true for an unbracketed IPv6 address.
pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok() || BARE_IPV6_RE.is_match(s)
}
