//! Tracker announce URL host extraction
//!
//! Scheme detection works directly on the line bytes; only lines that pass it
//! are handed to the full URL parser.

use ::url::{Host, Url};

use crate::addr::is_ip_literal;
use crate::types::{LineOutcome, SchemeMask, SkipReason};

// =============================================================================
// Scheme Extraction
// =============================================================================

/// Fast scheme extraction without URL parsing.
/// Returns the scheme mask or None if unknown.
#[inline]
pub fn extract_scheme(line: &str) -> Option<SchemeMask> {
    let bytes = line.as_bytes();
    if bytes.len() < 5 {
        return None;
    }

    // Lowercase first char
    let c0 = bytes[0] | 0x20;

    match c0 {
        b'h' => {
            if bytes.len() >= 8 && bytes[..8].eq_ignore_ascii_case(b"https://") {
                Some(SchemeMask::HTTPS)
            } else if bytes.len() >= 7 && bytes[..7].eq_ignore_ascii_case(b"http://") {
                Some(SchemeMask::HTTP)
            } else {
                None
            }
        }
        b'u' => {
            if bytes.len() >= 6 && bytes[..6].eq_ignore_ascii_case(b"udp://") {
                Some(SchemeMask::UDP)
            } else {
                None
            }
        }
        b'w' => {
            if bytes.len() >= 6 && bytes[..6].eq_ignore_ascii_case(b"wss://") {
                Some(SchemeMask::WSS)
            } else if bytes[..5].eq_ignore_ascii_case(b"ws://") {
                Some(SchemeMask::WS)
            } else {
                None
            }
        }
        _ => None,
    }
}

// =============================================================================
// Host Extraction
// =============================================================================

/// Run one raw tracker line through scheme gating, URL parsing and IP
/// filtering.
pub fn classify_line(line: &str) -> LineOutcome {
    classify_line_with(line, SchemeMask::TRACKER)
}

/// Like [`classify_line`], accepting only the schemes in `accepted`.
pub fn classify_line_with(line: &str, accepted: SchemeMask) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skip(SkipReason::Blank);
    }
    if is_comment_line(line) {
        return LineOutcome::Skip(SkipReason::Comment);
    }

    match extract_scheme(line) {
        Some(scheme) if accepted.contains(scheme) => {}
        _ => return LineOutcome::Skip(SkipReason::UnsupportedScheme),
    }

    let parsed = match Url::parse(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("unparseable tracker line {line:?}: {e}");
            return LineOutcome::Skip(SkipReason::Malformed);
        }
    };

    let host = match parsed.host() {
        Some(Host::Domain(domain)) => domain,
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            return LineOutcome::Skip(SkipReason::IpLiteral);
        }
        None => return LineOutcome::Skip(SkipReason::MissingHost),
    };
    if host.is_empty() {
        return LineOutcome::Skip(SkipReason::MissingHost);
    }

    // Non-special schemes (udp) leave the host opaque and percent-encoded.
    // Re-parsing as a domain applies the same decoding, IDNA and IPv4 rules
    // that http(s) hosts already went through.
    let host = match Host::parse(host) {
        Ok(Host::Domain(domain)) => domain,
        Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)) => {
            return LineOutcome::Skip(SkipReason::IpLiteral);
        }
        Err(e) => {
            log::debug!("invalid tracker host {host:?}: {e}");
            return LineOutcome::Skip(SkipReason::Malformed);
        }
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return LineOutcome::Skip(SkipReason::MissingHost);
    }
    if is_ip_literal(&host) {
        return LineOutcome::Skip(SkipReason::IpLiteral);
    }

    LineOutcome::Host(host)
}

/// Extract the normalized hostname of a tracker announce URL.
///
/// Returns `None` for blank lines, comments, unrecognized schemes, malformed
/// URLs and IP literals.
///
/// ```
/// use th_core::url::extract_host;
///
/// assert_eq!(extract_host("udp://Tracker.Example.org:1337/announce").as_deref(), Some("tracker.example.org"));
/// assert_eq!(extract_host("magnet:?xt=urn:btih:abc"), None);
/// ```
pub fn extract_host(line: &str) -> Option<String> {
    classify_line(line).into_host()
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('!') || line.starts_with(';')
}
