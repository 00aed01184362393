//! Core type definitions for trackerhosts
//!
//! These types are shared by the extractor, the compiler and the CLI.

use serde::Serialize;

// =============================================================================
// Scheme Mask
// =============================================================================

bitflags::bitflags! {
    /// Announce URL schemes recognized by the extractor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SchemeMask: u8 {
        const HTTP = 1 << 0;
        const HTTPS = 1 << 1;
        const UDP = 1 << 2;
        const WS = 1 << 3;
        const WSS = 1 << 4;
        /// Every scheme a tracker list is expected to carry
        const TRACKER = Self::HTTP.bits()
            | Self::HTTPS.bits()
            | Self::UDP.bits()
            | Self::WS.bits()
            | Self::WSS.bits();
    }
}

// =============================================================================
// Line Outcome
// =============================================================================

/// Why a tracker line did not contribute a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Line starting with `#`, `!` or `;`
    Comment,
    /// No recognized `<scheme>://` prefix
    UnsupportedScheme,
    /// URL parser rejected the line
    Malformed,
    /// URL parsed but carries no host
    MissingHost,
    /// Host is a numeric IPv4/IPv6 address
    IpLiteral,
    /// Host has no registrable part under the public suffix list
    NoRegistrableDomain,
}

impl SkipReason {
    pub const ALL: [SkipReason; 7] = [
        SkipReason::Blank,
        SkipReason::Comment,
        SkipReason::UnsupportedScheme,
        SkipReason::Malformed,
        SkipReason::MissingHost,
        SkipReason::IpLiteral,
        SkipReason::NoRegistrableDomain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Blank => "blank",
            SkipReason::Comment => "comment",
            SkipReason::UnsupportedScheme => "unsupported scheme",
            SkipReason::Malformed => "malformed",
            SkipReason::MissingHost => "missing host",
            SkipReason::IpLiteral => "ip literal",
            SkipReason::NoRegistrableDomain => "no registrable domain",
        }
    }
}

/// Result of running one tracker line through the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Lowercased hostname without port, userinfo or path
    Host(String),
    Skip(SkipReason),
}

impl LineOutcome {
    pub fn host(&self) -> Option<&str> {
        match self {
            LineOutcome::Host(host) => Some(host),
            LineOutcome::Skip(_) => None,
        }
    }

    pub fn into_host(self) -> Option<String> {
        match self {
            LineOutcome::Host(host) => Some(host),
            LineOutcome::Skip(_) => None,
        }
    }
}

// =============================================================================
// Ordering Policy
// =============================================================================

/// Order in which rules are written to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Byte-wise ascending
    #[default]
    Lexical,
    /// Shortest first, ties broken lexically
    Length,
}
