//! trackerhosts Core Library
//!
//! This crate turns single lines of a BitTorrent tracker list into normalized
//! hostnames and registrable domains. It knows nothing about networking or
//! files; the compiler crate drives it over whole lists.
//!
//! # Modules
//!
//! - `addr`: Syntactic IPv4/IPv6 literal detection
//! - `url`: Announce URL scheme gating and host extraction
//! - `psl`: Public Suffix List for eTLD+1 extraction
//! - `types`: Shared type definitions

pub mod addr;
pub mod psl;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use self::addr::is_ip_literal;
pub use self::psl::{to_registrable_domain, PslError, SuffixList};
pub use self::types::{LineOutcome, OrderPolicy, SchemeMask, SkipReason};
pub use self::url::{classify_line, extract_host};
