//! Public Suffix List (PSL) utilities for eTLD+1 extraction
//!
//! The bundled list compiled into the `psl` crate is used by default. A fresh
//! `public_suffix_list.dat` can be loaded at runtime through
//! [`SuffixList::from_text`].
//!
//! # Examples
//!
//! ```
//! use th_core::psl::to_registrable_domain;
//!
//! assert_eq!(to_registrable_domain("sub.example.com").as_deref(), Some("example.com"));
//! assert_eq!(to_registrable_domain("tracker.cdn.example.co.uk").as_deref(), Some("example.co.uk"));
//! assert_eq!(to_registrable_domain("localhost"), None);
//! ```

use std::fmt;
use std::path::Path;

use publicsuffix::Psl;

/// Error type for loading a suffix list.
#[derive(Debug, thiserror::Error)]
pub enum PslError {
    #[error("Failed to read suffix list '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid suffix list: {0}")]
    Parse(String),
}

/// Public suffix table used to collapse hostnames to registrable domains.
#[derive(Default)]
pub enum SuffixList {
    /// List compiled into the binary
    #[default]
    Bundled,
    /// List parsed at runtime
    Custom(publicsuffix::List),
}

impl SuffixList {
    /// Parse a list in the `public_suffix_list.dat` format.
    pub fn from_text(text: &str) -> Result<Self, PslError> {
        let list = text
            .parse::<publicsuffix::List>()
            .map_err(|e| PslError::Parse(e.to_string()))?;
        Ok(SuffixList::Custom(list))
    }

    /// Read and parse a list from disk.
    pub fn from_path(path: &Path) -> Result<Self, PslError> {
        let text = std::fs::read_to_string(path).map_err(|source| PslError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&text)
    }

    /// Get the registrable domain (eTLD+1) for a hostname.
    ///
    /// Returns `None` when the host is a bare suffix, a single label, or sits
    /// under a suffix the list does not know.
    pub fn registrable_domain(&self, host: &str) -> Option<String> {
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() || host.starts_with('.') || host.contains("..") {
            return None;
        }

        // Unknown TLDs only match the implicit `*` rule.
        match self {
            SuffixList::Bundled => {
                let domain = ::psl::domain(host.as_bytes())?;
                if !domain.suffix().is_known() {
                    return None;
                }
                std::str::from_utf8(domain.as_bytes()).ok().map(str::to_owned)
            }
            SuffixList::Custom(list) => {
                let domain = list.domain(host.as_bytes())?;
                if !domain.suffix().is_known() {
                    return None;
                }
                std::str::from_utf8(domain.as_bytes()).ok().map(str::to_owned)
            }
        }
    }
}

impl fmt::Debug for SuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixList::Bundled => f.write_str("SuffixList::Bundled"),
            SuffixList::Custom(_) => f.write_str("SuffixList::Custom"),
        }
    }
}

/// Get the registrable domain using the bundled list.
pub fn to_registrable_domain(host: &str) -> Option<String> {
    SuffixList::Bundled.registrable_domain(host)
}
