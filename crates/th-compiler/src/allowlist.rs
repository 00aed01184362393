//! CDN allowlist loading and matching
//!
//! Domains owned by shared CDN infrastructure must never end up in override
//! rules. Allowlist sources are plain text, one domain per line.

use std::collections::HashSet;

use crate::builder::strip_wildcard;
use crate::fetch::{Fetch, SourceFailure};

/// Union of all successfully loaded allowlist sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    entries: HashSet<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an allowlist from a single source body.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::new();
        list.extend_from_text(text);
        list
    }

    /// Add every non-blank, non-comment line of `text`. Returns how many new
    /// entries were added.
    pub fn extend_from_text(&mut self, text: &str) -> usize {
        let before = self.entries.len();
        for line in text.lines() {
            if let Some(entry) = normalize_entry(line) {
                self.entries.insert(entry);
            }
        }
        self.entries.len() - before
    }

    pub fn insert(&mut self, domain: &str) -> bool {
        match normalize_entry(domain) {
            Some(entry) => self.entries.insert(entry),
            None => false,
        }
    }

    /// Exact match on the lowercased domain, ignoring a leading `*.`.
    pub fn contains(&self, domain: &str) -> bool {
        let domain = strip_wildcard(domain.trim());
        if domain.bytes().any(|b| b.is_ascii_uppercase()) {
            self.entries.contains(&domain.to_ascii_lowercase())
        } else {
            self.entries.contains(domain)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check whether a domain is excluded by the allowlist.
#[inline]
pub fn is_allowlisted(domain: &str, allowlist: &AllowList) -> bool {
    allowlist.contains(domain)
}

/// Result of fetching every allowlist source.
#[derive(Debug, Clone, Default)]
pub struct AllowListLoad {
    pub allowlist: AllowList,
    pub failed: Vec<SourceFailure>,
}

/// Fetch and merge allowlist sources.
///
/// A source that fails to fetch is logged and contributes nothing; loading
/// never fails as a whole.
pub fn load_allowlist<S: AsRef<str>>(fetcher: &dyn Fetch, sources: &[S]) -> AllowListLoad {
    let mut load = AllowListLoad::default();

    for source in sources {
        let url = source.as_ref();
        match fetcher.fetch_text(url) {
            Ok(text) => {
                let added = load.allowlist.extend_from_text(&text);
                log::info!("allowlist {url}: {added} new entries");
            }
            Err(e) => {
                log::warn!("allowlist source unavailable, skipping: {e}");
                load.failed.push(SourceFailure::from(&e));
            }
        }
    }

    load
}

fn normalize_entry(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let entry = strip_wildcard(trimmed).trim_end_matches('.');
    if entry.is_empty() {
        return None;
    }
    Some(entry.to_ascii_lowercase())
}
