use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use th_core::psl::SuffixList;
use th_core::types::{LineOutcome, SkipReason};
use th_core::url::classify_line;

/// Line-level counters gathered while parsing a tracker list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub total_lines: usize,
    pub non_blank_lines: usize,
    /// Lines that produced a host, duplicates included
    pub candidate_lines: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ParseStats {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }
}

/// Hosts and registrable domains found in one tracker list.
#[derive(Debug, Clone, Default)]
pub struct ParsedTrackers {
    /// Full lowercase hostnames
    pub hosts: BTreeSet<String>,
    /// Registrable domains of `hosts`; hosts without one are left out
    pub domains: BTreeSet<String>,
    pub stats: ParseStats,
}

/// Run every line of a tracker list through the extractor and normalizer.
///
/// Malformed lines never fail the parse; they are tallied by reason in
/// [`ParseStats::skipped`]. `NoRegistrableDomain` counts lines whose host is
/// kept in `hosts` but has no entry in `domains`.
pub fn parse_tracker_list(text: &str, suffixes: &SuffixList) -> ParsedTrackers {
    let mut parsed = ParsedTrackers::default();

    for raw_line in text.lines() {
        parsed.stats.total_lines += 1;

        let host = match classify_line(raw_line) {
            LineOutcome::Host(host) => host,
            LineOutcome::Skip(SkipReason::Blank) => {
                parsed.stats.record_skip(SkipReason::Blank);
                continue;
            }
            LineOutcome::Skip(reason) => {
                parsed.stats.non_blank_lines += 1;
                parsed.stats.record_skip(reason);
                log::debug!("skipping line ({}): {}", reason.as_str(), raw_line.trim());
                continue;
            }
        };

        parsed.stats.non_blank_lines += 1;
        parsed.stats.candidate_lines += 1;

        match suffixes.registrable_domain(&host) {
            Some(domain) => {
                parsed.domains.insert(domain);
            }
            None => {
                parsed.stats.record_skip(SkipReason::NoRegistrableDomain);
                log::debug!("no registrable domain for {host}");
            }
        }

        parsed.hosts.insert(host);
    }

    parsed
}
