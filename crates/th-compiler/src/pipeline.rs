//! Fetch, extract, normalize, filter, build and write in one run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use th_core::psl::SuffixList;
use th_core::types::{OrderPolicy, SkipReason};

use crate::allowlist::{is_allowlisted, load_allowlist, AllowList};
use crate::builder::build_rules;
use crate::fetch::{Fetch, FetchError, SourceFailure};
use crate::parser::{parse_tracker_list, ParsedTrackers};
use crate::writer::write_rules;

/// Error type for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to fetch tracker list: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No outputs configured")]
    NoOutputs,
}

/// What an output file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Full hostnames, not normalized and not allowlist-filtered
    Hosts,
    /// Registrable domains minus the allowlist, optionally with `*.` forms
    Domains { wildcard: bool },
}

/// One output artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub order: OrderPolicy,
}

impl OutputSpec {
    pub fn hosts(path: impl Into<PathBuf>, order: OrderPolicy) -> Self {
        Self {
            path: path.into(),
            kind: OutputKind::Hosts,
            order,
        }
    }

    pub fn domains(path: impl Into<PathBuf>, wildcard: bool, order: OrderPolicy) -> Self {
        Self {
            path: path.into(),
            kind: OutputKind::Domains { wildcard },
            order,
        }
    }
}

/// Everything a run needs; built by the caller, nothing is global.
#[derive(Debug, Default)]
pub struct PipelineConfig {
    pub source_url: String,
    pub allowlist_urls: Vec<String>,
    pub outputs: Vec<OutputSpec>,
    pub suffix_list: SuffixList,
}

/// Rules produced for one output before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    pub spec: OutputSpec,
    pub rules: Vec<String>,
    /// Registrable domains removed by the allowlist
    pub allowlisted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub order: OrderPolicy,
    pub rules: usize,
    pub allowlisted: usize,
    /// Non-blank input lines minus rules written; informational only
    pub dropped: usize,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub source_url: String,
    pub source_lines: usize,
    pub non_blank_lines: usize,
    pub candidate_lines: usize,
    pub unique_hosts: usize,
    pub unique_domains: usize,
    /// Input lines per skip reason
    pub skipped: BTreeMap<SkipReason, usize>,
    pub allowlist_entries: usize,
    /// Unique registrable domains excluded by the allowlist
    pub allowlisted_domains: usize,
    pub failed_allowlists: Vec<SourceFailure>,
    pub outputs: Vec<OutputSummary>,
    pub elapsed_ms: f64,
}

impl RunSummary {
    /// True when the source was fetched but no output received a rule.
    pub fn is_empty(&self) -> bool {
        self.outputs.iter().all(|o| o.rules == 0)
    }
}

/// Project parsed trackers onto each output spec.
pub fn compile_outputs(
    parsed: &ParsedTrackers,
    allowlist: &AllowList,
    specs: &[OutputSpec],
) -> Vec<CompiledOutput> {
    specs
        .iter()
        .map(|spec| match spec.kind {
            OutputKind::Hosts => CompiledOutput {
                spec: spec.clone(),
                rules: build_rules(&parsed.hosts, false, spec.order),
                allowlisted: 0,
            },
            OutputKind::Domains { wildcard } => {
                let kept: BTreeSet<&str> = parsed
                    .domains
                    .iter()
                    .map(String::as_str)
                    .filter(|domain| !is_allowlisted(domain, allowlist))
                    .collect();
                CompiledOutput {
                    spec: spec.clone(),
                    allowlisted: parsed.domains.len() - kept.len(),
                    rules: build_rules(kept, wildcard, spec.order),
                }
            }
        })
        .collect()
}

/// Run the whole pipeline once.
///
/// The tracker list fetch is fatal on failure and happens before anything is
/// written. Allowlist sources are only fetched when a domains output exists,
/// and their failures are reported in the summary instead of aborting.
pub fn run(config: &PipelineConfig, fetcher: &dyn Fetch) -> Result<RunSummary, PipelineError> {
    if config.outputs.is_empty() {
        return Err(PipelineError::NoOutputs);
    }

    let start = Instant::now();

    let text = fetcher
        .fetch_text(&config.source_url)
        .map_err(|source| PipelineError::Fetch {
            url: config.source_url.clone(),
            source,
        })?;
    log::info!("fetched {} bytes from {}", text.len(), config.source_url);

    let parsed = parse_tracker_list(&text, &config.suffix_list);

    let needs_allowlist = config
        .outputs
        .iter()
        .any(|o| matches!(o.kind, OutputKind::Domains { .. }));
    let load = if needs_allowlist {
        load_allowlist(fetcher, &config.allowlist_urls)
    } else {
        Default::default()
    };

    let compiled = compile_outputs(&parsed, &load.allowlist, &config.outputs);

    let allowlisted_domains = parsed
        .domains
        .iter()
        .filter(|domain| is_allowlisted(domain, &load.allowlist))
        .count();

    let mut outputs = Vec::with_capacity(compiled.len());
    for output in compiled {
        write_rules(&output.spec.path, &output.rules).map_err(|source| PipelineError::Write {
            path: output.spec.path.clone(),
            source,
        })?;
        log::info!("wrote {} rules to {}", output.rules.len(), output.spec.path.display());

        outputs.push(OutputSummary {
            dropped: parsed.stats.non_blank_lines.saturating_sub(output.rules.len()),
            rules: output.rules.len(),
            allowlisted: output.allowlisted,
            path: output.spec.path,
            kind: output.spec.kind,
            order: output.spec.order,
        });
    }

    let summary = RunSummary {
        source_url: config.source_url.clone(),
        source_lines: parsed.stats.total_lines,
        non_blank_lines: parsed.stats.non_blank_lines,
        candidate_lines: parsed.stats.candidate_lines,
        unique_hosts: parsed.hosts.len(),
        unique_domains: parsed.domains.len(),
        skipped: parsed.stats.skipped.clone(),
        allowlist_entries: load.allowlist.len(),
        allowlisted_domains,
        failed_allowlists: load.failed,
        outputs,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    if summary.is_empty() {
        log::warn!("tracker list fetched but produced no rules");
    }

    Ok(summary)
}
