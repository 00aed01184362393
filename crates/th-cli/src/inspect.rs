use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use th_compiler::{build_rules, parse_tracker_list, ParseStats};
use th_core::psl::SuffixList;
use th_core::types::{OrderPolicy, SkipReason};

pub struct InspectOptions {
    pub inputs: Vec<PathBuf>,
    pub order: OrderPolicy,
    pub domains: bool,
    pub list: bool,
}

/// Per-file counts.
pub struct FileReport {
    pub path: PathBuf,
    pub stats: ParseStats,
    pub hosts: usize,
    pub domains: usize,
}

/// Hosts and domains merged across every inspected file.
#[derive(Default)]
pub struct Inspection {
    pub files: Vec<FileReport>,
    pub hosts: BTreeSet<String>,
    pub domains: BTreeSet<String>,
}

impl Inspection {
    /// Entries a listing prints: registrable domains or full hostnames.
    pub fn entries(&self, domains: bool, order: OrderPolicy) -> Vec<String> {
        if domains {
            build_rules(&self.domains, false, order)
        } else {
            build_rules(&self.hosts, false, order)
        }
    }
}

pub fn collect_inspection(inputs: &[PathBuf], suffixes: &SuffixList) -> Result<Inspection, String> {
    if inputs.is_empty() {
        return Err("No input files specified".to_string());
    }

    let mut inspection = Inspection::default();
    for path in inputs {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

        let parsed = parse_tracker_list(&content, suffixes);
        inspection.files.push(FileReport {
            path: path.clone(),
            hosts: parsed.hosts.len(),
            domains: parsed.domains.len(),
            stats: parsed.stats,
        });
        inspection.hosts.extend(parsed.hosts);
        inspection.domains.extend(parsed.domains);
    }

    Ok(inspection)
}

/// Parse local tracker lists and report what a build would extract, without
/// touching the network or writing files.
pub fn run_inspect(opts: InspectOptions, suffixes: &SuffixList) -> Result<(), String> {
    let inspection = collect_inspection(&opts.inputs, suffixes)?;

    for file in &inspection.files {
        let stats = &file.stats;
        println!("{}", file.path.display());
        println!("  Lines:      {} ({} non-blank)", stats.total_lines, stats.non_blank_lines);
        println!("  Candidates: {}", stats.candidate_lines);
        println!("  Hosts:      {}", file.hosts);
        println!("  Domains:    {}", file.domains);
        for reason in SkipReason::ALL {
            let count = stats.skipped(reason);
            if count > 0 {
                println!("  Skipped:    {} {}", count, reason.as_str());
            }
        }
    }

    if inspection.files.len() > 1 {
        println!("Total unique hosts: {}", inspection.hosts.len());
        println!("Total unique domains: {}", inspection.domains.len());
    }

    if opts.list {
        println!();
        for entry in inspection.entries(opts.domains, opts.order) {
            println!("{}", entry);
        }
    }

    Ok(())
}
