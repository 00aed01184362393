use th_compiler::pipeline::OutputKind;
use th_compiler::RunSummary;
use th_core::types::OrderPolicy;

pub fn print_summary(summary: &RunSummary) {
    println!("Compiled tracker list '{}'", summary.source_url);
    println!(
        "  Lines:      {} ({} non-blank, {} with a tracker host)",
        summary.source_lines, summary.non_blank_lines, summary.candidate_lines
    );
    println!(
        "  Unique:     {} hosts, {} registrable domains",
        summary.unique_hosts, summary.unique_domains
    );

    if !summary.skipped.is_empty() {
        let parts: Vec<String> = summary
            .skipped
            .iter()
            .map(|(reason, count)| format!("{} {}", count, reason.as_str()))
            .collect();
        println!("  Skipped:    {}", parts.join(", "));
    }

    println!(
        "  Allowlist:  {} entries, {} domains excluded",
        summary.allowlist_entries, summary.allowlisted_domains
    );
    for failure in &summary.failed_allowlists {
        println!("  Warning:    allowlist source skipped: {}", failure.error);
    }

    for output in &summary.outputs {
        println!(
            "  Output:     {} -> {} rules ({}, {} order, {} dropped)",
            output.path.display(),
            output.rules,
            kind_label(output.kind),
            order_label(output.order),
            output.dropped,
        );
    }

    println!("  Time:       {:.1}ms", summary.elapsed_ms);

    if summary.is_empty() {
        println!("Warning: source list was fetched but produced no rules");
    }
}

pub fn print_summary_json(summary: &RunSummary) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn kind_label(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Hosts => "hostnames",
        OutputKind::Domains { wildcard: true } => "domains + wildcards",
        OutputKind::Domains { wildcard: false } => "domains",
    }
}

fn order_label(order: OrderPolicy) -> &'static str {
    match order {
        OrderPolicy::Lexical => "lexical",
        OrderPolicy::Length => "length",
    }
}
